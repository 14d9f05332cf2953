use super::get_breweries;
use crate::components::{ErrorDisplay, LoadingSpinner};
use brewfest_app::domain::Rating;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

const DEFAULT_RATING: i32 = 5;

/// Plain form posting to `/vote`, so voting works before hydration.
#[component]
pub fn VotePage() -> impl IntoView {
    let breweries = Resource::new(|| (), |_| get_breweries());
    let query = use_query_map();
    let preselected = move || query.read().get("brewery").unwrap_or_default();
    let rating = RwSignal::new(DEFAULT_RATING);

    view! {
        <h1 class="page-title">"Vote for Your Favorite Brewery"</h1>
        <p class="page-lead">
            "Help us crown the People's Choice. One rating per brewery, as many breweries as you like."
        </p>

        <Suspense fallback=move || view! { <LoadingSpinner text="Loading the lineup..."/> }>
            {move || {
                breweries.get().map(|result| match result {
                    Ok(list) if list.is_empty() => view! {
                        <p class="page-lead">"Voting opens once the breweries are announced."</p>
                    }
                    .into_any(),
                    Ok(list) => {
                        let selected = preselected();
                        view! {
                            <form action="/vote" method="post" class="vote-form">
                                <label class="vote-form__label" for="brewery_id">"Step 1: Choose a brewery"</label>
                                <select id="brewery_id" name="brewery_id" class="vote-form__select" required>
                                    <option value="">"🍺 Select a booth..."</option>
                                    {list
                                        .into_iter()
                                        .map(|brewery| {
                                            let id = brewery.id.to_string();
                                            let is_selected = id == selected;
                                            view! {
                                                <option value=id selected=is_selected>{brewery.name}</option>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </select>

                                <label class="vote-form__label" for="rating">"Step 2: Rate your experience"</label>
                                <RatingSlider rating=rating/>

                                <button type="submit" class="vote-form__button">"Submit my vote"</button>
                            </form>
                        }
                        .into_any()
                    }
                    Err(e) => view! {
                        <ErrorDisplay message=e.to_string() retry_href="/vote"/>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}

/// Range input plus its live readout. The static `value` is what the form
/// submits when the page has not hydrated.
#[component]
fn RatingSlider(rating: RwSignal<i32>) -> impl IntoView {
    let emoji = move || Rating::new(rating.get()).map(Rating::emoji).unwrap_or("🍺");

    view! {
        <div class="vote-form__emoji">{emoji}</div>
        <div class="vote-form__score">{move || rating.get()} " / 10"</div>
        <input
            id="rating"
            name="rating"
            type="range"
            min="1"
            max="10"
            class="vote-form__range"
            value=DEFAULT_RATING.to_string()
            prop:value=move || rating.get().to_string()
            on:input=move |ev| {
                if let Ok(value) = event_target_value(&ev).parse() {
                    rating.set(value);
                }
            }
        />
        <div class="vote-form__scale">
            <span>"Not good"</span>
            <span>"Average"</span>
            <span>"Masterpiece!"</span>
        </div>
    }
}
