use crate::components::{BreweryCard, ErrorDisplay, LoadingSpinner};
use brewfest_app::domain::Brewery;
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(GetBreweriesFn, "/api/fn", endpoint = "breweries")]
pub async fn get_breweries() -> Result<Vec<Brewery>, ServerFnError> {
    let ctx = super::app_context("get_breweries")?;

    ctx.manage_breweries
        .list()
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))
}

#[component]
pub fn BreweriesPage() -> impl IntoView {
    let breweries = Resource::new(|| (), |_| get_breweries());

    view! {
        <h1 class="page-title">"Meet the Breweries"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner text="Loading the lineup..."/> }>
            {move || {
                breweries.get().map(|result| match result {
                    Ok(list) if list.is_empty() => view! {
                        <p class="page-lead">"The lineup is being announced soon."</p>
                    }
                    .into_any(),
                    Ok(list) => view! {
                        <div class="brewery-grid">
                            {list
                                .into_iter()
                                .map(|brewery| {
                                    let vote_href = format!("/vote?brewery={}", brewery.id);
                                    view! {
                                        <div class="brewery-grid__cell">
                                            <BreweryCard brewery=brewery/>
                                            <a href=vote_href class="brewery-grid__vote">"Rate this brewery"</a>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any(),
                    Err(e) => view! {
                        <ErrorDisplay message=e.to_string() retry_href="/breweries"/>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}
