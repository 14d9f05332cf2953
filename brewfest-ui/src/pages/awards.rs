use crate::components::{LoadingSpinner, Podium};
use crate::content::AWARDS;
use brewfest_app::domain::BreweryStat;
use leptos::prelude::*;
use server_fn::ServerFnError;

/// Current top three of the guest vote.
#[server(GetPodiumFn, "/api/fn", endpoint = "podium")]
pub async fn get_podium() -> Result<Vec<BreweryStat>, ServerFnError> {
    let ctx = super::app_context("get_podium")?;

    let leaderboard = ctx
        .tally_votes
        .leaderboard()
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))?;

    Ok(leaderboard.podium().to_vec())
}

#[component]
pub fn AwardsPage() -> impl IntoView {
    let podium = Resource::new(|| (), |_| get_podium());

    view! {
        <h1 class="page-title">"Competition Awards"</h1>
        <p class="page-lead">
            "Three categories honoring the craftsmanship and culture of Cambodian brewing."
        </p>
        <div class="awards">
            {AWARDS
                .iter()
                .map(|award| {
                    view! {
                        <div class="awards__card">
                            <div class="awards__icon">{award.icon}</div>
                            <h3 class="awards__title">{award.title}</h3>
                            <p class="awards__subtitle">{award.subtitle}</p>
                            <p class="awards__description">{award.description}</p>
                            {(!award.medals.is_empty()).then(|| view! {
                                <ul class="awards__medals">
                                    {award.medals.iter().map(|m| view! { <li>{*m}</li> }).collect::<Vec<_>>()}
                                </ul>
                            })}
                            {award.guest_voted.then(|| view! {
                                <div class="awards__standings">
                                    <h4>"Current standings"</h4>
                                    <Suspense fallback=move || view! { <LoadingSpinner text="Counting votes..."/> }>
                                        {move || {
                                            podium.get().map(|result| match result {
                                                Ok(stats) => view! { <Podium stats=stats/> }.into_any(),
                                                Err(_) => view! {
                                                    <p class="podium__empty">"Standings are unavailable right now."</p>
                                                }
                                                .into_any(),
                                            })
                                        }}
                                    </Suspense>
                                </div>
                            })}
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
        <p class="awards__footnote">
            "Judging conducted in accordance with international blind-tasting standards."
        </p>
    }
}
