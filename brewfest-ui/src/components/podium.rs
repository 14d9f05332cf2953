use brewfest_app::domain::BreweryStat;
use leptos::prelude::*;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Top three of the people's choice standings.
#[component]
pub fn Podium(stats: Vec<BreweryStat>) -> impl IntoView {
    if stats.is_empty() {
        return view! { <p class="podium__empty">"No votes yet. Be the first!"</p> }.into_any();
    }

    view! {
        <ol class="podium">
            {stats
                .into_iter()
                .zip(MEDALS)
                .map(|(stat, medal)| {
                    view! {
                        <li class="podium__place">
                            <span class="podium__medal">{medal}</span>
                            <span class="podium__name">{stat.brewery.name}</span>
                            <span class="podium__score">
                                {format!("{:.1}", stat.average_rating)} " / 10"
                            </span>
                            <span class="podium__votes">{stat.vote_count} " votes"</span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ol>
    }
    .into_any()
}
