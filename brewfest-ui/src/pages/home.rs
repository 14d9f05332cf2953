use crate::content::{EVENT_DATE, EVENT_HOURS, EVENT_VENUE, FESTIVAL_NAME};
use leptos::prelude::*;

const HIGHLIGHTS: &[(&str, &str, &str)] = &[
    (
        "Meet the Breweries",
        "Discover the breweries pouring from across Cambodia and learn their stories.",
        "/breweries",
    ),
    (
        "Event Schedule",
        "Live music, DJ sets and the award ceremony, hour by hour.",
        "/schedule",
    ),
    (
        "Vote Now",
        "Rate the breweries you tasted and help crown the People's Choice.",
        "/vote",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="hero__title">{FESTIVAL_NAME}</h1>
            <p class="hero__subtitle">
                "Cambodia's premier craft beer festival, with local breweries and live entertainment."
            </p>
            <ul class="hero__details">
                <li>"🗓️ " {EVENT_DATE}</li>
                <li>"⏰ " {EVENT_HOURS}</li>
                <li>"📍 " {EVENT_VENUE}</li>
            </ul>
            <a href="/vote" class="hero__cta">"🍺 VOTE NOW"</a>
        </div>

        <section class="highlights">
            {HIGHLIGHTS
                .iter()
                .map(|&(title, text, href)| {
                    view! {
                        <div class="highlights__card">
                            <h3 class="highlights__title">{title}</h3>
                            <p>{text}</p>
                            <a href=href class="highlights__link">"Learn more →"</a>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </section>
    }
}
