use brewfest_app::domain::Brewery;
use leptos::prelude::*;

#[component]
pub fn BreweryCard(brewery: Brewery) -> impl IntoView {
    let alt = format!("{} logo", brewery.name);

    view! {
        <article class="brewery-card">
            <img class="brewery-card__logo" src=brewery.logo_url alt=alt loading="lazy"/>
            <div class="brewery-card__body">
                <h3 class="brewery-card__name">{brewery.name}</h3>
                <p class="brewery-card__description">{brewery.description}</p>
                <a
                    class="brewery-card__location"
                    href=brewery.location_url
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    "📍 Find the booth"
                </a>
            </div>
        </article>
    }
}
