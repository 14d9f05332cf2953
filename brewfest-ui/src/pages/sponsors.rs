use crate::content::{monogram, FESTIVAL_NAME, SPONSORS};
use leptos::prelude::*;

#[component]
pub fn SponsorsPage() -> impl IntoView {
    view! {
        <h1 class="page-title">"Our Partners"</h1>
        <p class="page-lead">
            "We thank our generous sponsors who make the " {FESTIVAL_NAME} " possible."
        </p>
        <div class="sponsors">
            {SPONSORS
                .iter()
                .map(|sponsor| {
                    view! {
                        <div class="sponsors__card">
                            <div class="sponsors__logo">{monogram(sponsor.name)}</div>
                            <h2 class="sponsors__name">{sponsor.name}</h2>
                            <p class="sponsors__role">{sponsor.role}</p>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
