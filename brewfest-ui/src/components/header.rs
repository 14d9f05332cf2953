use leptos::prelude::*;
use leptos_router::hooks::use_location;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Breweries", "/breweries"),
    ("Schedule", "/schedule"),
    ("Awards", "/awards"),
    ("Sponsors", "/sponsors"),
    ("Admin", "/admin/login"),
];

#[component]
pub fn Header() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <header class="header">
            <div class="header__inner">
                <a href="/" class="header__brand">"🍺 GCCBF 2026"</a>
                <nav class="header__nav">
                    {NAV_ITEMS
                        .iter()
                        .map(|&(label, href)| {
                            let is_active = move || pathname.get() == href;
                            view! {
                                <a
                                    href=href
                                    class="header__link"
                                    class:header__link--active=is_active
                                >
                                    {label}
                                </a>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
                <a href="/vote" class="header__cta">"Vote"</a>
            </div>
        </header>
    }
}
