pub mod components;
pub mod content;
pub mod pages;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use components::{Footer, Header};
use pages::{AwardsPage, BreweriesPage, HomePage, SchedulePage, SponsorsPage, VotePage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Great Cambodian Craft Beer Festival 2026"/>
        <Meta name="description" content="Breweries, live music and people's choice voting at the Great Cambodian Craft Beer Festival"/>
        <Stylesheet id="leptos" href="/pkg/brewfest.css"/>

        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/breweries") view=BreweriesPage/>
                    <Route path=path!("/schedule") view=SchedulePage/>
                    <Route path=path!("/awards") view=AwardsPage/>
                    <Route path=path!("/sponsors") view=SponsorsPage/>
                    <Route path=path!("/vote") view=VotePage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
