use crate::content::{EVENT_DATE, EVENT_VENUE};
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"Great Cambodian Craft Beer Festival · " {EVENT_DATE} " · " {EVENT_VENUE}</p>
            <p class="footer__note">"Please drink responsibly."</p>
        </footer>
    }
}
