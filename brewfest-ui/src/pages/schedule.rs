use crate::content::SCHEDULE;
use leptos::prelude::*;

#[component]
pub fn SchedulePage() -> impl IntoView {
    view! {
        <h1 class="page-title">"Event Schedule"</h1>
        <ol class="timeline">
            {SCHEDULE
                .iter()
                .map(|slot| {
                    view! {
                        <li class="timeline__item">
                            <span class="timeline__icon">{slot.kind.icon()}</span>
                            <div class="timeline__card">
                                <h3 class="timeline__title">{slot.title}</h3>
                                <time class="timeline__time">{slot.time}</time>
                            </div>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ol>
    }
}
