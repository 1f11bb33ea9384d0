use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

/// Modal frame with a title bar and a close button.
///
/// Escape, an overlay click and the close button all call `on_close`; the
/// host decides whether closing is allowed right now.
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    #[prop(optional)] modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    // Escape key; the listener goes away together with the modal
    let handle = window_event_listener(ev::keydown, move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let handle_overlay_click = move |_| on_close.run(());
    let stop_propagation = move |ev: ev::MouseEvent| ev.stop_propagation();
    let handle_close = move |_| on_close.run(());

    view! {
        <div class="modal-overlay" on:click=handle_overlay_click>
            <div class=format!("modal {}", modal_class.unwrap_or_default()) on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <div class="modal-header-actions">
                        <button class="button button--icon modal__close" on:click=handle_close>
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
