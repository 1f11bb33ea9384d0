use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::notices::{NoticeHost, NoticeStack};
use crate::usecases::u501_feedback::{FeedbackDialogHost, FeedbackLauncher};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());
    provide_context(NoticeStack::new());
    provide_context(FeedbackLauncher::new());

    view! {
        <Shell />
        <NoticeHost />
        <FeedbackDialogHost />
    }
}
