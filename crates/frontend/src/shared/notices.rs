//! Toast stack for short user-visible alerts.

use contracts::shared::notice::Notice;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const NOTICE_LIFETIME_MS: u32 = 5_000;

#[derive(Clone, Copy)]
pub struct NoticeStack {
    items: RwSignal<Vec<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl NoticeStack {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    /// Shows a notice and removes it after a few seconds
    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        log::debug!("notice [{:?}] {}", notice.indicator, notice.message);
        self.items.update(|items| items.push((id, notice)));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_LIFETIME_MS).await;
            this.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|(i, _)| *i != id));
    }
}

impl Default for NoticeStack {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notices() -> NoticeStack {
    use_context::<NoticeStack>().unwrap_or_else(|| {
        log::warn!("NoticeStack context missing, notices will not be shown");
        NoticeStack::new()
    })
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let stack = use_notices();

    view! {
        <div class="notice-stack">
            <For
                each=move || stack.items.get()
                key=|(id, _)| *id
                children=move |(id, notice): (u64, Notice)| {
                    view! {
                        <div
                            class=format!("notice {}", notice.indicator.css_class())
                            on:click=move |_| stack.dismiss(id)
                        >
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
