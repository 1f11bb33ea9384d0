use contracts::usecases::u501_feedback::{FeedbackSession, FeedbackSubject};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use super::view_model::FeedbackDialogViewModel;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notices::use_notices;

#[component]
pub fn FeedbackDialog(session: FeedbackSession, on_closed: Callback<()>) -> impl IntoView {
    let vm = FeedbackDialogViewModel::new(session, use_notices(), on_closed);

    let (config, is_prompt) = vm
        .session
        .with_untracked(|s| (s.config().clone(), s.mode().is_prompt()));
    let accept = config.upload_restrictions().accept_attribute();
    let upload_notes = config.upload_notes();
    let description_hint = config.description_hint();
    let contact_url = config.contact_url.clone();
    let max_length = config.max_description_length;

    let title = if is_prompt {
        "How was your experience?"
    } else {
        "Send Feedback"
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            vm.upload_command(file);
        }
        // allow picking the same file again
        input.set_value("");
    };

    view! {
        <Modal
            title=title.to_string()
            on_close=Callback::new(move |_| vm.dismiss_command())
            modal_class="feedback-dialog"
        >
            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="details-form">
                <div class="form__group">
                    <label class="form__label">"Subject"</label>
                    <Select value=vm.subject>
                        <option value="">"-- Select a subject --"</option>
                        {FeedbackSubject::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                            .collect_view()}
                    </Select>
                </div>

                <div class="form__group">
                    <label class="form__label">"Description"</label>
                    <Textarea value=vm.description placeholder="Describe the issue or idea" attr:rows=6 />
                    <div class="form__hint">
                        {move || format!(
                            "{} ({}/{})",
                            description_hint,
                            vm.description.get().chars().count(),
                            max_length
                        )}
                    </div>
                </div>

                <div class="form__group">
                    <label class="form__label">"Contact email (optional)"</label>
                    <Input value=vm.contact_email placeholder="Leave empty to use the company account" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Attachments"</label>
                    <label class=move || {
                        if vm.is_action_enabled() {
                            "button button--secondary"
                        } else {
                            "button button--secondary button--disabled"
                        }
                    }>
                        {icon("upload")}
                        " Attach file"
                        <input
                            type="file"
                            style="display: none;"
                            accept=accept
                            on:change=on_file_change
                            disabled=move || !vm.is_action_enabled()
                        />
                    </label>
                    {move || vm.uploading.get().then(|| view! { <Spinner /> })}
                    <div class="form__hint">{upload_notes}</div>
                    <ul class="attachment-list">
                        <For
                            each=move || vm.attachments()
                            key=|a| a.url.clone()
                            children=move |a| view! {
                                <li class="attachment-list__item">
                                    {icon("file-text")}
                                    <a href=a.url.clone() target="_blank">{a.display_name.clone()}</a>
                                </li>
                            }
                        />
                    </ul>
                </div>

                <div class="form__hint">
                    "Prefer talking to a person? "
                    <a href=contact_url target="_blank">"Contact us"</a>
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit_command()
                    disabled=Signal::derive(move || !vm.is_action_enabled())
                >
                    {icon("send")}
                    {move || if vm.is_submitting() { " Sending..." } else { " Send" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.cancel_command()
                    disabled=Signal::derive(move || vm.is_submitting())
                >
                    {vm.secondary_label()}
                </Button>
            </div>
        </Modal>
    }
}
