use crate::components::LoadingSpinner;
use crate::submit_guard::{
    SpinnerHandle, SubmitControlHandle, SubmitGuard, FORM_ID, SPINNER_ID, SUBMIT_BUTTON_ID,
};
use leptos::prelude::*;

/// Spinner visibility backed by a reactive signal.
#[derive(Clone, Copy)]
struct SpinnerSignal(RwSignal<bool>);

impl SpinnerHandle for SpinnerSignal {
    fn set_visible(&self, visible: bool) {
        self.0.set(visible);
    }
}

/// Submit-button disabled marker backed by a reactive signal.
#[derive(Clone, Copy)]
struct SubmitButtonSignal(RwSignal<bool>);

impl SubmitControlHandle for SubmitButtonSignal {
    fn set_disabled(&self, disabled: bool) {
        self.0.set(disabled);
    }
}

/// Upload form for the two signatures. Posts natively to `/verify`;
/// the submit guard only flips the spinner and button state, it never
/// prevents the default submission.
#[component]
pub fn VerifyForm() -> impl IntoView {
    let spinner_visible = RwSignal::new(false);
    let button_disabled = RwSignal::new(false);
    let guard = SubmitGuard::new(
        SpinnerSignal(spinner_visible),
        SubmitButtonSignal(button_disabled),
    );

    view! {
        <form
            id=FORM_ID
            class="verify-form"
            action="/verify"
            method="post"
            enctype="multipart/form-data"
            on:submit=move |_| guard.on_submit()
        >
            <div class="verify-form__field">
                <label class="verify-form__label" for="signature1">"First signature"</label>
                <input
                    type="file"
                    id="signature1"
                    name="signature1"
                    class="verify-form__file"
                    accept=".png,.jpg,.jpeg"
                    required
                />
            </div>
            <div class="verify-form__field">
                <label class="verify-form__label" for="signature2">"Second signature"</label>
                <input
                    type="file"
                    id="signature2"
                    name="signature2"
                    class="verify-form__file"
                    accept=".png,.jpg,.jpeg"
                    required
                />
            </div>
            <div class="verify-form__field">
                <label class="verify-form__label" for="modelSelect">"Model"</label>
                <select id="modelSelect" name="modelSelect" class="verify-form__select">
                    <option value="gemini" selected>"Gemini 2.0 Flash"</option>
                    <option value="perplexity">"Perplexity Sonar Pro"</option>
                </select>
            </div>
            <button
                id=SUBMIT_BUTTON_ID
                type="submit"
                class="verify-form__button"
                prop:disabled=move || button_disabled.get()
            >
                {move || if button_disabled.get() { "Verifying..." } else { "Verify Signatures" }}
            </button>
        </form>
        <div
            id=SPINNER_ID
            class="loading-slot"
            class=("loading-slot--hidden", move || !spinner_visible.get())
        >
            <LoadingSpinner/>
        </div>
    }
}
