use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">"Analyzing signatures, this can take a minute..."</p>
        </div>
    }
}
