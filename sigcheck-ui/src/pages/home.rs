use crate::components::VerifyForm;
use leptos::prelude::*;
use server_fn::ServerFnError;
use sigcheck_app::domain::Verdict;

#[server(VerifySignaturesFn, "/api", endpoint = "verify_signatures")]
pub async fn verify_signatures(
    signature1_name: String,
    signature1_b64: String,
    signature2_name: String,
    signature2_b64: String,
    model: String,
) -> Result<Verdict, ServerFnError> {
    use sigcheck_app::domain::{Provider, SignaturePair};
    use sigcheck_app::infrastructure::security::UploadValidator;
    use sigcheck_app::AppContext;
    use std::net::{IpAddr, Ipv4Addr};

    let ctx = expect_context::<AppContext>();

    let client_ip = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

    if let Err(e) = ctx.rate_limiter.check_rate_limit(client_ip) {
        return Err(ServerFnError::new(e.user_message()));
    }

    if let Err(e) = ctx.cost_tracker.check_and_increment() {
        return Err(ServerFnError::new(e.user_message()));
    }

    let provider = Provider::parse(&model);
    tracing::info!("verify_signatures server fn via {}", provider.as_str());

    let first = UploadValidator::image_from_base64(&signature1_name, &signature1_b64)
        .map_err(|e| ServerFnError::new(e.user_message()))?;
    let second = UploadValidator::image_from_base64(&signature2_name, &signature2_b64)
        .map_err(|e| ServerFnError::new(e.user_message()))?;

    ctx.verify_signatures
        .execute(provider, SignaturePair::new(first, second))
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="hero__title">"Signature Verification"</h1>
            <p class="hero__subtitle">
                "Upload two signature images and a vision model will compare them with forensic-level scrutiny."
            </p>
        </div>

        <VerifyForm/>

        <p class="footer-note">
            "Results are advisory and should be reviewed by a qualified examiner."
        </p>
    }
}
