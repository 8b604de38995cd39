use axum::extract::{DefaultBodyLimit, Multipart};
use axum::response::{Html, IntoResponse};
use axum::routing::post;
use axum::Router;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use sigcheck_app::domain::{Provider, SignaturePair, Verdict};
use sigcheck_app::infrastructure::security::UploadValidator;
use sigcheck_app::AppContext;
use sigcheck_errors::AppError;
use sigcheck_ui::pages::VerifySignaturesFn;
use sigcheck_ui::App;
use tower_http::compression::CompressionLayer;

// Two images at 5 MB each plus multipart overhead.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = AppContext::from_env();

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<VerifySignaturesFn>();
    tracing::info!("Registered server function: VerifySignaturesFn");

    let app = Router::new()
        .route("/verify", post({
            let ctx = app_context.clone();
            move |multipart: Multipart| {
                let ctx = ctx.clone();
                async move {
                    handle_verify_form(ctx, multipart).await
                }
            }
        }))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Security: Rate limit 5/min, 20/hour. Daily limit: {} requests",
        app_context.cost_tracker.get_remaining_requests()
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

async fn handle_verify_form(ctx: AppContext, mut multipart: Multipart) -> impl IntoResponse {
    use std::net::{IpAddr, Ipv4Addr};

    let client_ip = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

    if let Err(e) = ctx.rate_limiter.check_rate_limit(client_ip) {
        return Html(render_error_page(&e.user_message()));
    }

    if let Err(e) = ctx.cost_tracker.check_and_increment() {
        return Html(render_error_page(e.user_message()));
    }

    let (pair, provider) = match read_verify_form(&mut multipart).await {
        Ok(parsed) => parsed,
        Err(e) => return Html(render_error_page(e.user_message())),
    };

    match ctx.verify_signatures.execute(provider, pair).await {
        Ok(verdict) => Html(render_result_page(&verdict)),
        Err(e) => Html(render_error_page(e.user_message())),
    }
}

/// Pulls the two file fields and the model select out of the multipart
/// body. Field names match the form markup: `signature1`, `signature2`,
/// `modelSelect`.
async fn read_verify_form(
    multipart: &mut Multipart,
) -> Result<(SignaturePair, Provider), AppError> {
    let mut first: Option<(String, Vec<u8>)> = None;
    let mut second: Option<(String, Vec<u8>)> = None;
    let mut model = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "signature1" | "signature2" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                let upload = Some((filename, bytes.to_vec()));
                if name == "signature1" {
                    first = upload;
                } else {
                    second = upload;
                }
            }
            "modelSelect" => {
                model = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(e.to_string()))?;
            }
            _ => {}
        }
    }

    let (first_name, first_bytes) = first.ok_or(AppError::MissingUpload)?;
    let (second_name, second_bytes) = second.ok_or(AppError::MissingUpload)?;

    let pair = SignaturePair::new(
        UploadValidator::image_from_bytes(&first_name, &first_bytes)?,
        UploadValidator::image_from_bytes(&second_name, &second_bytes)?,
    );

    Ok((pair, Provider::parse(&model)))
}

fn render_result_page(verdict: &Verdict) -> String {
    let summary = verdict.summary();
    let status_line = summary
        .match_status
        .map(|status| format!(r#"<p class="report__status">{}</p>"#, escape_html(&status)))
        .unwrap_or_default();
    let confidence_line = summary
        .confidence
        .map(|confidence| {
            format!(
                r#"<p class="report__confidence">Confidence: {}</p>"#,
                escape_html(&confidence)
            )
        })
        .unwrap_or_default();
    let html_content = markdown_to_html(&verdict.report_text);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Verification Report - Signature Check</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        <div class="report">
            <h2 class="report__title">Verification Report</h2>
            {status_line}
            {confidence_line}
            <div class="report__content">{html_content}</div>
            <p class="report__meta">Model: {model}</p>
            <div class="report__actions">
                <a href="/" class="report__button--primary" style="text-decoration:none;display:inline-block;">Verify Another Pair</a>
            </div>
        </div>
    </main>
</body>
</html>"#,
        status_line = status_line,
        confidence_line = confidence_line,
        html_content = html_content,
        model = verdict.provider.display_name(),
        CSS = CSS
    )
}

fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Error - Signature Check</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        <div class="error">
            <p class="error__title">Something went wrong</p>
            <p class="error__message">{message}</p>
            <a href="/" class="error__retry" style="text-decoration:none;display:inline-block;margin-top:1rem;">Try Again</a>
        </div>
    </main>
</body>
</html>"#,
        message = escape_html(message),
        CSS = CSS
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn wrap_marker_pairs(text: &str, marker: &str, tag: &str) -> String {
    let mut out = String::new();
    let mut open = false;
    let mut parts = text.split(marker);

    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        if open {
            out.push_str(&format!("</{}>", tag));
        } else {
            out.push_str(&format!("<{}>", tag));
        }
        open = !open;
        out.push_str(part);
    }
    if open {
        out.push_str(&format!("</{}>", tag));
    }
    out
}

fn render_inline(text: &str) -> String {
    let strong = wrap_marker_pairs(&escape_html(text), "**", "strong");
    wrap_marker_pairs(&strong, "*", "em")
}

fn markdown_to_html(text: &str) -> String {
    let mut html = String::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("## ") {
            html.push_str(&format!("<h4>{}</h4>", render_inline(rest)));
        } else if let Some(rest) = line.strip_prefix("# ") {
            html.push_str(&format!("<h3>{}</h3>", render_inline(rest)));
        } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            html.push_str(&format!("<li>{}</li>", render_inline(rest)));
        } else {
            html.push_str(&format!("<p>{}</p>", render_inline(line)));
        }
    }

    html
}

const CSS: &str = r#"
:root {
    --base: #f7f8fa;
    --surface: #ffffff;
    --overlay: #e4e7ec;
    --muted: #98a2b3;
    --subtle: #667085;
    --text: #1d2939;
    --accent: #1d4ed8;
    --accent-soft: #3b82f6;
    --danger: #b42318;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
}
.container { max-width: 800px; margin: 0 auto; padding: 1.5rem; }
.report {
    background: var(--surface); border: 2px solid var(--overlay);
    border-radius: 12px; padding: 1.5rem; margin: 2rem 0;
}
.report__title { color: var(--accent); font-size: 1.4rem; margin-bottom: 1rem; padding-bottom: 0.75rem; border-bottom: 2px solid var(--overlay); }
.report__status { font-size: 1.2rem; font-weight: 700; margin-bottom: 0.5rem; }
.report__confidence { color: var(--subtle); margin-bottom: 1rem; }
.report__content { line-height: 1.8; font-size: 1.05rem; }
.report__content p { margin-bottom: 1rem; }
.report__content strong { font-weight: 700; color: var(--accent); }
.report__content em { font-style: italic; }
.report__content h3 { font-size: 1.2rem; color: var(--accent); margin: 1rem 0 0.5rem; }
.report__content h4 { font-size: 1.1rem; color: var(--subtle); margin: 0.75rem 0 0.5rem; }
.report__content li { margin-left: 1.5rem; margin-bottom: 0.5rem; list-style: disc; }
.report__meta { margin-top: 1rem; color: var(--muted); font-size: 0.9rem; }
.report__actions { margin-top: 1.5rem; padding-top: 1rem; border-top: 2px solid var(--overlay); }
.report__button--primary { padding: 0.75rem 1.5rem; background: var(--accent); color: var(--surface); border: none; border-radius: 8px; font-weight: 600; cursor: pointer; }
.error { background: #fef3f2; border: 2px solid var(--danger); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
.error__title { color: var(--danger); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #912018; }
.error__retry { padding: 0.5rem 1rem; background: var(--danger); color: var(--surface); border: none; border-radius: 4px; cursor: pointer; }
"#;

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};
    use leptos::prelude::*;
    use leptos_meta::*;

    let css = r#"
        :root {
            --base: #f7f8fa;
            --surface: #ffffff;
            --overlay: #e4e7ec;
            --muted: #98a2b3;
            --subtle: #667085;
            --text: #1d2939;
            --accent: #1d4ed8;
            --accent-soft: #3b82f6;
            --danger: #b42318;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: 'Inter', -apple-system, sans-serif;
            background: var(--base);
            color: var(--text);
            min-height: 100vh;
        }
        .container { max-width: 800px; margin: 0 auto; padding: 1.5rem; }
        .hero { text-align: center; padding: 3rem 0 2rem; }
        .hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--accent); font-weight: 800; margin-bottom: 0.75rem; }
        .hero__subtitle { color: var(--subtle); font-size: 1.1rem; max-width: 520px; margin: 0 auto; }
        .verify-form { display: flex; flex-direction: column; gap: 1.25rem; margin: 2rem 0; background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1.5rem; }
        .verify-form__field { display: flex; flex-direction: column; gap: 0.5rem; }
        .verify-form__label { font-weight: 600; color: var(--subtle); }
        .verify-form__file, .verify-form__select {
            padding: 0.75rem 1rem; border: 2px solid var(--overlay);
            border-radius: 8px; background: var(--base); color: var(--text); font-size: 1rem;
        }
        .verify-form__file:focus, .verify-form__select:focus { outline: none; border-color: var(--accent-soft); }
        .verify-form__button {
            padding: 1rem 2rem; background: var(--accent); color: var(--surface);
            border: none; border-radius: 8px; font-size: 1rem; font-weight: 600; cursor: pointer;
        }
        .verify-form__button:hover { opacity: 0.9; }
        .verify-form__button:disabled { background: var(--muted); cursor: not-allowed; }
        .loading-slot--hidden { display: none; }
        .loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
        .loading__spinner {
            width: 50px; height: 50px; border: 4px solid var(--overlay);
            border-top-color: var(--accent-soft); border-radius: 50%; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
        .error { background: #fef3f2; border: 2px solid var(--danger); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
        .error__title { color: var(--danger); font-weight: 700; margin-bottom: 0.5rem; }
        .error__message { color: #912018; }
        .error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--danger); color: var(--surface); border: none; border-radius: 4px; cursor: pointer; }
        .footer-note { text-align: center; padding: 2rem 0; color: var(--muted); font-size: 0.9rem; border-top: 1px solid var(--overlay); margin-top: 3rem; }
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>"Signature Check"</title>
                <style>{css}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_page_carries_report() {
        let verdict = Verdict::new(
            Provider::Gemini,
            "Match Status: Same Person\nConfidence Level: 91%\nReasoning: Stroke rhythm matches."
                .to_string(),
        );
        let page = render_result_page(&verdict);

        assert!(page.contains("Verification Report"));
        assert!(page.contains("Same Person"));
        assert!(page.contains("Confidence: 91%"));
        assert!(page.contains("Gemini 2.0 Flash"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("<script>bad</script>");
        assert!(!page.contains("<script>bad"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
