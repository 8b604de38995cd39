use leptos::prelude::*;
use sigcheck_app::domain::Verdict;

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

#[component]
pub fn VerdictDisplay(verdict: Verdict) -> impl IntoView {
    let summary = verdict.summary();
    let html_content = markdown_to_html(&verdict.report_text);

    view! {
        <div class="report">
            <h2 class="report__title">"Verification Report"</h2>
            {summary.match_status.map(|status| view! {
                <p class="report__status">{status}</p>
            })}
            {summary.confidence.map(|confidence| view! {
                <p class="report__confidence">"Confidence: " {confidence}</p>
            })}
            <div class="report__content" inner_html=html_content></div>
            <p class="report__meta">"Model: " {verdict.provider.display_name()}</p>
            <div class="report__actions">
                <a href="/" class="report__button report__button--primary">
                    "Verify Another Pair"
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_headings() {
        let html = markdown_to_html("# Findings\nThe strokes match.\n\n## Detail");
        assert_eq!(
            html,
            "<h3>Findings</h3><p>The strokes match.</p><h4>Detail</h4>"
        );
    }

    #[test]
    fn test_bold_and_list_items() {
        let html = markdown_to_html("- **Match Status:** Same Person");
        assert_eq!(
            html,
            "<li><strong>Match Status:</strong> Same Person</li>"
        );
    }

    #[test]
    fn test_unbalanced_marker_is_closed() {
        let html = markdown_to_html("A **dangling marker");
        assert_eq!(html, "<p>A <strong>dangling marker</strong></p>");
    }

    #[test]
    fn test_html_is_escaped() {
        let html = markdown_to_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
