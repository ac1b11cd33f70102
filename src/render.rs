//! HTML for the single-page tool.

use crate::pipeline::{
    PresentationState, COMPLETION_MESSAGE, EXTRACTION_FAILED_MESSAGE, UPLOAD_SUCCESS_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
use html_escape::encode_text;
use pulldown_cmark::{html, Event, Options, Parser, Tag};

const TITLE: &str = "🏦 AI-Powered Bank & UPI Statement Analyzer";
const SUBTITLE: &str =
    "Upload your ePassbook or UPI PDF statement to get instant financial insights";

const SIDEBAR: &str = r#"
<h2>ℹ️ How to Use This Tool</h2>
<ul>
  <li>Upload your <b>Bank Statement (ePassbook)</b> or <b>UPI Statement PDF</b>.</li>
  <li>The AI will extract and analyze <b>all transactions</b> (not just UPI).</li>
  <li>You'll get insights like:
    <ul>
      <li>Income vs Expenses</li>
      <li>Spending patterns</li>
      <li>Savings rate</li>
      <li>Categories where you should cut down or can spend more</li>
    </ul>
  </li>
</ul>
<h3>🏦 How to Download Your Statement:</h3>
<p>Open your bank's mobile banking app, for example:</p>
<ul>
  <li><i>Canara Bank → Canara ai1</i></li>
  <li><i>Bank of Baroda → BOB World</i></li>
  <li><i>SBI → YONO SBI</i></li>
</ul>
<p>Download the <b>PDF Statement</b> for the period you want to analyze.</p>
"#;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; }
aside { width: 18rem; padding: 1rem; background: #f0f2f6; min-height: 100vh; }
main { flex: 1; padding: 2rem; }
h1 { text-align: center; color: #4CAF50; }
.subtitle { text-align: center; color: gray; }
.success { background: #e8f5e9; color: #1b5e20; padding: 0.75rem; border-radius: 6px; }
.error { background: #ffebee; color: #b71c1c; padding: 0.75rem; border-radius: 6px; }
.banner { background: linear-gradient(to right, #2E7D32, #1B5E20); color: white; padding: 12px; border-radius: 8px; text-align: center; font-weight: bold; }
"#;

const SAFE_URL_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Converts the model's markdown report to HTML. Raw HTML in the reply is shown as
/// text, and links or images with any other scheme than http(s) or mailto keep only
/// their text.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .filter_map(|event| match event {
            Event::Html(raw) => Some(Event::Text(raw)),
            Event::Start(Tag::Link(_, ref dest, _))
            | Event::End(Tag::Link(_, ref dest, _))
            | Event::Start(Tag::Image(_, ref dest, _))
            | Event::End(Tag::Image(_, ref dest, _))
                if !is_safe_url(dest) =>
            {
                None
            }
            other => Some(other),
        });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    SAFE_URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

pub fn render_error(message: &str) -> String {
    page(&format!(
        "{}\n<div class=\"error\">⚠️ {}</div>",
        upload_form(),
        encode_text(message)
    ))
}

pub fn render_page(state: &PresentationState) -> String {
    let body = match state {
        PresentationState::UploadPending => upload_form(),
        PresentationState::ExtractionFailed => format!(
            "{}\n{}\n<div class=\"error\">{}</div>",
            upload_form(),
            status(UPLOAD_SUCCESS_MESSAGE),
            EXTRACTION_FAILED_MESSAGE
        ),
        PresentationState::ValidationFailed => format!(
            "{}\n{}\n<div class=\"error\">{}</div>",
            upload_form(),
            status(UPLOAD_SUCCESS_MESSAGE),
            VALIDATION_FAILED_MESSAGE
        ),
        PresentationState::Success { report } => format!(
            "{}\n{}\n<h2>📊 Financial Insights Report</h2>\n<article class=\"report\">{}</article>\n<div class=\"banner\">{}</div>",
            upload_form(),
            status(UPLOAD_SUCCESS_MESSAGE),
            markdown_to_html(&report.body),
            COMPLETION_MESSAGE
        ),
    };

    page(&body)
}

fn status(message: &str) -> String {
    format!("<div class=\"success\">{}</div>", message)
}

fn upload_form() -> String {
    r#"<form method="post" action="/analyze" enctype="multipart/form-data">
  <label for="statement">📂 Upload Bank/UPI Statement PDF</label>
  <input type="file" id="statement" name="statement" accept="application/pdf,.pdf" required>
  <button type="submit">Analyze</button>
</form>"#
        .to_string()
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>📊 AI Bank Statement Analyzer</title>
<style>{style}</style>
</head>
<body>
<aside>{sidebar}</aside>
<main>
<h1>{title}</h1>
<p class="subtitle">{subtitle}</p>
{body}
</main>
</body>
</html>"#,
        style = STYLE,
        sidebar = SIDEBAR,
        title = TITLE,
        subtitle = SUBTITLE,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightsReport;
    use chrono::Utc;

    #[test]
    fn test_pending_page_has_form_only() {
        let html = render_page(&PresentationState::UploadPending);
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("How to Download Your Statement"));
        assert!(!html.contains(UPLOAD_SUCCESS_MESSAGE));
        assert!(!html.contains("Financial Insights Report"));
    }

    #[test]
    fn test_failure_pages_show_guidance() {
        let html = render_page(&PresentationState::ExtractionFailed);
        assert!(html.contains(EXTRACTION_FAILED_MESSAGE));
        assert!(!html.contains(COMPLETION_MESSAGE));

        let html = render_page(&PresentationState::ValidationFailed);
        assert!(html.contains(VALIDATION_FAILED_MESSAGE));
        assert!(!html.contains(COMPLETION_MESSAGE));
    }

    #[test]
    fn test_success_page_renders_report_markdown() {
        let report = InsightsReport {
            filename: "apr.pdf".to_string(),
            body: "**Financial Insights for apr.pdf**\n\n- **Total Income**: ₹52,000".to_string(),
            generated_at: Utc::now(),
        };
        let html = render_page(&PresentationState::Success { report });

        assert!(html.contains("<strong>Financial Insights for apr.pdf</strong>"));
        assert!(html.contains("<li><strong>Total Income</strong>: ₹52,000</li>"));
        assert!(html.contains(COMPLETION_MESSAGE));
    }

    #[test]
    fn test_raw_html_in_report_is_escaped() {
        let html = markdown_to_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_and_images_keep_only_text() {
        let html = markdown_to_html(
            "[Claim refund](javascript:alert(document.cookie)) ![chart](JavaScript:alert(1))",
        );
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("<img"));
        assert!(html.contains("Claim refund"));
        assert!(html.contains("chart"));
    }

    #[test]
    fn test_web_and_mail_links_are_kept() {
        let html = markdown_to_html("[RBI](https://rbi.org.in) or [mail](mailto:help@bank.in)");
        assert!(html.contains(r#"<a href="https://rbi.org.in">RBI</a>"#));
        assert!(html.contains(r#"<a href="mailto:help@bank.in">mail</a>"#));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let html = render_error("bad <file>");
        assert!(html.contains("bad &lt;file&gt;"));
    }
}
