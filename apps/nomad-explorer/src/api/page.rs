//! # HTML Page
//!
//! Renders a [`Report`] as the explorer page: header, input form, then the
//! entry fields, warning or error.

use nomad_core::primitives::INPUT_LABEL;
use nomad_core::render::LABEL_BAND_GAP;
use nomad_core::{BandGapLine, Report, ReportBody};
use std::fmt::Write as _;

const STYLE: &str = r#"
      body { max-width: 720px; margin: 2rem auto; padding: 0 1rem; font-family: "Segoe UI", sans-serif; color: #1c1f24; }
      form { display: flex; gap: 0.5rem; margin: 1rem 0 1.5rem; }
      label { display: block; font-size: 0.9rem; color: #4a525c; margin-bottom: 0.25rem; }
      input[type="text"] { flex: 1; padding: 0.4rem 0.6rem; border: 1px solid #c3cad3; border-radius: 6px; }
      button { padding: 0.4rem 0.9rem; border: 1px solid #3c6a9e; background: #eaf2fb; border-radius: 6px; cursor: pointer; }
      ul.fields { list-style: none; padding: 0; }
      ul.fields li { margin: 0.3rem 0; }
      code { background: #f2f4f7; padding: 0.1rem 0.35rem; border-radius: 4px; }
      .warning { background: #fff6dd; border: 1px solid #e6c55c; padding: 0.6rem 0.8rem; border-radius: 6px; }
      .error { background: #fde8e8; border: 1px solid #e08a8a; padding: 0.6rem 0.8rem; border-radius: 6px; }
"#;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full HTML document for `report`, with `material` prefilled in the form.
pub fn render_page(material: &str, report: &Report) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>🔬 {title}</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <h1>🔬 {title}</h1>
    <p>{caption}</p>
    <form method="get" action="/">
      <div style="flex: 1;">
        <label for="material">{label}</label>
        <input id="material" name="material" type="text" value="{material}" autofocus />
      </div>
      <button type="submit">Search</button>
    </form>
"#,
        title = escape_html(&report.title),
        caption = escape_html(&report.caption),
        label = escape_html(INPUT_LABEL),
        material = escape_html(material),
    );

    match &report.body {
        ReportBody::Idle => {}
        ReportBody::Entry(entry) => {
            let _ = writeln!(html, "    <h2>🔍 {}</h2>", escape_html(&entry.subheader));
            let _ = writeln!(html, r#"    <ul class="fields">"#);
            for field in &entry.fields {
                let _ = writeln!(
                    html,
                    "      <li><strong>{}:</strong> <code>{}</code></li>",
                    escape_html(&field.label),
                    escape_html(&field.value)
                );
            }
            if let BandGapLine::Value(value) = &entry.band_gap {
                let _ = writeln!(
                    html,
                    "      <li><strong>{}:</strong> <code>{}</code></li>",
                    LABEL_BAND_GAP,
                    escape_html(value)
                );
            }
            let _ = writeln!(html, "    </ul>");
            if let BandGapLine::Unavailable(warning) = &entry.band_gap {
                let _ = writeln!(
                    html,
                    r#"    <div class="warning">⚠️ {}</div>"#,
                    escape_html(warning)
                );
            }
        }
        ReportBody::Warning(warning) => {
            let _ = writeln!(
                html,
                r#"    <div class="warning">⚠️ {}</div>"#,
                escape_html(warning)
            );
        }
        ReportBody::Error(message) => {
            let _ = writeln!(
                html,
                r#"    <div class="error">❌ Error: {}</div>"#,
                escape_html(message)
            );
        }
    }

    html.push_str("  </body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomad_core::{BandGap, Entry, LookupOutcome, MissReason};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">&'x'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;x&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("CrTe2"), "CrTe2");
    }

    #[test]
    fn test_idle_page_has_form_only() {
        let html = render_page("", &Report::idle());
        assert!(html.contains(r#"name="material""#));
        assert!(html.contains("NOMAD Material Explorer"));
        assert!(!html.contains("class=\"warning\""));
        assert!(!html.contains("class=\"fields\""));
    }

    #[test]
    fn test_found_page() {
        let entry = Entry {
            formula: Some("Li".to_string()),
            entry_id: Some("E1".to_string()),
            ..Entry::default()
        };
        let report = Report::from_outcome(&LookupOutcome::Found {
            entry,
            band_gap: Some(BandGap::new(0.0)),
        });
        let html = render_page("Li", &report);

        assert!(html.contains(r#"value="Li""#));
        assert!(html.contains("NOMAD Entry Found: Li"));
        assert!(html.contains("<strong>Entry ID:</strong> <code>E1</code>"));
        assert!(html.contains("<strong>DFT Code:</strong> <code>N/A</code>"));
        assert!(html.contains("<strong>Band Gap:</strong> <code>0.000 eV</code>"));
    }

    #[test]
    fn test_warning_page() {
        let report = Report::from_outcome(&LookupOutcome::NotFound {
            reason: MissReason::NoMatches,
        });
        let html = render_page("Og", &report);
        assert!(html.contains("No results found for the entered formula."));
        assert!(!html.contains("class=\"fields\""));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let html = render_page(
            "<script>",
            &Report::from_outcome(&LookupOutcome::errored("bad <input>")),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Error: bad &lt;input&gt;"));
    }
}
