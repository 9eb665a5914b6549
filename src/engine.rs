use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::analysis::screen_reader::analyze_for_screen_reader;
use crate::analysis::semantic::analyze_semantic_html;
use crate::types::{DocumentReport, HtmlDocument};

/// Run the semantic and screen-reader analyzers over many documents in parallel.
///
/// Each document is analyzed independently on Rayon's pool; the reports come
/// back in input order.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn audit_documents(documents: &[HtmlDocument]) -> Vec<DocumentReport> {
    let reports: Vec<DocumentReport> = documents
        .par_iter()
        .map(|document| DocumentReport {
            name: document.name.clone(),
            semantic: analyze_semantic_html(&document.html),
            screen_reader: analyze_for_screen_reader(&document.html),
        })
        .collect();

    debug!(reports = reports.len(), "batch audit finished");
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, html: &str) -> HtmlDocument {
        HtmlDocument {
            name: name.to_string(),
            html: html.to_string(),
        }
    }

    #[test]
    fn single_document() {
        let reports = audit_documents(&[doc("index.html", "<main><h1>Hi</h1></main>")]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "index.html");
        assert_eq!(reports[0].screen_reader.headings.len(), 1);
        assert_eq!(reports[0].screen_reader.landmarks.len(), 1);
    }

    #[test]
    fn matches_sequential_analysis() {
        let html = r#"<div class="nav"><div onclick="go()">Go</div></div><img src="a.png">"#;
        let reports = audit_documents(&[doc("soup.html", html)]);
        assert_eq!(reports[0].semantic, analyze_semantic_html(html));
        assert_eq!(reports[0].screen_reader, analyze_for_screen_reader(html));
    }

    #[test]
    fn empty_document() {
        let reports = audit_documents(&[doc("empty.html", "")]);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].screen_reader.headings.is_empty());
        assert!(reports[0].semantic.elements.iter().all(|e| e.count == 0));
    }

    #[test]
    fn no_documents() {
        assert!(audit_documents(&[]).is_empty());
    }

    #[test]
    fn many_documents_keep_input_order() {
        let documents: Vec<HtmlDocument> = (0..64)
            .map(|i| {
                let headings = "<h2>Section</h2>".repeat(i % 5);
                doc(&format!("page_{}.html", i), &format!("<main><h1>Page {}</h1>{}</main>", i, headings))
            })
            .collect();
        let reports = audit_documents(&documents);
        assert_eq!(reports.len(), 64);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.name, format!("page_{}.html", i));
            assert_eq!(report.screen_reader.headings.len(), 1 + i % 5, "{}", report.name);
            assert_eq!(report.screen_reader.headings[0].text, format!("Page {}", i));
        }
    }
}
