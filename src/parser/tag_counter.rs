use std::collections::HashMap;

use super::tokenizer::scan_html;
use super::visitor::HtmlVisitor;

/// Counts opening tags by lowercased name.
#[derive(Debug, Default)]
pub struct TagCounter {
    counts: HashMap<String, u32>,
}

impl TagCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_counts(self) -> HashMap<String, u32> {
        self.counts
    }
}

impl HtmlVisitor for TagCounter {
    fn on_tag_open(&mut self, tag_name: &str, _offset: usize) {
        *self.counts.entry(tag_name.to_ascii_lowercase()).or_insert(0) += 1;
    }
}

/// Count opening tags in `html`, keyed by lowercased tag name.
pub fn count_elements(html: &str) -> HashMap<String, u32> {
    let mut counter = TagCounter::new();
    scan_html(html, &mut [&mut counter as &mut dyn HtmlVisitor]);
    counter.into_counts()
}

/// Read-only view over tag counts with zero for absent tags.
#[derive(Debug, Clone)]
pub struct TagCounts {
    counts: HashMap<String, u32>,
}

impl TagCounts {
    pub fn of(html: &str) -> Self {
        Self {
            counts: count_elements(html),
        }
    }

    pub fn get(&self, tag: &str) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn has(&self, tag: &str) -> bool {
        self.get(tag) > 0
    }

    /// Sum of counts over `tags`.
    pub fn sum(&self, tags: &[&str]) -> u32 {
        tags.iter().map(|t| self.get(t)).sum()
    }

    /// Total number of opening tags of any name.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_opening_tags_only() {
        let counts = count_elements("<div><p>a</p><p>b</p></div>");
        assert_eq!(counts.get("div"), Some(&1));
        assert_eq!(counts.get("p"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn names_are_lowercased() {
        let counts = count_elements("<DIV><Div class=\"x\"><div/>");
        assert_eq!(counts.get("div"), Some(&3));
    }

    #[test]
    fn attributes_do_not_double_count() {
        let counts = count_elements(r#"<a href="/" title="home" data-x="1">Home</a>"#);
        assert_eq!(counts.get("a"), Some(&1));
    }

    #[test]
    fn empty_html() {
        assert!(count_elements("").is_empty());
    }

    #[test]
    fn tag_counts_view() {
        let counts = TagCounts::of("<header></header><nav></nav><div></div><div></div>");
        assert_eq!(counts.get("div"), 2);
        assert_eq!(counts.get("main"), 0);
        assert!(counts.has("nav"));
        assert!(!counts.has("footer"));
        assert_eq!(counts.sum(&["header", "nav", "main"]), 2);
        assert_eq!(counts.total(), 4);
    }
}
