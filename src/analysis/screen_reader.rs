use std::fmt::Write as _;

use tracing::debug;

use super::clamp_score;
use crate::parser::patterns::{
    attribute_value, attribute_value_or_empty, element_at, elements, first_element, has_attribute, open_tags,
    open_tags_with_value, role_values, strip_tags, word_tags_with_value,
};
use crate::types::{AriaIssue, HeadingNode, ImageNode, LandmarkNode, ScreenReaderAnalysis, Severity};

/// Sectioning tags and the landmark type a screen reader announces for them.
const TAG_LANDMARKS: [(&str, &str); 8] = [
    ("header", "banner"),
    ("nav", "navigation"),
    ("main", "main"),
    ("aside", "complementary"),
    ("footer", "contentinfo"),
    ("section", "region"),
    ("article", "article"),
    ("form", "form"),
];

/// Explicit `role` values accepted as landmarks.
const LANDMARK_ROLES: [&str; 7] = ["banner", "navigation", "main", "complementary", "contentinfo", "region", "search"];

const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "select", "textarea"];
/// Tags where an aria-label names a region and needs no role.
const LABELLED_REGION_TAGS: [&str; 3] = ["nav", "section", "form"];

const NAME_SUGGESTION: &str = "Add text content, aria-label, or aria-labelledby";

/// `<h1>` to `<h6>` on a single line, in document order, inner markup stripped.
pub fn analyze_headings(html: &str) -> Vec<HeadingNode> {
    let bytes = html.as_bytes();
    let mut headings = Vec::new();
    let mut i = 0;

    while i + 2 < bytes.len() {
        let level = bytes[i + 2];
        if bytes[i] == b'<' && bytes[i + 1].eq_ignore_ascii_case(&b'h') && (b'1'..=b'6').contains(&level) {
            let tag = format!("h{}", level as char);
            if let Some(element) = element_at(html, i, &tag) {
                headings.push(HeadingNode {
                    level: level - b'0',
                    text: strip_tags(element.content).trim().to_string(),
                    id: attribute_value(element.attributes, "id").map(str::to_string),
                });
                i = element.end;
                continue;
            }
        }
        i += 1;
    }

    headings
}

/// Landmarks from sectioning tags (grouped by tag), then from explicit roles.
/// A tag that also carries a landmark role is reported twice.
pub fn analyze_landmarks(html: &str) -> Vec<LandmarkNode> {
    let mut landmarks: Vec<LandmarkNode> = TAG_LANDMARKS
        .iter()
        .flat_map(|(tag, kind)| {
            open_tags(html, tag).into_iter().map(move |raw| LandmarkNode {
                kind: kind.to_string(),
                role: None,
                label: attribute_value(raw.attributes, "aria-label").map(str::to_string),
            })
        })
        .collect();

    landmarks.extend(
        role_values(html)
            .into_iter()
            .filter(|role| LANDMARK_ROLES.contains(role))
            .map(|role| LandmarkNode {
                kind: role.to_string(),
                role: Some(role.to_string()),
                label: None,
            }),
    );

    landmarks
}

/// Every `<img>` with its `src` and alt text.
///
/// An image without any alt attribute reads as decorative, since its alt
/// text is empty.
pub fn analyze_images(html: &str) -> Vec<ImageNode> {
    open_tags(html, "img")
        .into_iter()
        .map(|raw| {
            let alt = attribute_value_or_empty(raw.attributes, "alt");
            let alt_text = alt.unwrap_or_default();
            ImageNode {
                src: attribute_value(raw.attributes, "src").unwrap_or_default().to_string(),
                alt: alt_text.to_string(),
                has_alt: alt.is_some(),
                is_decorative: alt_text.is_empty() || raw.attributes.contains("role=\"presentation\""),
            }
        })
        .collect()
}

fn has_accessible_name_attribute(attributes: &str) -> bool {
    has_attribute(attributes, "aria-label") || has_attribute(attributes, "aria-labelledby")
}

fn unnamed_elements(html: &str, tag: &str) -> usize {
    elements(html, tag)
        .iter()
        .filter(|element| {
            strip_tags(element.content).trim().is_empty() && !has_accessible_name_attribute(element.attributes)
        })
        .count()
}

fn aria_issue(severity: Severity, element: &str, issue: &str, suggestion: &str) -> AriaIssue {
    AriaIssue {
        severity,
        element: element.to_string(),
        issue: issue.to_string(),
        suggestion: suggestion.to_string(),
    }
}

/// ARIA misuse and missing accessible names.
pub fn validate_aria(html: &str) -> Vec<AriaIssue> {
    let mut issues = Vec::new();

    let labelled = word_tags_with_value(html, "aria-label", |_| true);
    for raw in labelled {
        let name = raw.name.to_ascii_lowercase();
        let exempt = INTERACTIVE_TAGS.contains(&name.as_str()) || LABELLED_REGION_TAGS.contains(&name.as_str());
        if !has_attribute(raw.attributes, "role") && !exempt {
            issues.push(aria_issue(
                Severity::Warning,
                &format!("<{}>", raw.name),
                "aria-label on non-interactive element without role",
                "Consider using a semantic element or adding an appropriate ARIA role",
            ));
        }
    }

    for _ in 0..unnamed_elements(html, "button") {
        issues.push(aria_issue(Severity::Error, "<button>", "Button has no accessible name", NAME_SUGGESTION));
    }

    for _ in 0..unnamed_elements(html, "a") {
        issues.push(aria_issue(Severity::Error, "<a>", "Link has no accessible name", NAME_SUGGESTION));
    }

    let visible_inputs = open_tags_with_value(html, "input", "type", |kind| {
        !kind.to_ascii_lowercase().starts_with("hidden")
    });
    for raw in visible_inputs {
        if attribute_value(raw.attributes, "id").is_none() && !has_accessible_name_attribute(raw.attributes) {
            issues.push(aria_issue(
                Severity::Error,
                "<input>",
                "Input has no associated label",
                "Add an id and associate with a <label>, or use aria-label",
            ));
        }
    }

    if html.contains("role=\"button\"") && html.contains("<button") {
        issues.push(aria_issue(
            Severity::Info,
            "<button role=\"button\">",
            "Redundant ARIA role",
            "Remove role=\"button\" from <button> elements (already implied)",
        ));
    }

    issues
}

/// Plain-text rendering of what a screen reader announces: title,
/// landmarks, heading outline, then images that carry meaning.
pub fn generate_screen_reader_text(
    html: &str,
    landmarks: &[LandmarkNode],
    headings: &[HeadingNode],
    images: &[ImageNode],
) -> String {
    let mut text = String::new();

    // Writing to a String cannot fail.
    if let Some(title) = first_element(html, "title") {
        let _ = write!(text, "Page title: \"{}\"\n\n", title.content);
    }

    if !landmarks.is_empty() {
        text.push_str("Landmarks:\n");
        for (idx, landmark) in landmarks.iter().enumerate() {
            let label = landmark
                .label
                .as_deref()
                .map(|label| format!(" \"{}\"", label))
                .unwrap_or_default();
            let _ = writeln!(text, "  {}. {}{}", idx + 1, landmark.kind, label);
        }
        text.push('\n');
    }

    if !headings.is_empty() {
        text.push_str("Heading Structure:\n");
        for heading in headings {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
            let _ = writeln!(text, "{}H{}: \"{}\"", indent, heading.level, heading.text);
        }
        text.push('\n');
    }

    let meaningful: Vec<&ImageNode> = images.iter().filter(|img| !img.is_decorative).collect();
    if !meaningful.is_empty() {
        text.push_str("Images:\n");
        for (idx, img) in meaningful.iter().enumerate() {
            let alt = if img.alt.is_empty() { "[No alt text]" } else { img.alt.as_str() };
            let _ = writeln!(text, "  {}. {}", idx + 1, alt);
        }
        text.push('\n');
    }

    text
}

fn heading_skips(headings: &[HeadingNode]) -> usize {
    headings
        .windows(2)
        .filter(|pair| i32::from(pair[1].level) - i32::from(pair[0].level) > 1)
        .count()
}

fn images_missing_alt(images: &[ImageNode]) -> usize {
    images.iter().filter(|img| !img.has_alt && !img.is_decorative).count()
}

fn count_severity(issues: &[AriaIssue], severity: Severity) -> usize {
    issues.iter().filter(|issue| issue.severity == severity).count()
}

/// Screen reader friendliness in 0-100.
pub fn calculate_score(
    headings: &[HeadingNode],
    landmarks: &[LandmarkNode],
    images: &[ImageNode],
    aria_issues: &[AriaIssue],
) -> f64 {
    let mut score = 100.0;

    if headings.is_empty() {
        score -= 20.0;
    } else {
        if !headings.iter().any(|h| h.level == 1) {
            score -= 10.0;
        }
        score -= 5.0 * heading_skips(headings) as f64;
    }

    if landmarks.is_empty() {
        score -= 20.0;
    } else if !landmarks.iter().any(|l| l.kind == "main") {
        score -= 10.0;
    }

    score -= 5.0 * images_missing_alt(images) as f64;
    score -= 10.0 * count_severity(aria_issues, Severity::Error) as f64;
    score -= 5.0 * count_severity(aria_issues, Severity::Warning) as f64;

    clamp_score(score)
}

fn generate_recommendations(
    score: f64,
    headings: &[HeadingNode],
    landmarks: &[LandmarkNode],
    images: &[ImageNode],
    aria_issues: &[AriaIssue],
) -> Vec<String> {
    if score == 100.0 {
        return vec!["Excellent! Your HTML is well-structured for screen readers.".to_string()];
    }

    let mut recommendations = Vec::new();

    if headings.is_empty() {
        recommendations.push("Add heading elements (h1-h6) to structure your content".to_string());
    } else {
        if !headings.iter().any(|h| h.level == 1) {
            recommendations.push("Add an h1 element - every page should have exactly one".to_string());
        }
        if heading_skips(headings) > 0 {
            recommendations.push("Avoid skipping heading levels (e.g., h2 to h4)".to_string());
        }
    }

    if landmarks.is_empty() {
        recommendations.push("Add landmark regions (header, nav, main, footer) for better navigation".to_string());
    } else if !landmarks.iter().any(|l| l.kind == "main") {
        recommendations.push("Add a <main> element to identify the main content".to_string());
    }

    let missing_alt = images_missing_alt(images);
    if missing_alt > 0 {
        recommendations.push(format!("{} image(s) missing alt text - add descriptive alternatives", missing_alt));
    }

    let errors = count_severity(aria_issues, Severity::Error);
    if errors > 0 {
        recommendations.push(format!("Fix {} critical ARIA issue(s) - check the issues panel", errors));
    }

    if recommendations.is_empty() {
        recommendations.push("Great job! Just a few minor improvements needed.".to_string());
    }

    recommendations
}

/// Full screen reader analysis of an HTML document.
pub fn analyze_for_screen_reader(html: &str) -> ScreenReaderAnalysis {
    let headings = analyze_headings(html);
    let landmarks = analyze_landmarks(html);
    let images = analyze_images(html);
    let aria_issues = validate_aria(html);
    let screen_reader_text = generate_screen_reader_text(html, &landmarks, &headings, &images);

    let score = calculate_score(&headings, &landmarks, &images, &aria_issues);
    let recommendations = generate_recommendations(score, &headings, &landmarks, &images, &aria_issues);

    debug!(
        score,
        headings = headings.len(),
        landmarks = landmarks.len(),
        images = images.len(),
        aria_issues = aria_issues.len(),
        "screen reader analysis complete"
    );

    ScreenReaderAnalysis {
        headings,
        landmarks,
        images,
        aria_issues,
        screen_reader_text,
        score,
        recommendations,
    }
}
