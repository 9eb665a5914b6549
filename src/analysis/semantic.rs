use tracing::debug;

use super::{clamp_score, format_fixed};
use crate::parser::patterns::{count_open_tag_runs, open_tags_where};
use crate::parser::TagCounts;
use crate::types::{
    DivSoupIssue, DivSoupKind, ElementStatus, SemanticAnalysis, SemanticElement, SemanticSuggestion, Severity,
};

/// Tags counted as semantic structure for scoring and the div ratio.
pub const SEMANTIC_LANDMARKS: [&str; 7] = ["header", "nav", "main", "article", "section", "aside", "footer"];

/// Inventory of semantic tags, in report order, with what each one provides.
const SEMANTIC_TAGS: [(&str, &str); 11] = [
    ("header", "Defines page/section header"),
    ("nav", "Defines navigation section"),
    ("main", "Defines main content"),
    ("article", "Defines independent content"),
    ("section", "Defines thematic grouping"),
    ("aside", "Defines complementary content"),
    ("footer", "Defines page/section footer"),
    ("figure", "Defines self-contained content"),
    ("figcaption", "Defines figure caption"),
    ("time", "Defines date/time"),
    ("mark", "Defines highlighted text"),
];

const EXCESSIVE_DIV_COUNT: u32 = 20;
const EXCESSIVE_DIV_SHARE: f64 = 0.4;
const MISSING_SEMANTIC_DIV_COUNT: u32 = 5;
const NESTING_DEPTH: usize = 4;
const NESTING_RUNS_ALLOWED: usize = 3;
const CLICK_HANDLERS: [&str; 3] = ["onclick", "@click", "ng-click"];

const HIGH_DIV_RATIO: f64 = 5.0;

struct SuggestionRule {
    /// Evaluated on the lowercased document.
    applies: fn(&str) -> bool,
    from: &'static str,
    to: &'static str,
    reason: &'static str,
    example: &'static str,
}

const SUGGESTIONS: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |html| !html.contains("<header") && (html.contains("class=\"header\"") || html.contains("id=\"header\"")),
        from: "<div class=\"header\">",
        to: "<header>",
        reason: "Define page header for better structure",
        example: "<header>\n  <h1>Site Title</h1>\n  <nav>...</nav>\n</header>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<nav") && (html.contains("class=\"nav\"") || html.contains("class=\"menu\"")),
        from: "<div class=\"nav\">",
        to: "<nav>",
        reason: "Identify navigation sections",
        example: "<nav aria-label=\"Main navigation\">\n  <ul>\n    <li><a href=\"/\">Home</a></li>\n  </ul>\n</nav>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<main"),
        from: "<div class=\"content\">",
        to: "<main>",
        reason: "Identify the primary content of the page",
        example: "<main>\n  <h1>Page Title</h1>\n  <p>Main content...</p>\n</main>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<footer") && (html.contains("class=\"footer\"") || html.contains("id=\"footer\"")),
        from: "<div class=\"footer\">",
        to: "<footer>",
        reason: "Define page footer",
        example: "<footer>\n  <p>&copy; 2024 Company</p>\n</footer>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<article") && (html.contains("class=\"post\"") || html.contains("class=\"article\"")),
        from: "<div class=\"post\">",
        to: "<article>",
        reason: "Wrap independent, self-contained content",
        example: "<article>\n  <h2>Article Title</h2>\n  <p>Content...</p>\n</article>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<section") && html.contains("class=\"section\""),
        from: "<div class=\"section\">",
        to: "<section>",
        reason: "Group thematically related content",
        example: "<section>\n  <h2>Section Heading</h2>\n  <p>Related content...</p>\n</section>",
    },
    SuggestionRule {
        applies: |html| !html.contains("<aside") && (html.contains("class=\"sidebar\"") || html.contains("class=\"aside\"")),
        from: "<div class=\"sidebar\">",
        to: "<aside>",
        reason: "Mark complementary content",
        example: "<aside>\n  <h3>Related Links</h3>\n  <ul>...</ul>\n</aside>",
    },
    SuggestionRule {
        applies: |html| html.contains("<div") && (html.contains("onclick=") || html.contains("role=\"button\"")),
        from: "<div onclick=\"...\">",
        to: "<button>",
        reason: "Use button for interactive elements",
        example: "<button type=\"button\" onclick=\"handleClick()\">\n  Click Me\n</button>",
    },
];

/// Inventory rows for the semantic tags present, then warnings for a
/// missing `<main>` and for missing `<header>`/`<nav>`.
pub fn analyze_semantic_elements(counts: &TagCounts) -> Vec<SemanticElement> {
    let mut elements: Vec<SemanticElement> = SEMANTIC_TAGS
        .iter()
        .filter(|(tag, _)| counts.has(tag))
        .map(|(tag, provides)| {
            let count = counts.get(tag);
            SemanticElement {
                tag: tag.to_string(),
                count,
                status: ElementStatus::Good,
                message: format!("{} {} element(s) - {}", count, tag, provides),
            }
        })
        .collect();

    if !counts.has("main") {
        elements.push(SemanticElement {
            tag: "main".to_string(),
            count: 0,
            status: ElementStatus::Warning,
            message: "No <main> element found - should identify primary content".to_string(),
        });
    }

    if !counts.has("header") && !counts.has("nav") {
        elements.push(SemanticElement {
            tag: "header/nav".to_string(),
            count: 0,
            status: ElementStatus::Warning,
            message: "No <header> or <nav> elements found - consider adding for navigation".to_string(),
        });
    }

    elements
}

/// Detect div soup. Each check contributes at most one issue.
pub fn detect_div_soup(html: &str, counts: &TagCounts) -> Vec<DivSoupIssue> {
    let mut issues = Vec::new();

    let divs = counts.get("div");
    let total = counts.total();
    let semantic = counts.sum(&SEMANTIC_LANDMARKS);
    let div_share = divs as f64 / total as f64;

    if divs > EXCESSIVE_DIV_COUNT && div_share > EXCESSIVE_DIV_SHARE {
        issues.push(DivSoupIssue {
            kind: DivSoupKind::ExcessiveDivs,
            severity: Severity::Warning,
            element: "<div>".to_string(),
            issue: format!(
                "Excessive div usage: {} divs ({}% of all tags)",
                divs,
                format_fixed(div_share * 100.0, 1)
            ),
            suggestion: "Replace generic divs with semantic elements where appropriate".to_string(),
            count: Some(divs),
        });
    }

    let clickable = open_tags_where(html, "div", |attrs| {
        let attrs = attrs.to_ascii_lowercase();
        CLICK_HANDLERS.iter().any(|handler| attrs.contains(handler))
    })
    .len() as u32;
    if clickable > 0 {
        issues.push(DivSoupIssue {
            kind: DivSoupKind::DivButton,
            severity: Severity::Error,
            element: "<div onclick=\"...\">".to_string(),
            issue: format!("{} clickable div(s) found", clickable),
            suggestion: "Use <button> or <a> for interactive elements".to_string(),
            count: Some(clickable),
        });
    }

    if semantic == 0 && divs > MISSING_SEMANTIC_DIV_COUNT {
        issues.push(DivSoupIssue {
            kind: DivSoupKind::MissingSemantic,
            severity: Severity::Warning,
            element: "Document structure".to_string(),
            issue: "No semantic HTML5 elements found, only generic divs".to_string(),
            suggestion: "Use header, nav, main, section, article, aside, footer".to_string(),
            count: None,
        });
    }

    let nested_runs = count_open_tag_runs(html, "div", NESTING_DEPTH);
    if nested_runs > NESTING_RUNS_ALLOWED {
        issues.push(DivSoupIssue {
            kind: DivSoupKind::ExcessiveDivs,
            severity: Severity::Info,
            element: "Nested divs".to_string(),
            issue: "Deep div nesting detected (4+ levels)".to_string(),
            suggestion: "Simplify structure or use semantic elements to reduce nesting".to_string(),
            count: Some(nested_runs as u32),
        });
    }

    issues
}

/// Before/after hints, at most one per rule.
pub fn generate_semantic_suggestions(html: &str) -> Vec<SemanticSuggestion> {
    let lower = html.to_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|rule| (rule.applies)(&lower))
        .map(|rule| SemanticSuggestion {
            from: rule.from.to_string(),
            to: rule.to.to_string(),
            reason: rule.reason.to_string(),
            example: rule.example.to_string(),
        })
        .collect()
}

fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Error => 15.0,
        Severity::Warning => 10.0,
        Severity::Info => 5.0,
    }
}

/// Structure score in 0-100.
pub fn calculate_semantic_score(counts: &TagCounts, issues: &[DivSoupIssue]) -> f64 {
    let divs = counts.get("div");
    let semantic = counts.sum(&SEMANTIC_LANDMARKS);
    let mut score = 100.0;

    if !counts.has("main") {
        score -= 15.0;
    }
    if !counts.has("header") && !counts.has("nav") {
        score -= 10.0;
    }

    score -= issues.iter().map(|issue| severity_penalty(issue.severity)).sum::<f64>();

    if semantic > 0 {
        score += (semantic as f64 * 3.0).min(20.0);
    }
    if divs > 0 && semantic > 0 && divs as f64 / semantic as f64 > HIGH_DIV_RATIO {
        score -= 10.0;
    }

    clamp_score(score)
}

/// Divs per semantic landmark: infinite with divs but no landmarks, zero with neither.
pub fn div_to_semantic_ratio(counts: &TagCounts) -> f64 {
    let divs = counts.get("div");
    let semantic = counts.sum(&SEMANTIC_LANDMARKS);

    if semantic == 0 {
        return if divs > 0 { f64::INFINITY } else { 0.0 };
    }
    divs as f64 / semantic as f64
}

fn generate_recommendations(
    score: f64,
    issues: &[DivSoupIssue],
    suggestions: &[SemanticSuggestion],
    ratio: f64,
) -> Vec<String> {
    if score == 100.0 {
        return vec!["Excellent! Your HTML structure is highly semantic.".to_string()];
    }

    let mut recommendations = Vec::new();

    if issues.iter().any(|issue| issue.severity == Severity::Error) {
        recommendations.push("Replace clickable divs with proper button or link elements".to_string());
    }

    if ratio == f64::INFINITY {
        recommendations.push("Add semantic HTML5 elements - currently only using generic divs".to_string());
    } else if ratio > HIGH_DIV_RATIO {
        recommendations.push("High div-to-semantic ratio - replace more divs with semantic elements".to_string());
    }

    if suggestions.iter().any(|s| s.to == "<main>") {
        recommendations.push("Add a <main> element to identify the primary content".to_string());
    }
    if suggestions.iter().any(|s| s.to == "<nav>") {
        recommendations.push("Use <nav> elements for navigation sections".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Good semantic structure! Consider the suggestions for further improvements".to_string());
    }

    recommendations
}

/// Full semantic structure analysis of an HTML document.
pub fn analyze_semantic_html(html: &str) -> SemanticAnalysis {
    let counts = TagCounts::of(html);

    let elements = analyze_semantic_elements(&counts);
    let div_soup_issues = detect_div_soup(html, &counts);
    let suggestions = generate_semantic_suggestions(html);
    let semantic_score = calculate_semantic_score(&counts, &div_soup_issues);
    let div_to_semantic_ratio = div_to_semantic_ratio(&counts);
    let recommendations =
        generate_recommendations(semantic_score, &div_soup_issues, &suggestions, div_to_semantic_ratio);

    debug!(
        score = semantic_score,
        ratio = div_to_semantic_ratio,
        issues = div_soup_issues.len(),
        suggestions = suggestions.len(),
        "semantic structure analyzed"
    );

    SemanticAnalysis {
        elements,
        div_soup_issues,
        suggestions,
        semantic_score,
        div_to_semantic_ratio,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIV_SOUP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Example Page</title>
</head>
<body>
  <div class="header">
    <div class="logo">My Website</div>
    <div class="nav">
      <a href="/">Home</a>
      <a href="/about">About</a>
    </div>
  </div>

  <div class="content">
    <div class="post">
      <h1>Article Title</h1>
      <p>This is an example using divs instead of semantic elements.</p>
      <div onclick="like()">Like This</div>
    </div>

    <div class="sidebar">
      <h2>Related</h2>
      <ul>
        <li>Link 1</li>
        <li>Link 2</li>
      </ul>
    </div>
  </div>

  <div class="footer">
    <p>&copy; 2024 My Website</p>
  </div>
</body>
</html>"#;

    const SEMANTIC_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Semantic Example</title>
</head>
<body>
  <header>
    <div class="logo">My Website</div>
    <nav aria-label="Main navigation">
      <a href="/">Home</a>
      <a href="/about">About</a>
    </nav>
  </header>

  <main>
    <article>
      <h1>Article Title</h1>
      <p>This example uses proper semantic HTML5 elements.</p>
      <button type="button" onclick="like()">Like This</button>
    </article>

    <aside>
      <h2>Related</h2>
      <ul>
        <li>Link 1</li>
        <li>Link 2</li>
      </ul>
    </aside>
  </main>

  <footer>
    <p>&copy; 2024 My Website</p>
  </footer>
</body>
</html>"#;

    #[test]
    fn div_soup_sample() {
        let analysis = analyze_semantic_html(DIV_SOUP_HTML);

        let kinds: Vec<_> = analysis.div_soup_issues.iter().map(|i| (i.kind, i.severity)).collect();
        assert_eq!(
            kinds,
            vec![
                (DivSoupKind::DivButton, Severity::Error),
                (DivSoupKind::MissingSemantic, Severity::Warning),
            ]
        );
        assert_eq!(analysis.div_soup_issues[0].issue, "1 clickable div(s) found");
        assert_eq!(analysis.div_soup_issues[0].count, Some(1));
        assert_eq!(analysis.div_soup_issues[1].count, None);

        let rows: Vec<_> = analysis.elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(rows, vec!["main", "header/nav"]);

        let targets: Vec<_> = analysis.suggestions.iter().map(|s| s.to.as_str()).collect();
        assert_eq!(
            targets,
            vec!["<header>", "<nav>", "<main>", "<footer>", "<article>", "<aside>", "<button>"]
        );

        assert_eq!(analysis.semantic_score, 50.0);
        assert_eq!(analysis.div_to_semantic_ratio, f64::INFINITY);
        assert_eq!(
            analysis.recommendations,
            vec![
                "Replace clickable divs with proper button or link elements",
                "Add semantic HTML5 elements - currently only using generic divs",
                "Add a <main> element to identify the primary content",
                "Use <nav> elements for navigation sections",
            ]
        );
    }

    #[test]
    fn semantic_sample() {
        let analysis = analyze_semantic_html(SEMANTIC_HTML);

        assert!(analysis.div_soup_issues.is_empty());
        assert_eq!(analysis.semantic_score, 100.0);
        assert_eq!(
            analysis.recommendations,
            vec!["Excellent! Your HTML structure is highly semantic."]
        );
        assert!((analysis.div_to_semantic_ratio - 1.0 / 6.0).abs() < 1e-12);

        let rows: Vec<_> = analysis.elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(rows, vec!["header", "nav", "main", "article", "aside", "footer"]);
        assert_eq!(analysis.elements[0].message, "1 header element(s) - Defines page/section header");
        assert!(analysis.elements.iter().all(|e| e.status == ElementStatus::Good));

        // onclick on the button still trips the text-level hint.
        let targets: Vec<_> = analysis.suggestions.iter().map(|s| s.to.as_str()).collect();
        assert_eq!(targets, vec!["<button>"]);
    }

    #[test]
    fn semantic_sample_beats_div_soup() {
        let good = analyze_semantic_html(SEMANTIC_HTML);
        let bad = analyze_semantic_html(DIV_SOUP_HTML);
        assert!(good.semantic_score > bad.semantic_score);
        assert!(good.div_soup_issues.len() < bad.div_soup_issues.len());
        assert!(bad.div_soup_issues.iter().any(|i| i.severity == Severity::Error));
    }

    #[test]
    fn ratio_edge_cases() {
        assert_eq!(div_to_semantic_ratio(&TagCounts::of("<div></div>")), f64::INFINITY);
        assert_eq!(div_to_semantic_ratio(&TagCounts::of("<p>text</p>")), 0.0);
        assert_eq!(div_to_semantic_ratio(&TagCounts::of("<main><div><div></div></div></main>")), 2.0);
    }

    #[test]
    fn empty_document() {
        let analysis = analyze_semantic_html("");
        assert!(analysis.div_soup_issues.is_empty());
        assert_eq!(analysis.div_to_semantic_ratio, 0.0);
        assert_eq!(analysis.semantic_score, 75.0);
        assert_eq!(analysis.elements.len(), 2);
        assert_eq!(
            analysis.recommendations,
            vec!["Add a <main> element to identify the primary content"]
        );
    }

    #[test]
    fn excessive_divs_reported_with_share() {
        let html = "<div></div>".repeat(21) + "<p></p>";
        let issues = detect_div_soup(&html, &TagCounts::of(&html));
        let excessive = &issues[0];
        assert_eq!(excessive.kind, DivSoupKind::ExcessiveDivs);
        assert_eq!(excessive.issue, "Excessive div usage: 21 divs (95.5% of all tags)");
        assert_eq!(excessive.count, Some(21));
    }

    #[test]
    fn clickable_div_variants() {
        let html = r#"<div @click="a"></div><div NG-CLICK="b"></div><div onClick="c"></div><span onclick="d">"#;
        let issues = detect_div_soup(html, &TagCounts::of(html));
        assert_eq!(issues[0].kind, DivSoupKind::DivButton);
        assert_eq!(issues[0].count, Some(3));
    }

    #[test]
    fn deep_nesting_needs_more_than_three_runs() {
        let chain = "<div><div><div><div>x</div></div></div></div>";
        let three = chain.repeat(3);
        let four = chain.repeat(4);
        let nesting = |html: &str| {
            detect_div_soup(html, &TagCounts::of(html))
                .into_iter()
                .find(|i| i.severity == Severity::Info)
        };
        assert!(nesting(&three).is_none());
        let issue = nesting(&four).unwrap();
        assert_eq!(issue.kind, DivSoupKind::ExcessiveDivs);
        assert_eq!(issue.count, Some(4));
    }

    #[test]
    fn high_ratio_penalty_and_recommendation() {
        let html = format!("<main>{}</main>", "<div></div>".repeat(6));
        let analysis = analyze_semantic_html(&html);
        // 100 - 10 (no header/nav) + 3 (one landmark) - 10 (ratio 6)
        assert_eq!(analysis.semantic_score, 83.0);
        assert_eq!(analysis.div_to_semantic_ratio, 6.0);
        assert_eq!(
            analysis.recommendations,
            vec!["High div-to-semantic ratio - replace more divs with semantic elements"]
        );
    }

    #[test]
    fn score_is_clamped() {
        let html = "<div onclick=\"x\"></div>".repeat(30);
        let analysis = analyze_semantic_html(&html);
        assert!(analysis.semantic_score >= 0.0);
        let landmarks = "<header></header><nav></nav><main></main><article></article><section></section>";
        assert_eq!(analyze_semantic_html(landmarks).semantic_score, 100.0);
    }

    #[test]
    fn issue_serializes_type_field() {
        let issue = DivSoupIssue {
            kind: DivSoupKind::MissingSemantic,
            severity: Severity::Warning,
            element: "Document structure".to_string(),
            issue: String::new(),
            suggestion: String::new(),
            count: None,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "missing-semantic");
        assert_eq!(json["severity"], "warning");
        assert!(json.get("count").is_none());
    }
}
