use tracing::debug;

use super::{clamp_score, format_fixed, format_number};
use crate::types::{SpacingIssue, Status, TargetInput, TouchSummary, TouchTarget, TouchTargetAnalysis};

/// WCAG 2.5.5 minimum target size, in CSS pixels.
pub const MIN_TARGET_SIZE: f64 = 44.0;
/// Recommended target size (Material Design 48dp).
pub const RECOMMENDED_SIZE: f64 = 48.0;
/// Minimum gap between neighbouring targets.
pub const MIN_SPACING: f64 = 8.0;
/// Pairs further apart than this are not reported.
const SPACING_REPORT_LIMIT: f64 = 50.0;

/// `f64::min` and `f64::max` ignore a NaN operand; geometry here keeps it.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Classify one target by its smaller side. A NaN side fails no threshold.
pub fn analyze_touch_target(input: &TargetInput) -> TouchTarget {
    let min_dimension = nan_min(input.width, input.height);
    let size = format!("{}×{}px", format_number(input.width), format_number(input.height));
    let min = format_number(MIN_TARGET_SIZE);
    let recommended = format_number(RECOMMENDED_SIZE);

    let (status, message) = if min_dimension < MIN_TARGET_SIZE {
        (Status::Fail, format!("Too small: {}. Minimum is {}×{}px", size, min, min))
    } else if min_dimension < RECOMMENDED_SIZE {
        (
            Status::Warning,
            format!("Below recommended: {}. Recommended is {}×{}px", size, recommended, recommended),
        )
    } else {
        (Status::Pass, format!("Good size: {}", size))
    };

    TouchTarget {
        id: input.id.clone(),
        element: input.element.clone(),
        width: input.width,
        height: input.height,
        x: input.x,
        y: input.y,
        area: input.width * input.height,
        status,
        message,
    }
}

/// Edge-to-edge distance; zero when the rectangles touch or overlap, NaN
/// when any coordinate is NaN.
pub fn calculate_distance(a: &TouchTarget, b: &TouchTarget) -> f64 {
    let horizontal = nan_max(nan_max(a.x, b.x) - nan_min(a.x + a.width, b.x + b.width), 0.0);
    let vertical = nan_max(nan_max(a.y, b.y) - nan_min(a.y + a.height, b.y + b.height), 0.0);

    if horizontal == 0.0 && vertical == 0.0 {
        return 0.0;
    }
    (horizontal * horizontal + vertical * vertical).sqrt()
}

/// Classify every pair closer than the reporting limit.
pub fn analyze_spacing(targets: &[TouchTarget]) -> Vec<SpacingIssue> {
    let mut issues = Vec::new();

    for (i, first) in targets.iter().enumerate() {
        for second in &targets[i + 1..] {
            let distance = calculate_distance(first, second);
            if distance >= SPACING_REPORT_LIMIT || distance.is_nan() {
                continue;
            }

            let apart = format_fixed(distance, 1);
            let (status, message) = if distance < MIN_SPACING {
                (
                    Status::Fail,
                    format!("Too close: {}px apart. Minimum is {}px", apart, format_number(MIN_SPACING)),
                )
            } else if distance < MIN_SPACING * 2.0 {
                (Status::Warning, format!("Spacing could be improved: {}px apart", apart))
            } else {
                (Status::Pass, format!("Good spacing: {}px apart", apart))
            };

            issues.push(SpacingIssue {
                target1: first.element.clone(),
                target2: second.element.clone(),
                distance,
                status,
                message,
            });
        }
    }

    issues
}

fn count_status<T>(items: &[T], status: Status, status_of: impl Fn(&T) -> Status) -> usize {
    items.iter().filter(|item| status_of(item) == status).count()
}

/// Touch accessibility score in 0-100.
pub fn calculate_touch_target_score(targets: &[TouchTarget], spacing: &[SpacingIssue]) -> f64 {
    let target_penalty: f64 = targets
        .iter()
        .map(|t| match t.status {
            Status::Fail => 10.0,
            Status::Warning => 5.0,
            Status::Pass => 0.0,
        })
        .sum();
    let spacing_penalty: f64 = spacing
        .iter()
        .map(|s| match s.status {
            Status::Fail => 5.0,
            Status::Warning => 2.0,
            Status::Pass => 0.0,
        })
        .sum();

    clamp_score(100.0 - target_penalty - spacing_penalty)
}

fn generate_recommendations(targets: &[TouchTarget], spacing: &[SpacingIssue]) -> Vec<String> {
    let failed_targets = count_status(targets, Status::Fail, |t| t.status);
    let warning_targets = count_status(targets, Status::Warning, |t| t.status);
    let failed_spacing = count_status(spacing, Status::Fail, |s| s.status);
    let warning_spacing = count_status(spacing, Status::Warning, |s| s.status);

    if failed_targets == 0 && warning_targets == 0 && failed_spacing == 0 {
        return vec!["Excellent! All touch targets meet accessibility guidelines.".to_string()];
    }

    let min = format_number(MIN_TARGET_SIZE);
    let recommended = format_number(RECOMMENDED_SIZE);
    let mut recommendations = Vec::new();

    if failed_targets > 0 {
        recommendations.push(format!(
            "{} target(s) are too small. Increase to at least {}×{}px",
            failed_targets, min, min
        ));
    }
    if warning_targets > 0 {
        recommendations.push(format!(
            "{} target(s) could be larger. Aim for {}×{}px for better usability",
            warning_targets, recommended, recommended
        ));
    }
    if failed_spacing > 0 {
        recommendations.push(format!(
            "{} target pair(s) are too close. Add at least {}px spacing",
            failed_spacing,
            format_number(MIN_SPACING)
        ));
    }
    if warning_spacing > 0 {
        recommendations.push(format!(
            "{} target pair(s) could use more spacing for easier interaction",
            warning_spacing
        ));
    }

    if targets.iter().any(|t| t.width != t.height) {
        recommendations.push("Consider using square targets - they're easier to tap accurately".to_string());
    }

    recommendations
}

/// Size and spacing analysis of a set of touch targets.
pub fn analyze_touch_targets(inputs: &[TargetInput]) -> TouchTargetAnalysis {
    let targets: Vec<TouchTarget> = inputs.iter().map(analyze_touch_target).collect();
    let spacing_issues = analyze_spacing(&targets);
    let score = calculate_touch_target_score(&targets, &spacing_issues);
    let recommendations = generate_recommendations(&targets, &spacing_issues);

    let summary = TouchSummary {
        total: targets.len() as u32,
        pass: count_status(&targets, Status::Pass, |t| t.status) as u32,
        warning: count_status(&targets, Status::Warning, |t| t.status) as u32,
        fail: count_status(&targets, Status::Fail, |t| t.status) as u32,
    };

    debug!(
        score,
        targets = summary.total,
        failing = summary.fail,
        pairs = spacing_issues.len(),
        "touch targets analyzed"
    );

    TouchTargetAnalysis {
        targets,
        spacing_issues,
        score,
        summary,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: &str, element: &str, x: f64, y: f64, width: f64, height: f64) -> TargetInput {
        TargetInput {
            id: id.to_string(),
            element: element.to_string(),
            width,
            height,
            x,
            y,
        }
    }

    fn sample_targets() -> Vec<TargetInput> {
        vec![
            target("1", "Button 1", 50.0, 50.0, 120.0, 40.0),
            target("2", "Button 2", 200.0, 50.0, 100.0, 35.0),
            target("3", "Icon Button", 50.0, 120.0, 32.0, 32.0),
            target("4", "Large Button", 200.0, 150.0, 150.0, 50.0),
            target("5", "Small Link", 100.0, 220.0, 60.0, 24.0),
        ]
    }

    #[test]
    fn sample_layout() {
        let analysis = analyze_touch_targets(&sample_targets());

        assert_eq!(
            analysis.summary,
            TouchSummary {
                total: 5,
                pass: 1,
                warning: 0,
                fail: 4
            }
        );
        assert_eq!(analysis.targets[0].message, "Too small: 120×40px. Minimum is 44×44px");
        assert_eq!(analysis.targets[3].message, "Good size: 150×50px");
        assert_eq!(analysis.targets[0].area, 4800.0);

        let pairs: Vec<_> = analysis
            .spacing_issues
            .iter()
            .map(|s| (s.target1.as_str(), s.target2.as_str(), s.message.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Button 1", "Button 2", "Good spacing: 30.0px apart"),
                ("Button 1", "Icon Button", "Good spacing: 30.0px apart"),
                ("Large Button", "Small Link", "Good spacing: 44.7px apart"),
            ]
        );

        assert_eq!(analysis.score, 60.0);
        assert_eq!(
            analysis.recommendations,
            vec![
                "4 target(s) are too small. Increase to at least 44×44px",
                "Consider using square targets - they're easier to tap accurately",
            ]
        );
    }

    #[test]
    fn size_thresholds() {
        let warn = analyze_touch_target(&target("a", "A", 0.0, 0.0, 44.0, 44.0));
        assert_eq!(warn.status, Status::Warning);
        assert_eq!(warn.message, "Below recommended: 44×44px. Recommended is 48×48px");

        let fail = analyze_touch_target(&target("b", "B", 0.0, 0.0, 43.0, 50.0));
        assert_eq!(fail.status, Status::Fail);

        let pass = analyze_touch_target(&target("c", "C", 0.0, 0.0, 48.0, 48.0));
        assert_eq!(pass.status, Status::Pass);
    }

    #[test]
    fn touching_targets_have_zero_distance() {
        let a = analyze_touch_target(&target("a", "A", 0.0, 0.0, 10.0, 10.0));
        let b = analyze_touch_target(&target("b", "B", 0.0, 10.0, 10.0, 10.0));
        assert_eq!(calculate_distance(&a, &b), 0.0);

        let issues = analyze_spacing(&[a, b]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].status, Status::Fail);
        assert_eq!(issues[0].message, "Too close: 0.0px apart. Minimum is 8px");
    }

    #[test]
    fn nan_geometry_is_left_unreported() {
        let odd = analyze_touch_target(&target("a", "A", f64::NAN, 0.0, f64::NAN, 40.0));
        assert_eq!(odd.status, Status::Pass);
        assert_eq!(odd.message, "Good size: NaN×40px");

        let near = analyze_touch_target(&target("b", "B", 0.0, 0.0, 48.0, 48.0));
        assert!(calculate_distance(&odd, &near).is_nan());
        assert!(analyze_spacing(&[odd, near]).is_empty());
    }

    #[test]
    fn diagonal_distance_is_euclidean() {
        let a = analyze_touch_target(&target("a", "A", 0.0, 0.0, 10.0, 10.0));
        let b = analyze_touch_target(&target("b", "B", 13.0, 14.0, 10.0, 10.0));
        assert!((calculate_distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((calculate_distance(&b, &a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn spacing_bands() {
        let a = analyze_touch_target(&target("a", "A", 0.0, 0.0, 48.0, 48.0));
        let near = analyze_touch_target(&target("b", "B", 60.0, 0.0, 48.0, 48.0));
        let far = analyze_touch_target(&target("c", "C", 200.0, 0.0, 48.0, 48.0));

        let issues = analyze_spacing(&[a, near, far]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].status, Status::Warning);
        assert_eq!(issues[0].message, "Spacing could be improved: 12.0px apart");

        let analysis = analyze_touch_targets(&[
            target("a", "A", 0.0, 0.0, 48.0, 48.0),
            target("b", "B", 60.0, 0.0, 48.0, 48.0),
        ]);
        assert_eq!(analysis.score, 98.0);
        // A spacing warning alone does not break the all-clear.
        assert_eq!(
            analysis.recommendations,
            vec!["Excellent! All touch targets meet accessibility guidelines."]
        );
    }

    #[test]
    fn no_targets() {
        let analysis = analyze_touch_targets(&[]);
        assert_eq!(analysis.score, 100.0);
        assert_eq!(analysis.summary, TouchSummary::default());
        assert!(analysis.spacing_issues.is_empty());
        assert_eq!(analysis.recommendations.len(), 1);
    }

    #[test]
    fn score_is_clamped() {
        let inputs: Vec<_> = (0..20)
            .map(|i| target(&i.to_string(), "Dot", 0.0, 0.0, 10.0, 10.0))
            .collect();
        assert_eq!(analyze_touch_targets(&inputs).score, 0.0);
    }

    #[test]
    fn fractional_sizes_in_messages() {
        let t = analyze_touch_target(&target("a", "A", 0.0, 0.0, 43.5, 60.0));
        assert_eq!(t.message, "Too small: 43.5×60px. Minimum is 44×44px");
    }

    #[test]
    fn serializes_camel_case() {
        let analysis = analyze_touch_targets(&sample_targets());
        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json["spacingIssues"].is_array());
        assert_eq!(json["targets"][0]["status"], "fail");
        assert_eq!(json["summary"]["fail"], 4);
    }
}
