//! Deterministic fallback scoring over submitted form fields.
//!
//! Two formulas live here on purpose and must not be unified:
//!
//! - [`fallback_score`] replaces a failed provider scoring call. It awards
//!   the certification bonus for any non-empty value and ignores dynamic
//!   fields.
//! - [`service_score`] is the local path taken when no provider is
//!   configured at all. It requires certifications longer than 50
//!   characters and grants a per-field bonus for dynamic answers, and its
//!   insights carry the category-conditional recommendations.
//!
//! Callers depend on the exact numbers each one produces.

use chrono::Utc;

use crate::models::form::{FormData, REQUIRED_FIELDS};
use crate::models::score::ScoreResult;

const REQUIRED_FIELD_WEIGHT: u32 = 10;
const CERTIFICATION_BONUS: u32 = 15;
const DYNAMIC_FIELD_WEIGHT: u32 = 5;

/// Points for one required field, by answer length.
fn field_points(value: &str) -> u32 {
    if value.len() > 100 {
        10
    } else if value.len() > 50 {
        8
    } else if value.len() > 20 {
        6
    } else {
        3
    }
}

/// Base pass over the seven weighted fields, identical in both variants.
fn required_field_points(form: &FormData) -> (u32, u32) {
    let mut raw_score = 0;
    let mut max_score = 0;
    for field in REQUIRED_FIELDS {
        max_score += REQUIRED_FIELD_WEIGHT;
        if let Some(value) = form.get(field) {
            if !value.trim().is_empty() {
                raw_score += field_points(value);
            }
        }
    }
    (raw_score, max_score)
}

fn final_score(raw_score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    let scaled = (f64::from(raw_score) / f64::from(max_score) * 100.0).round() as i64;
    scaled.clamp(0, 100) as u32
}

/// Standalone fallback formula: certification bonus for any non-empty
/// value, no dynamic-field bonus, single threshold insight.
pub fn fallback_score(form: &FormData) -> ScoreResult {
    let (mut raw_score, mut max_score) = required_field_points(form);

    max_score += CERTIFICATION_BONUS;
    if form.get("certifications").is_some_and(|v| !v.is_empty()) {
        raw_score += CERTIFICATION_BONUS;
    }

    let score = final_score(raw_score, max_score);
    let insight = if score >= 80 {
        "Excellent transparency! Your product demonstrates high levels of openness."
    } else if score >= 60 {
        "Good transparency with room for improvement."
    } else {
        "Consider providing more detailed information to improve transparency."
    };

    ScoreResult {
        score,
        max_score,
        raw_score,
        insights: vec![insight.to_string()],
        recommendations: Vec::new(),
        timestamp: Utc::now().timestamp(),
    }
}

/// Service-level formula: certification bonus only above 50 characters,
/// plus a small bonus per answered dynamic field, with full insights.
pub fn service_score(form: &FormData) -> ScoreResult {
    let (mut raw_score, mut max_score) = required_field_points(form);

    max_score += CERTIFICATION_BONUS;
    if form.get("certifications").is_some_and(|v| v.len() > 50) {
        raw_score += CERTIFICATION_BONUS;
    }

    for (_, value) in form.dynamic_fields() {
        if value.trim().is_empty() {
            continue;
        }
        max_score += DYNAMIC_FIELD_WEIGHT;
        raw_score += if value.len() > 50 {
            5
        } else if value.len() > 20 {
            3
        } else {
            1
        };
    }

    let score = final_score(raw_score, max_score);
    let insights = build_insights(form, score);

    ScoreResult {
        score,
        max_score,
        raw_score,
        insights,
        recommendations: Vec::new(),
        timestamp: Utc::now().timestamp(),
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Threshold insight plus category-conditional recommendations.
fn build_insights(form: &FormData, score: u32) -> Vec<String> {
    let mut insights = Vec::new();

    let threshold = if score >= 80 {
        "Excellent transparency! Your product demonstrates high levels of openness and accountability."
    } else if score >= 60 {
        "Good transparency with room for improvement in some areas."
    } else {
        "Consider providing more detailed information to improve transparency."
    };
    insights.push(threshold.to_string());

    let category = form.get("category").unwrap_or("");
    if category == "Food & Beverages" {
        if is_blank(form.get("nutritional_info")) {
            insights.push(
                "Consider adding detailed nutritional information to help consumers make informed choices."
                    .to_string(),
            );
        }
        if is_blank(form.get("allergen_testing")) {
            insights.push(
                "Allergen testing information would enhance consumer trust and safety.".to_string(),
            );
        }
    }
    if category == "Cosmetics & Personal Care" && is_blank(form.get("animal_testing")) {
        insights.push(
            "Clear animal testing policies are increasingly important to consumers.".to_string(),
        );
    }

    let supplier_audits = form.get("supplier_audits").unwrap_or("");
    if supplier_audits.is_empty() || supplier_audits == "Never" {
        insights.push(
            "Regular supplier audits demonstrate commitment to quality and ethical sourcing."
                .to_string(),
        );
    }

    let traceability = form.get("traceability").unwrap_or("");
    if traceability.is_empty() || traceability == "No traceability" {
        insights.push(
            "Implementing supply chain traceability can significantly improve transparency scores."
                .to_string(),
        );
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> FormData {
        serde_json::from_value(value).expect("valid form")
    }

    fn long(n: usize) -> String {
        "x".repeat(n)
    }

    fn full_form(field_len: usize, cert_len: usize) -> FormData {
        form(json!({
            "productName": long(field_len),
            "category": long(field_len),
            "brand": long(field_len),
            "description": long(field_len),
            "ingredients": long(field_len),
            "sourcing": long(field_len),
            "manufacturing": long(field_len),
            "certifications": long(cert_len),
        }))
    }

    #[test]
    fn test_all_empty_fields_score_zero_in_both_variants() {
        let empty = form(json!({
            "productName": "", "category": "", "brand": "", "description": "",
            "ingredients": "", "sourcing": "", "manufacturing": ""
        }));
        assert_eq!(fallback_score(&empty).score, 0);
        assert_eq!(service_score(&empty).score, 0);
        assert_eq!(service_score(&empty).max_score, 85);
        assert_eq!(service_score(&empty).raw_score, 0);
    }

    #[test]
    fn test_detailed_form_scores_100_in_service_variant() {
        let result = service_score(&full_form(101, 51));
        assert_eq!(result.score, 100);
        assert_eq!(result.raw_score, 85);
        assert_eq!(result.max_score, 85);
    }

    #[test]
    fn test_score_bounded_for_arbitrary_inputs() {
        for f in [
            FormData::default(),
            full_form(101, 51),
            form(json!({"productName": "a", "custom1": long(60), "custom2": "b"})),
        ] {
            let result = service_score(&f);
            assert!(result.score <= 100);
            let result = fallback_score(&f);
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_field_points_length_tiers() {
        assert_eq!(field_points(&long(101)), 10);
        assert_eq!(field_points(&long(51)), 8);
        assert_eq!(field_points(&long(21)), 6);
        assert_eq!(field_points("short"), 3);
    }

    #[test]
    fn test_whitespace_only_field_earns_nothing() {
        let f = form(json!({"productName": "   "}));
        let result = fallback_score(&f);
        assert_eq!(result.raw_score, 0);
    }

    #[test]
    fn test_certification_thresholds_differ_between_variants() {
        // 50 characters: enough for the standalone variant, not the service one.
        let f = form(json!({"certifications": long(50)}));
        assert_eq!(fallback_score(&f).raw_score, CERTIFICATION_BONUS);
        assert_eq!(service_score(&f).raw_score, 0);

        let f = form(json!({"certifications": long(51)}));
        assert_eq!(service_score(&f).raw_score, CERTIFICATION_BONUS);
    }

    #[test]
    fn test_dynamic_fields_only_count_in_service_variant() {
        let f = form(json!({"supplier_audits": long(60), "traceability": "Partial traceability"}));
        let service = service_score(&f);
        // 5 points for the long answer, 3 for the 20-50 one; 5 max each.
        assert_eq!(service.raw_score, 8);
        assert_eq!(service.max_score, 85 + 10);

        let fallback = fallback_score(&f);
        assert_eq!(fallback.raw_score, 0);
        assert_eq!(fallback.max_score, 85);
    }

    #[test]
    fn test_empty_dynamic_value_adds_no_weight() {
        let f = form(json!({"notes": ""}));
        assert_eq!(service_score(&f).max_score, 85);
    }

    #[test]
    fn test_threshold_insights() {
        let high = service_score(&full_form(101, 51));
        assert!(high.insights[0].starts_with("Excellent transparency!"));

        let low = service_score(&FormData::default());
        assert!(low.insights[0].starts_with("Consider providing more detailed"));
    }

    #[test]
    fn test_food_category_insights_flag_missing_details() {
        let f = form(json!({"category": "Food & Beverages"}));
        let insights = service_score(&f).insights;
        assert!(insights
            .iter()
            .any(|i| i.contains("nutritional information")));
        assert!(insights.iter().any(|i| i.contains("Allergen testing")));
    }

    #[test]
    fn test_food_category_insights_absent_when_answered() {
        let f = form(json!({
            "category": "Food & Beverages",
            "nutritional_info": "120 kcal per serving",
            "allergen_testing": "Dedicated line, batch tested"
        }));
        let insights = service_score(&f).insights;
        assert!(!insights
            .iter()
            .any(|i| i.contains("nutritional information")));
        assert!(!insights.iter().any(|i| i.contains("Allergen testing")));
    }

    #[test]
    fn test_cosmetics_category_flags_animal_testing() {
        let f = form(json!({"category": "Cosmetics & Personal Care"}));
        let insights = service_score(&f).insights;
        assert!(insights.iter().any(|i| i.contains("animal testing")));
    }

    #[test]
    fn test_never_auditing_suppliers_is_flagged() {
        let f = form(json!({"supplier_audits": "Never"}));
        let insights = service_score(&f).insights;
        assert!(insights.iter().any(|i| i.contains("supplier audits")));

        let f = form(json!({"supplier_audits": "Quarterly"}));
        let insights = service_score(&f).insights;
        assert!(!insights.iter().any(|i| i.contains("supplier audits")));
    }

    #[test]
    fn test_no_traceability_is_flagged() {
        let f = form(json!({"traceability": "No traceability"}));
        let insights = service_score(&f).insights;
        assert!(insights.iter().any(|i| i.contains("traceability")));

        let f = form(json!({"traceability": "Complete traceability"}));
        let insights = service_score(&f).insights;
        assert!(!insights
            .iter()
            .any(|i| i.contains("supply chain traceability")));
    }

    #[test]
    fn test_fallback_insight_wording_differs_from_service() {
        let high = fallback_score(&full_form(101, 51));
        assert_eq!(
            high.insights,
            vec!["Excellent transparency! Your product demonstrates high levels of openness."]
        );

        let high_service = service_score(&full_form(101, 51));
        assert!(high_service.insights[0].contains("openness and accountability"));
    }
}
