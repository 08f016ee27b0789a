//! Prompt construction for the two provider call families.
//!
//! Form fields are embedded verbatim; the scoring prompt embeds the whole
//! submitted form as pretty-printed JSON.

use crate::models::form::FormData;

/// System prompt for question generation.
pub const QUESTION_SYSTEM: &str = "You are an expert in product transparency and consumer \
    safety. Generate relevant follow-up questions based on product information.";

/// System prompt for transparency scoring.
pub const SCORING_SYSTEM: &str = "You are an expert in product transparency scoring. Analyze \
    the provided information and return a JSON response with score, insights, and \
    recommendations.";

/// Builds the question-generation prompt from the submitted form.
/// Missing fields fall back to neutral placeholders.
pub fn build_question_prompt(form: &FormData) -> String {
    let category = form.get("category").unwrap_or("General");
    let product_name = form.get("productName").unwrap_or("Unknown Product");
    let brand = form.get("brand").unwrap_or("");
    let ingredients = form.get("ingredients").unwrap_or("");

    format!(
        r#"Generate 5-8 relevant follow-up questions for a product transparency assessment.

Product Information:
- Category: {category}
- Product Name: {product_name}
- Brand: {brand}
- Ingredients: {ingredients}

Requirements:
1. Questions should be specific to the product category
2. Include questions about safety, sourcing, certifications, and environmental impact
3. Mix of required and optional questions
4. Use appropriate question types (text, textarea, select, number)
5. For select questions, provide relevant options
6. Return JSON format with array of question objects

Question object format:
{{
  "id": "unique_identifier",
  "question": "Question text",
  "type": "text|textarea|select|number",
  "required": true|false,
  "category": "category_name",
  "options": ["option1", "option2"] // only for select type
}}

Focus on transparency, safety, and consumer trust.
"#
    )
}

/// Builds the scoring prompt. The whole form rides along as JSON so the
/// model sees every submitted field, dynamic ones included.
pub fn build_scoring_prompt(form: &FormData) -> String {
    let form_json = serde_json::to_string_pretty(form).unwrap_or_default();

    format!(
        r#"Analyze the following product information and calculate a transparency score (0-100) with insights.

Product Data:
{form_json}

Requirements:
1. Calculate a transparency score (0-100)
2. Provide 3-5 specific insights
3. Give actionable recommendations
4. Consider completeness, detail, and trustworthiness
5. Return JSON format

Response format:
{{
  "score": 85,
  "max_score": 100,
  "raw_score": 85,
  "insights": [
    "Excellent transparency with comprehensive organic certifications",
    "Strong sustainability practices with solar-powered manufacturing",
    "Consider implementing blockchain tracking for enhanced traceability"
  ],
  "recommendations": [
    "Add more detailed supplier audit information",
    "Consider third-party verification of claims"
  ]
}}

Focus on transparency, consumer trust, and regulatory compliance.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> FormData {
        serde_json::from_value(value).expect("valid form")
    }

    #[test]
    fn test_question_prompt_embeds_form_fields() {
        let form = form(json!({
            "category": "Food & Beverages",
            "productName": "Raw Honey",
            "brand": "BeeWell",
            "ingredients": "honey"
        }));
        let prompt = build_question_prompt(&form);
        assert!(prompt.contains("- Category: Food & Beverages"));
        assert!(prompt.contains("- Product Name: Raw Honey"));
        assert!(prompt.contains("- Brand: BeeWell"));
        assert!(prompt.contains("- Ingredients: honey"));
    }

    #[test]
    fn test_question_prompt_defaults_for_missing_fields() {
        let prompt = build_question_prompt(&FormData::default());
        assert!(prompt.contains("- Category: General"));
        assert!(prompt.contains("- Product Name: Unknown Product"));
        assert!(prompt.contains("- Brand: \n"));
    }

    #[test]
    fn test_scoring_prompt_embeds_form_json() {
        let form = form(json!({"productName": "X", "category": "Y", "origin": "Peru"}));
        let prompt = build_scoring_prompt(&form);
        assert!(prompt.contains("\"productName\": \"X\""));
        assert!(prompt.contains("\"origin\": \"Peru\""));
        assert!(prompt.contains("transparency score (0-100)"));
    }
}
