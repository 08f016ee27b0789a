//! Static question templates used when no provider answers.

use std::collections::BTreeMap;

use crate::models::form::FormData;
use crate::models::question::Question;

/// Category-keyed question templates. Built once at startup and read-only
/// afterwards; every lookup clones the canned questions into a fresh
/// per-request list.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    templates: BTreeMap<&'static str, Vec<Question>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        let mut templates = BTreeMap::new();

        templates.insert(
            "Food & Beverages",
            vec![
                Question::textarea(
                    "nutritional_info",
                    "Please provide detailed nutritional information per serving",
                    true,
                    "nutrition",
                ),
                Question::textarea(
                    "preservatives",
                    "What preservatives, if any, are used in this product?",
                    false,
                    "ingredients",
                ),
                Question::select(
                    "shelf_life",
                    "What is the typical shelf life of this product?",
                    true,
                    "storage",
                    &[
                        "Less than 1 month",
                        "1-3 months",
                        "3-6 months",
                        "6-12 months",
                        "More than 1 year",
                    ],
                ),
                Question::textarea(
                    "allergen_testing",
                    "How do you test for and prevent cross-contamination with allergens?",
                    true,
                    "safety",
                ),
            ],
        );

        templates.insert(
            "Cosmetics & Personal Care",
            vec![
                Question::select(
                    "skin_type",
                    "What skin types is this product suitable for?",
                    true,
                    "suitability",
                    &[
                        "All skin types",
                        "Dry skin",
                        "Oily skin",
                        "Sensitive skin",
                        "Combination skin",
                    ],
                ),
                Question::select(
                    "animal_testing",
                    "Has this product or its ingredients been tested on animals?",
                    true,
                    "ethics",
                    &[
                        "No, never tested on animals",
                        "Not tested by us, but suppliers may have",
                        "Yes, tested on animals",
                        "Unknown",
                    ],
                ),
                Question::textarea(
                    "packaging_material",
                    "What materials are used in the product packaging?",
                    true,
                    "packaging",
                ),
            ],
        );

        templates.insert(
            "Supplements & Vitamins",
            vec![
                Question::textarea(
                    "dosage_instructions",
                    "What are the recommended dosage instructions?",
                    true,
                    "usage",
                ),
                Question::select(
                    "third_party_testing",
                    "Is this product third-party tested for purity and potency?",
                    true,
                    "quality",
                    &[
                        "Yes, by certified labs",
                        "Yes, internally tested",
                        "No testing performed",
                        "Unknown",
                    ],
                ),
                Question::textarea(
                    "contraindications",
                    "Are there any known contraindications or interactions?",
                    true,
                    "safety",
                ),
            ],
        );

        Self { templates }
    }

    /// The raw category → questions table, exposed by GET /questions/templates.
    pub fn templates(&self) -> &BTreeMap<&'static str, Vec<Question>> {
        &self.templates
    }

    /// Canned questions for a submitted form: the category's templates (or
    /// the generic pair for unknown categories), an organic-certification
    /// follow-up when the ingredients mention "organic", and the
    /// supply-chain block every product gets.
    pub fn questions_for(&self, form: &FormData) -> Vec<Question> {
        let category = form.get("category").unwrap_or("General");
        let mut questions = match self.templates.get(category) {
            Some(list) => list.clone(),
            None => generic_questions(),
        };

        let ingredients = form.get("ingredients").unwrap_or("").to_lowercase();
        if ingredients.contains("organic") {
            questions.push(Question::textarea(
                "organic_certification",
                "Please provide details about your organic certification",
                true,
                "certifications",
            ));
        }

        questions.extend(supply_chain_questions());
        questions
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback pair for categories without templates.
fn generic_questions() -> Vec<Question> {
    vec![
        Question::textarea(
            "quality_standards",
            "What quality standards does your product meet?",
            true,
            "quality",
        ),
        Question::textarea(
            "environmental_impact",
            "How does your product minimize environmental impact?",
            false,
            "sustainability",
        ),
    ]
}

/// Supply-chain questions appended for every product.
fn supply_chain_questions() -> Vec<Question> {
    vec![
        Question::select(
            "supplier_audits",
            "How often do you audit your suppliers?",
            true,
            "supply_chain",
            &["Monthly", "Quarterly", "Annually", "As needed", "Never"],
        ),
        Question::select(
            "traceability",
            "Can you trace this product back to its raw material sources?",
            true,
            "supply_chain",
            &[
                "Complete traceability",
                "Partial traceability",
                "Limited traceability",
                "No traceability",
            ],
        ),
        Question::textarea(
            "social_responsibility",
            "What social responsibility initiatives does your company support?",
            false,
            "ethics",
        ),
    ]
}
