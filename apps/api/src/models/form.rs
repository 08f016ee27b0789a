use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The seven fields that carry base scoring weight.
/// `certifications` is weighted separately and is not part of this set.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "productName",
    "category",
    "brand",
    "description",
    "ingredients",
    "sourcing",
    "manufacturing",
];

/// A submitted product-disclosure form.
///
/// Two-part structure: the fixed fields the scorer knows about, plus an open
/// map of additional string fields ("dynamic fields") collected from
/// follow-up questions. A fixed field that is `None` was absent from the
/// request body; `Some("")` means the key was submitted empty — request
/// validation only cares about presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl FormData {
    /// Looks up a field by its wire name, covering both the fixed fields and
    /// the dynamic extras. Returns `None` only when the key was not
    /// submitted at all.
    pub fn get(&self, field: &str) -> Option<&str> {
        let fixed = match field {
            "productName" => &self.product_name,
            "category" => &self.category,
            "brand" => &self.brand,
            "description" => &self.description,
            "ingredients" => &self.ingredients,
            "sourcing" => &self.sourcing,
            "manufacturing" => &self.manufacturing,
            "certifications" => &self.certifications,
            _ => return self.extra.get(field).map(String::as_str),
        };
        fixed.as_deref()
    }

    /// The open part of the form: every submitted key outside the fixed set.
    pub fn dynamic_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
