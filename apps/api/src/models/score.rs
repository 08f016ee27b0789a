use serde::{Deserialize, Serialize};

/// Heuristic transparency score for a submitted form.
///
/// `score` is the 0-100 headline number; `raw_score` and `max_score` are the
/// unweighted point total and the sum of weights actually applied, kept so
/// callers can show "x of y points". `timestamp` is epoch seconds at
/// computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub max_score: u32,
    pub raw_score: u32,
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub timestamp: i64,
}
