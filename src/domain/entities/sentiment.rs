use serde::{Deserialize, Serialize};

/// Community discussion volume for one catalog number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub catalog_number: String,
    pub post_count: u32,
    #[serde(default)]
    pub total_score: i64,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub total_comments: u32,
}
