use serde::{Deserialize, Serialize};

/// Success body returned by a parsing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub status: String,
    pub metadata: ParseMetadata,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub parser: String,
    pub pages_processed: u32,
    pub filename: String,
    /// Processing time as measured by the remote engine.
    pub duration_ms: f64,
}
