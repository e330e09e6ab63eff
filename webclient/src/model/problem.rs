use serde::{Deserialize, Serialize};

/// One data row of the paginated problem set.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ProblemSummary {
    /// e.g. "Accepted"; empty when the user has no verdict on this problem
    pub status: String,
    pub pid: String,
    pub title: String,
    /// Tag label next to the title; empty when absent
    pub labels: String,
    pub source: String,
    pub solved: u64,
    pub submitted: u64,
    /// Average score with the " pts" suffix stripped, e.g. "37.5"
    pub avg: String,
}

/// Statement blocks of a single problem page, in page order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub content: String,
    pub input: String,
    pub output: String,
    pub sample_input: String,
    pub sample_output: String,
    pub limits: String,
}
