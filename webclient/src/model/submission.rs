use serde::{Deserialize, Serialize};

/// One row of the submission status table.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub index: String,
    pub pid: String,
    pub user: String,
    pub status: String,
    /// 0 when the row carries no score badge
    pub score: u32,
    pub time: String,
    pub memory: String,
    pub language: String,
    pub code_length: String,
    pub submit_time: String,
}
