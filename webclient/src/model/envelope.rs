use serde::Serialize;

use super::{ProblemDetail, ProblemSummary, SubmissionStatus};
use crate::error::*;

pub const SUCCESS_MSG: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Operation-specific payload, flattened next to `status` and `msg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Payload {
    #[serde(rename = "problems")]
    Problems(Vec<ProblemSummary>),

    #[serde(rename = "problem")]
    Problem(ProblemDetail),

    #[serde(rename = "problems")]
    Submissions(Vec<SubmissionStatus>),
}

/// Uniform response shape of every operation.
/// e.g. `{"status": "success", "msg": "success", "problems": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub msg: String,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Envelope {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            msg: SUCCESS_MSG.to_owned(),
            payload: None,
        }
    }

    pub fn with_payload(payload: Payload) -> Self {
        Self {
            payload: Some(payload),
            ..Self::success()
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            msg: msg.into(),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<&Error> for Envelope {
    fn from(e: &Error) -> Self {
        Envelope::error(e.to_string())
    }
}

/// Operation results that can be wrapped in an [`Envelope`].
pub trait IntoPayload {
    fn into_payload(self) -> Option<Payload>;
}

impl IntoPayload for () {
    fn into_payload(self) -> Option<Payload> {
        None
    }
}

impl IntoPayload for Vec<ProblemSummary> {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Problems(self))
    }
}

impl IntoPayload for ProblemDetail {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Problem(self))
    }
}

impl IntoPayload for Vec<SubmissionStatus> {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Submissions(self))
    }
}

impl<T: IntoPayload> From<Result<T>> for Envelope {
    fn from(res: Result<T>) -> Self {
        match res {
            Ok(x) => match x.into_payload() {
                Some(payload) => Envelope::with_payload(payload),
                None => Envelope::success(),
            },
            Err(e) => Envelope::from(&e),
        }
    }
}
