//! Form state machine for hosts that accept symbols and display results.
//!
//! State is immutable; [`reduce`] is the only transition. Each submission
//! carries a [`RequestId`] from a [`RequestSequence`], and a finished request
//! is applied only if it is still the latest one issued, so a slow response
//! can never replace a newer result.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;

/// Identity of one submission. Ordered by issue time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues strictly increasing request ids.
#[derive(Debug, Default)]
pub struct RequestSequence {
    next: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RequestId {
        RequestId(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// What the host should currently display.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum View {
    #[default]
    Idle,
    Loading {
        request: RequestId,
        symbol: String,
    },
    Success(AnalysisResult),
    Failure(AnalysisError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A valid symbol was submitted and a request started.
    Submitted { request: RequestId, symbol: String },
    /// A submission failed validation before any request was made.
    Rejected {
        request: RequestId,
        error: AnalysisError,
    },
    /// A request completed.
    Finished {
        request: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub view: View,
    /// Most recently issued submission, if any.
    pub latest: Option<RequestId>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading { .. })
    }
}

/// Applies `event` to `state`, returning the next state.
pub fn reduce(state: &FormState, event: Event) -> FormState {
    match event {
        Event::Submitted { request, symbol } => FormState {
            view: View::Loading { request, symbol },
            latest: Some(request),
        },
        Event::Rejected { request, error } => FormState {
            view: View::Failure(error),
            latest: Some(request),
        },
        Event::Finished { request, outcome } => {
            if state.latest != Some(request) {
                tracing::debug!("discarding stale response {}", request);
                return state.clone();
            }
            let view = match outcome {
                Ok(result) => View::Success(result),
                Err(error) => View::Failure(error),
            };
            FormState {
                view,
                latest: state.latest,
            }
        }
    }
}
