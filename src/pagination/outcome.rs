use crate::error::QueryFailure;

/// What a fetch produced and whether it ran to the end.
///
/// Stopping at the date cutoff is a normal end and yields `Complete`.
/// `Truncated` means a request failed and `data` holds only what came
/// before it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<P> {
    Complete(P),
    Truncated { data: P, reason: QueryFailure },
}

impl<P> FetchOutcome<P> {
    pub fn is_complete(&self) -> bool {
        matches!(self, FetchOutcome::Complete(_))
    }

    pub fn data(&self) -> &P {
        match self {
            FetchOutcome::Complete(data) => data,
            FetchOutcome::Truncated { data, .. } => data,
        }
    }

    pub fn reason(&self) -> Option<&QueryFailure> {
        match self {
            FetchOutcome::Complete(_) => None,
            FetchOutcome::Truncated { reason, .. } => Some(reason),
        }
    }

    pub fn into_parts(self) -> (P, Option<QueryFailure>) {
        match self {
            FetchOutcome::Complete(data) => (data, None),
            FetchOutcome::Truncated { data, reason } => (data, Some(reason)),
        }
    }

    pub fn map<Q, F>(self, f: F) -> FetchOutcome<Q>
    where
        F: FnOnce(P) -> Q,
    {
        match self {
            FetchOutcome::Complete(data) => FetchOutcome::Complete(f(data)),
            FetchOutcome::Truncated { data, reason } => FetchOutcome::Truncated {
                data: f(data),
                reason,
            },
        }
    }
}
