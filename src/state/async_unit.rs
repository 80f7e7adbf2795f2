// ============================================================================
// ASYNC UNIT - pending / fulfilled / rejected lifecycle of one async call
// ============================================================================

/// Phase of one coordinator invocation
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncStatus<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

/// Outcome of one invocation, tagged with the request id the store saw in
/// the matching `*Pending` action.
///
/// Terminal units can only be built by consuming a [`PendingUnit`], so an
/// invocation resolves exactly once and never goes back to pending.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncUnit<T> {
    request_id: u64,
    status: AsyncStatus<T>,
}

/// Invocation that has been announced to the store but not resolved yet
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending unit must be resolved with fulfill() or reject()"]
pub struct PendingUnit {
    request_id: u64,
}

impl PendingUnit {
    pub fn new(request_id: u64) -> Self {
        Self { request_id }
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Observable pending value, e.g. for a view that wants to show a spinner
    pub fn snapshot<T>(&self) -> AsyncUnit<T> {
        AsyncUnit {
            request_id: self.request_id,
            status: AsyncStatus::Pending,
        }
    }

    pub fn fulfill<T>(self, payload: T) -> AsyncUnit<T> {
        AsyncUnit {
            request_id: self.request_id,
            status: AsyncStatus::Fulfilled(payload),
        }
    }

    pub fn reject<T>(self, error: impl Into<String>) -> AsyncUnit<T> {
        AsyncUnit {
            request_id: self.request_id,
            status: AsyncStatus::Rejected(error.into()),
        }
    }
}

impl<T> AsyncUnit<T> {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn status(&self) -> &AsyncStatus<T> {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, AsyncStatus::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self.status, AsyncStatus::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.status, AsyncStatus::Rejected(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.status {
            AsyncStatus::Fulfilled(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AsyncStatus::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// `Ok` for fulfilled, `Err` for rejected, `None` while pending
    pub fn into_result(self) -> Option<Result<T, String>> {
        match self.status {
            AsyncStatus::Pending => None,
            AsyncStatus::Fulfilled(payload) => Some(Ok(payload)),
            AsyncStatus::Rejected(error) => Some(Err(error)),
        }
    }
}
