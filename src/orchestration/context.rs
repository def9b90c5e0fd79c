//! Per-request context propagated to every remote call.
//!
//! Carries the correlation ID used in logs and a cooperative cancellation
//! signal. Cancellation aborts the remaining steps of a workflow; writes
//! that already completed are left in place.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{Result, StaffingError};

/// Sender half of a cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    cancel: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal every holder of the paired context to stop.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }
}

/// Receiver half of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Resolves once cancellation is requested. Pends forever otherwise.
    pub async fn cancelled(&self) {
        let Some(rx) = self.rx.as_ref() else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender dropped without cancelling.
                return std::future::pending().await;
            }
        }
    }
}

/// Context for a single logical request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    correlation_id: String,
    cancel: CancelSignal,
    call_timeout: Option<Duration>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    /// Fresh context with a generated correlation ID and no cancellation.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            cancel: CancelSignal::never(),
            call_timeout: None,
        }
    }

    /// Fresh context paired with a handle that cancels it.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: CancelSignal { rx: Some(rx) },
            ..Self::new()
        };
        (ctx, CancelHandle { cancel: tx })
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Bound every remote call made through [`RequestContext::call`].
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn cancel_signal(&self) -> &CancelSignal {
        &self.cancel
    }

    /// Fail fast if cancellation was already requested.
    pub fn ensure_active(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(StaffingError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Run one remote call, racing it against cancellation and the call timeout.
    ///
    /// `operation` names the call in the `Unavailable` error raised on timeout.
    pub async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.ensure_active()?;
        let bounded = async {
            match self.call_timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(StaffingError::Unavailable(format!(
                        "{operation} timed out after {}ms",
                        limit.as_millis()
                    ))),
                },
                None => fut.await,
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StaffingError::Cancelled),
            result = bounded => result,
        }
    }
}
