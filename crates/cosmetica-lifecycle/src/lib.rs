#![warn(missing_docs)]
//! # cosmetica-lifecycle
//!
//! ## Purpose
//! Implements the analysis request lifecycle shared by the image and name
//! input modes.
//!
//! ## Responsibilities
//! - Model legal transitions `Idle -> Pending -> Complete | Failed` and
//!   `reset` back to `Idle`.
//! - Reject invalid submissions before any transition occurs.
//! - Tag each request with a [`RequestToken`] so late resolutions are ignored.
//! - Drive one provider call per request through [`AnalysisClient`].
//!
//! ## Data flow
//! UI trigger -> [`AnalysisLifecycle::start`] -> [`AnalysisClient`] awaits
//! [`AnalysisProvider::analyze`] -> [`AnalysisLifecycle::complete`] ->
//! `Complete(result)` or `Failed(error)`.
//!
//! ## Ownership and lifetimes
//! The lifecycle owns the terminal result. The client only holds the provider
//! (`Arc<dyn AnalysisProvider>`), so a pending call can outlive a reset
//! without aliasing state.
//!
//! ## Error model
//! Rejected submissions return [`LifecycleError`] synchronously. Provider
//! failures never error out of [`AnalysisClient::submit`]; they become a
//! `Failed` state and [`Resolution::Failed`].
//!
//! ## Example
//! ```rust
//! use cosmetica_lifecycle::{AnalysisLifecycle, AnalysisState, LifecycleError};
//!
//! let mut lifecycle = AnalysisLifecycle::new();
//! assert!(matches!(
//!     lifecycle.start_name("  ", None),
//!     Err(LifecycleError::Validation(_))
//! ));
//! assert!(matches!(lifecycle.state(), AnalysisState::Idle));
//! ```

use std::fmt;
use std::sync::Arc;

use cosmetica_analysis_contract::{AnalysisProvider, ProviderError};
use cosmetica_core::{AnalysisInput, AnalysisResult, CoreError, InputMode, NameQuery};
use thiserror::Error;

/// Monotonically increasing identifier of one `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw token value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Current lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    /// Waiting for a submission.
    Idle,
    /// One provider call is outstanding.
    Pending {
        /// Token of the outstanding request.
        token: RequestToken,
        /// Input mode of the outstanding request.
        mode: InputMode,
    },
    /// Last request completed with a result.
    Complete(AnalysisResult),
    /// Last request failed.
    Failed(ProviderError),
}

/// Outcome of applying one provider resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The lifecycle moved to `Complete`.
    Completed,
    /// The lifecycle moved to `Failed`.
    Failed(ProviderError),
    /// The resolution belonged to an abandoned request and was discarded.
    Stale,
}

/// Analysis request state machine with explicit legal transitions.
#[derive(Debug, Clone)]
pub struct AnalysisLifecycle {
    state: AnalysisState,
    last_token: u64,
}

impl AnalysisLifecycle {
    /// Creates a lifecycle in `Idle` state.
    pub fn new() -> Self {
        Self {
            state: AnalysisState::Idle,
            last_token: 0,
        }
    }

    /// Returns current state snapshot.
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Returns the held result, if the last request completed.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AnalysisState::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// Returns `true` while a request is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, AnalysisState::Pending { .. })
    }

    /// Returns the token of the outstanding request.
    pub fn current_token(&self) -> Option<RequestToken> {
        match self.state {
            AnalysisState::Pending { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Enters `Pending` for a new submission.
    ///
    /// `None` models an image submission with nothing selected.
    ///
    /// # Errors
    /// - [`LifecycleError::NoInput`] when `input` is `None`.
    /// - [`LifecycleError::AlreadyPending`] while another request is
    ///   outstanding.
    ///
    /// No transition happens on error.
    pub fn start(&mut self, input: Option<&AnalysisInput>) -> Result<RequestToken, LifecycleError> {
        let input = input.ok_or(LifecycleError::NoInput)?;
        if let AnalysisState::Pending { token, .. } = self.state {
            return Err(LifecycleError::AlreadyPending(token));
        }

        self.last_token = self.last_token.saturating_add(1);
        let token = RequestToken(self.last_token);
        // Entering Pending drops any previous Complete/Failed value.
        self.state = AnalysisState::Pending {
            token,
            mode: input.mode(),
        };
        Ok(token)
    }

    /// Validates raw name-form fields and starts a name request.
    ///
    /// # Errors
    /// Returns [`LifecycleError::Validation`] for a blank product name, plus
    /// the errors of [`AnalysisLifecycle::start`].
    pub fn start_name(
        &mut self,
        product_name: &str,
        brand_name: Option<&str>,
    ) -> Result<(RequestToken, AnalysisInput), LifecycleError> {
        let input = AnalysisInput::Name(NameQuery::new(product_name, brand_name)?);
        let token = self.start(Some(&input))?;
        Ok((token, input))
    }

    /// Applies a provider resolution for `token`.
    ///
    /// Resolutions for any request other than the outstanding one leave the
    /// state untouched and return [`Resolution::Stale`].
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<AnalysisResult, ProviderError>,
    ) -> Resolution {
        if self.current_token() != Some(token) {
            return Resolution::Stale;
        }

        match outcome {
            Ok(result) => {
                self.state = AnalysisState::Complete(result);
                Resolution::Completed
            }
            Err(error) => {
                self.state = AnalysisState::Failed(error.clone());
                Resolution::Failed(error)
            }
        }
    }

    /// Returns to `Idle` from any state, discarding any held result.
    ///
    /// An outstanding provider call is abandoned; its token no longer matches.
    pub fn reset(&mut self) {
        self.state = AnalysisState::Idle;
    }
}

impl Default for AnalysisLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives lifecycle requests through an analysis provider.
#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn AnalysisProvider>,
}

impl AnalysisClient {
    /// Creates a client over `provider`.
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self { provider }
    }

    /// Calls the provider once for `input`, logging the outcome.
    pub async fn analyze(
        &self,
        token: RequestToken,
        input: &AnalysisInput,
    ) -> Result<AnalysisResult, ProviderError> {
        tracing::info!(
            stage = "analysis",
            action = "request",
            %token,
            mode = ?input.mode(),
            "analysis request started"
        );

        let outcome = self.provider.analyze(input).await;
        match &outcome {
            Ok(result) => tracing::info!(
                stage = "analysis",
                action = "resolved",
                %token,
                product = %result.product_name,
                "analysis completed"
            ),
            Err(error) => tracing::error!(
                stage = "analysis",
                action = "failed",
                %token,
                %error,
                "analysis failed"
            ),
        }
        outcome
    }

    /// Starts, awaits, and resolves one request.
    ///
    /// # Errors
    /// Returns [`LifecycleError`] when `start` rejects the submission; the
    /// provider is not called in that case.
    pub async fn submit(
        &self,
        lifecycle: &mut AnalysisLifecycle,
        input: Option<AnalysisInput>,
    ) -> Result<Resolution, LifecycleError> {
        let token = lifecycle.start(input.as_ref())?;
        let Some(input) = input else {
            return Err(LifecycleError::NoInput);
        };

        let outcome = self.analyze(token, &input).await;
        Ok(lifecycle.complete(token, outcome))
    }
}

impl fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisClient").finish_non_exhaustive()
    }
}

/// Submissions rejected before entering `Pending`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Input failed validation (for example a blank product name).
    #[error("invalid submission: {0}")]
    Validation(#[from] CoreError),
    /// Nothing to analyze (no image selected).
    #[error("no input selected")]
    NoInput,
    /// Another request is still pending.
    #[error("request {0} is still pending")]
    AlreadyPending(RequestToken),
}
