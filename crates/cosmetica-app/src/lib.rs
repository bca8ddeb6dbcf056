#![warn(missing_docs)]
//! # cosmetica-app
//!
//! ## Purpose
//! Orchestrates the analysis lifecycle, presentation, notifications, and ad
//! banner sequencing for `cosmetica`.
//!
//! ## Responsibilities
//! - Route image and name submissions through the analysis lifecycle.
//! - Emit success/failure/validation toasts on terminal transitions.
//! - Show the banner on the input screen and hide it on the results screen.
//! - Load runtime configuration from the environment and install logging.
//!
//! ## Data flow
//! Shell input -> [`AppController::submit_image`] /
//! [`AppController::submit_name`] -> lifecycle + provider -> notifications,
//! [`Screen`] switch, and [`DisplayModel`] projection.
//!
//! ## Ownership and lifetimes
//! The controller owns the lifecycle and the ad adapter; providers and ad
//! backends are shared through `Arc` so tests can observe them.
//!
//! ## Error model
//! Submission outcomes are reported as [`SubmitOutcome`]; nothing a user does
//! is fatal. [`AppError`] covers shell-level failures such as unreadable
//! image files.
//!
//! ## Security and privacy notes
//! Image bytes are never logged; only their length and media type are.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cosmetica_ads::{AdBackend, AdConfig, AdLifecycle, AdState};
use cosmetica_analysis_contract::{AnalysisProvider, DEFAULT_MOCK_DELAY};
use cosmetica_core::{AnalysisInput, CoreError, ImagePayload, InputMode, NameQuery};
use cosmetica_lifecycle::{AnalysisClient, AnalysisLifecycle, LifecycleError, Resolution};
use cosmetica_ui::{DisplayModel, Notification, Screen};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("COSMETICA_VERSION");

/// Env var enabling native-runtime behavior (ads).
pub const NATIVE_RUNTIME_ENV: &str = "COSMETICA_NATIVE_RUNTIME";

/// Env var selecting test ad units.
pub const ADS_TESTING_ENV: &str = "COSMETICA_ADS_TESTING";

/// Env var overriding the mock analysis delay in milliseconds.
pub const ANALYSIS_DELAY_ENV: &str = "COSMETICA_ANALYSIS_DELAY_MS";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Installs the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; defaults to `info`. Repeated calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Running inside the native mobile shell.
    pub native_runtime: bool,
    /// Use test ad units.
    pub ads_testing: bool,
    /// Mock provider delay.
    pub analysis_delay: Duration,
}

impl AppConfig {
    /// Reads configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            native_runtime: native_runtime_from_env(),
            ads_testing: ads_testing_from_env(),
            analysis_delay: analysis_delay_from_env(),
        }
    }

    /// Ad configuration derived from this runtime configuration.
    pub fn ad_config(&self) -> AdConfig {
        AdConfig::new(self.ads_testing)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            native_runtime: false,
            ads_testing: false,
            analysis_delay: DEFAULT_MOCK_DELAY,
        }
    }
}

/// Parses an on/off flag.
///
/// Semantics:
/// - `1`, `true`, `on`, `yes` (case-insensitive) => enabled.
/// - Anything else => disabled.
pub fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    matches!(normalized.as_str(), "1" | "true" | "on" | "yes")
}

/// Checks the native-runtime env var. Unset => web runtime.
pub fn native_runtime_from_env() -> bool {
    std::env::var(NATIVE_RUNTIME_ENV)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

/// Checks the ads test-mode env var. Unset => production units.
pub fn ads_testing_from_env() -> bool {
    std::env::var(ADS_TESTING_ENV)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

/// Reads the mock analysis delay. Unset or invalid => 3 seconds.
pub fn analysis_delay_from_env() -> Duration {
    std::env::var(ANALYSIS_DELAY_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_MOCK_DELAY)
}

/// Loads an image file as a submission payload.
///
/// # Errors
/// Returns [`AppError::UnknownMediaType`] for unrecognized extensions,
/// [`AppError::Io`] for unreadable files, and [`AppError::Core`] for empty
/// files.
pub fn load_image(path: &Path) -> Result<ImagePayload, AppError> {
    let media_type = ImagePayload::media_type_for_path(path)
        .ok_or_else(|| AppError::UnknownMediaType(path.display().to_string()))?;
    let bytes = std::fs::read(path)?;
    Ok(ImagePayload::new(bytes, media_type)?)
}

/// What happened to one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to submit (no image selected); no transition.
    Ignored,
    /// Rejected before entering `Pending`.
    Rejected,
    /// Analysis completed; results screen is showing.
    Completed,
    /// Analysis failed; back on the input screen.
    Failed,
}

/// Screen-level controller for the analyzer.
#[derive(Debug)]
pub struct AppController {
    lifecycle: AnalysisLifecycle,
    client: AnalysisClient,
    ads: AdLifecycle,
    notifications: Vec<Notification>,
}

impl AppController {
    /// Builds the controller and initializes ads once.
    pub async fn new(
        config: &AppConfig,
        provider: Arc<dyn AnalysisProvider>,
        ad_backend: Arc<dyn AdBackend>,
    ) -> Self {
        let ads = AdLifecycle::start(config.ad_config(), config.native_runtime, ad_backend).await;
        Self {
            lifecycle: AnalysisLifecycle::new(),
            client: AnalysisClient::new(provider),
            ads,
            notifications: Vec::new(),
        }
    }

    /// Screen implied by the lifecycle state.
    pub fn screen(&self) -> Screen {
        if self.lifecycle.result().is_some() {
            Screen::Results
        } else {
            Screen::Input
        }
    }

    /// Lifecycle snapshot.
    pub fn lifecycle(&self) -> &AnalysisLifecycle {
        &self.lifecycle
    }

    /// Ad state snapshot.
    pub fn ads_state(&self) -> AdState {
        self.ads.state()
    }

    /// Display model for the results screen, when a result is held.
    pub fn display_model(&self) -> Option<DisplayModel> {
        self.lifecycle.result().map(DisplayModel::from_result)
    }

    /// Takes queued notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Enters the input screen; shows the banner when no result is held.
    pub async fn open(&mut self) {
        if self.screen() == Screen::Input {
            self.ads.show_banner().await;
        }
    }

    /// Submits the selected image, if any.
    pub async fn submit_image(&mut self, image: Option<ImagePayload>) -> SubmitOutcome {
        if let Some(image) = &image {
            tracing::info!(
                stage = "ui",
                action = "submit_image",
                len = image.bytes.len(),
                media_type = %image.media_type,
                "image submitted"
            );
        }
        self.submit(image.map(AnalysisInput::Image)).await
    }

    /// Submits the name form.
    pub async fn submit_name(
        &mut self,
        product_name: &str,
        brand_name: Option<&str>,
    ) -> SubmitOutcome {
        match NameQuery::new(product_name, brand_name) {
            Ok(query) => self.submit(Some(AnalysisInput::Name(query))).await,
            Err(error) => self.reject(LifecycleError::from(error)),
        }
    }

    /// Returns to the input screen, discarding any result.
    pub async fn reset(&mut self) {
        self.lifecycle.reset();
        tracing::info!(stage = "ui", action = "reset", "returned to input screen");
        self.ads.show_banner().await;
    }

    /// Tears down the ad adapter.
    pub async fn shutdown(&mut self) {
        self.ads.teardown().await;
    }

    async fn submit(&mut self, input: Option<AnalysisInput>) -> SubmitOutcome {
        let mode = input.as_ref().map(AnalysisInput::mode);
        let resolution = match self.client.submit(&mut self.lifecycle, input).await {
            Ok(resolution) => resolution,
            Err(error) => return self.reject(error),
        };

        match resolution {
            Resolution::Completed => {
                self.notifications.push(Notification::analysis_completed());
                self.ads.hide_banner().await;
                SubmitOutcome::Completed
            }
            Resolution::Failed(_) => {
                let mode = mode.unwrap_or(InputMode::Image);
                self.notifications.push(Notification::analysis_failed(mode));
                self.lifecycle.reset();
                SubmitOutcome::Failed
            }
            Resolution::Stale => SubmitOutcome::Ignored,
        }
    }

    fn reject(&mut self, error: LifecycleError) -> SubmitOutcome {
        match error {
            LifecycleError::NoInput => {
                tracing::debug!(stage = "ui", action = "submit", "no input selected");
                SubmitOutcome::Ignored
            }
            LifecycleError::Validation(error) => {
                tracing::info!(stage = "ui", action = "validate", %error, "submission rejected");
                self.notifications.push(Notification::missing_product_name());
                SubmitOutcome::Rejected
            }
            LifecycleError::AlreadyPending(token) => {
                tracing::warn!(
                    stage = "ui",
                    action = "submit",
                    %token,
                    "analysis already pending"
                );
                SubmitOutcome::Rejected
            }
        }
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Core model error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    /// Lifecycle rejection.
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
    /// File could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// File extension is not a known image type.
    #[error("unrecognized image type: {0}")]
    UnknownMediaType(String),
}
