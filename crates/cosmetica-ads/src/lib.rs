#![warn(missing_docs)]
//! # cosmetica-ads
//!
//! ## Purpose
//! Wraps the mobile advertising plugin behind a best-effort banner lifecycle.
//!
//! ## Responsibilities
//! - Define the [`AdBackend`] capability (initialize, banner show/hide,
//!   interstitial).
//! - Hold ad-unit configuration and test-mode selection in [`AdConfig`].
//! - Keep native/initialized flags as explicit [`AdState`] owned by
//!   [`AdLifecycle`], initialized once at startup and torn down once.
//! - Swallow and log every backend failure.
//!
//! ## Data flow
//! App startup -> [`AdLifecycle::start`] -> screen transitions call
//! [`AdLifecycle::show_banner`] / [`AdLifecycle::hide_banner`] -> app exit
//! calls [`AdLifecycle::teardown`].
//!
//! ## Error model
//! [`AdError`] exists only at the backend seam. Lifecycle methods return an
//! [`AdOutcome`] and never propagate failures to callers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Production banner ad unit.
pub const BANNER_AD_UNIT_ID: &str = "ca-app-pub-8168731240539272/8413732470";

/// Public test banner ad unit.
pub const TEST_BANNER_AD_UNIT_ID: &str = "ca-app-pub-3940256099942544/6300978111";

/// Banner size requested from the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSize {
    /// Standard 320x50 banner.
    Banner,
}

/// Banner anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPosition {
    /// Bottom edge, horizontally centered.
    BottomCenter,
}

/// Options passed to [`AdBackend::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Device ids registered as test devices.
    pub testing_devices: Vec<String>,
    /// Initialize the SDK in testing mode.
    pub initialize_for_testing: bool,
}

/// Options passed to [`AdBackend::show_banner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerOptions {
    /// Ad unit to load.
    pub ad_unit_id: String,
    /// Banner size.
    pub size: BannerSize,
    /// Banner anchor.
    pub position: BannerPosition,
    /// Margin in points.
    pub margin: u32,
    /// Request test ads.
    pub testing: bool,
}

/// Options passed to [`AdBackend::show_interstitial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterstitialOptions {
    /// Ad unit to load.
    pub ad_unit_id: String,
    /// Request test ads.
    pub testing: bool,
}

/// Advertising plugin capability.
#[async_trait]
pub trait AdBackend: Send + Sync {
    /// Initializes the SDK.
    async fn initialize(&self, options: &InitOptions) -> Result<(), AdError>;
    /// Shows the banner.
    async fn show_banner(&self, options: &BannerOptions) -> Result<(), AdError>;
    /// Hides the banner.
    async fn hide_banner(&self) -> Result<(), AdError>;
    /// Prepares and shows an interstitial.
    async fn show_interstitial(&self, options: &InterstitialOptions) -> Result<(), AdError>;
}

/// Backend for web-only deployments; accepts every call and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdBackend;

#[async_trait]
impl AdBackend for NoopAdBackend {
    async fn initialize(&self, _options: &InitOptions) -> Result<(), AdError> {
        Ok(())
    }

    async fn show_banner(&self, _options: &BannerOptions) -> Result<(), AdError> {
        Ok(())
    }

    async fn hide_banner(&self) -> Result<(), AdError> {
        Ok(())
    }

    async fn show_interstitial(&self, _options: &InterstitialOptions) -> Result<(), AdError> {
        Ok(())
    }
}

/// Ad-unit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdConfig {
    /// Production banner unit.
    pub banner_ad_unit_id: String,
    /// Test banner unit used when `testing` is set.
    pub test_banner_ad_unit_id: String,
    /// Interstitial unit; falls back to the banner unit when unset.
    pub interstitial_ad_unit_id: Option<String>,
    /// Test-mode flag.
    pub testing: bool,
    /// Registered test devices.
    pub testing_devices: Vec<String>,
}

impl AdConfig {
    /// Production configuration with the given test-mode flag.
    pub fn new(testing: bool) -> Self {
        Self {
            banner_ad_unit_id: BANNER_AD_UNIT_ID.to_string(),
            test_banner_ad_unit_id: TEST_BANNER_AD_UNIT_ID.to_string(),
            interstitial_ad_unit_id: None,
            testing,
            testing_devices: Vec::new(),
        }
    }

    /// Banner unit selected by the test-mode flag.
    pub fn active_banner_id(&self) -> &str {
        if self.testing {
            &self.test_banner_ad_unit_id
        } else {
            &self.banner_ad_unit_id
        }
    }

    /// Options for initializing the SDK.
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            testing_devices: self.testing_devices.clone(),
            initialize_for_testing: self.testing,
        }
    }

    /// Options for the bottom banner.
    pub fn banner_options(&self) -> BannerOptions {
        BannerOptions {
            ad_unit_id: self.active_banner_id().to_string(),
            size: BannerSize::Banner,
            position: BannerPosition::BottomCenter,
            margin: 0,
            testing: self.testing,
        }
    }

    /// Options for an interstitial.
    pub fn interstitial_options(&self) -> InterstitialOptions {
        let ad_unit_id = self
            .interstitial_ad_unit_id
            .clone()
            .unwrap_or_else(|| self.active_banner_id().to_string());
        InterstitialOptions {
            ad_unit_id,
            testing: self.testing,
        }
    }
}

impl Default for AdConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Explicit ad runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdState {
    /// Running under a native mobile runtime.
    pub native: bool,
    /// SDK initialized successfully and not torn down.
    pub initialized: bool,
    /// Banner currently shown.
    pub banner_visible: bool,
}

impl AdState {
    /// Returns `true` when ad calls reach the backend.
    pub fn is_active(self) -> bool {
        self.native && self.initialized
    }
}

/// Result of one best-effort ad call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    /// Backend call succeeded.
    Applied,
    /// Call skipped (web runtime, not initialized, or nothing to do).
    Skipped,
    /// Backend call failed; the error was logged.
    Failed,
}

/// Best-effort banner lifecycle over an [`AdBackend`].
#[derive(Clone)]
pub struct AdLifecycle {
    config: AdConfig,
    state: AdState,
    backend: Arc<dyn AdBackend>,
}

impl AdLifecycle {
    /// Creates the lifecycle and initializes the SDK once when `native`.
    ///
    /// Initialization failures are logged and leave the adapter inactive.
    pub async fn start(config: AdConfig, native: bool, backend: Arc<dyn AdBackend>) -> Self {
        let mut state = AdState {
            native,
            ..AdState::default()
        };

        if native {
            match backend.initialize(&config.init_options()).await {
                Ok(()) => {
                    state.initialized = true;
                    tracing::info!(
                        stage = "ads",
                        action = "initialize",
                        testing = config.testing,
                        "ads initialized"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        stage = "ads",
                        action = "initialize",
                        %error,
                        "ads initialization failed"
                    );
                }
            }
        } else {
            tracing::debug!(stage = "ads", action = "initialize", "web runtime; ads disabled");
        }

        Self {
            config,
            state,
            backend,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AdState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &AdConfig {
        &self.config
    }

    /// Shows the banner unless inactive or already visible.
    pub async fn show_banner(&mut self) -> AdOutcome {
        if !self.state.is_active() || self.state.banner_visible {
            return AdOutcome::Skipped;
        }

        let outcome = log_outcome(
            "show_banner",
            self.backend.show_banner(&self.config.banner_options()).await,
        );
        if outcome == AdOutcome::Applied {
            self.state.banner_visible = true;
        }
        outcome
    }

    /// Hides the banner unless inactive.
    pub async fn hide_banner(&mut self) -> AdOutcome {
        if !self.state.is_active() {
            return AdOutcome::Skipped;
        }

        // Not gated on `banner_visible`: a show may have landed after its
        // call reported failure.
        let outcome = log_outcome("hide_banner", self.backend.hide_banner().await);
        if outcome == AdOutcome::Applied {
            self.state.banner_visible = false;
        }
        outcome
    }

    /// Shows an interstitial unless inactive.
    pub async fn show_interstitial(&self) -> AdOutcome {
        if !self.state.is_active() {
            return AdOutcome::Skipped;
        }

        log_outcome(
            "show_interstitial",
            self.backend
                .show_interstitial(&self.config.interstitial_options())
                .await,
        )
    }

    /// Hides the banner and deactivates the adapter.
    pub async fn teardown(&mut self) -> AdOutcome {
        let outcome = self.hide_banner().await;
        self.state.initialized = false;
        self.state.banner_visible = false;
        tracing::debug!(stage = "ads", action = "teardown", ?outcome, "ads torn down");
        outcome
    }
}

impl fmt::Debug for AdLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdLifecycle")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn log_outcome(action: &'static str, result: Result<(), AdError>) -> AdOutcome {
    match result {
        Ok(()) => {
            tracing::debug!(stage = "ads", action, "ad call succeeded");
            AdOutcome::Applied
        }
        Err(error) => {
            tracing::warn!(stage = "ads", action, %error, "ad call failed");
            AdOutcome::Failed
        }
    }
}

/// Errors reported by an [`AdBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdError {
    /// SDK call made before initialization.
    #[error("ads sdk not initialized")]
    NotInitialized,
    /// Plugin reported a failure.
    #[error("ads backend failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for best-effort ad sequencing.

    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct ScriptedBackend {
        fail_init: bool,
        fail_show: bool,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn record(&self, call: &str) {
            self.calls
                .lock()
                .expect("call log lock should work")
                .push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("call log lock should work").clone()
        }
    }

    #[async_trait]
    impl AdBackend for ScriptedBackend {
        async fn initialize(&self, _options: &InitOptions) -> Result<(), AdError> {
            self.record("initialize");
            if self.fail_init {
                return Err(AdError::Backend("init refused".to_string()));
            }
            Ok(())
        }

        async fn show_banner(&self, options: &BannerOptions) -> Result<(), AdError> {
            self.record(&format!("show:{}", options.ad_unit_id));
            if self.fail_show {
                return Err(AdError::Backend("no fill".to_string()));
            }
            Ok(())
        }

        async fn hide_banner(&self) -> Result<(), AdError> {
            self.record("hide");
            Ok(())
        }

        async fn show_interstitial(&self, _options: &InterstitialOptions) -> Result<(), AdError> {
            self.record("interstitial");
            Ok(())
        }
    }

    #[test]
    fn test_mode_selects_test_unit() {
        assert_eq!(AdConfig::new(true).active_banner_id(), TEST_BANNER_AD_UNIT_ID);
        assert_eq!(AdConfig::new(false).active_banner_id(), BANNER_AD_UNIT_ID);
        assert_eq!(
            AdConfig::new(false).interstitial_options().ad_unit_id,
            BANNER_AD_UNIT_ID
        );
    }

    #[tokio::test]
    async fn web_runtime_never_calls_backend() {
        let backend = Arc::new(ScriptedBackend::default());
        let mut ads = AdLifecycle::start(AdConfig::default(), false, backend.clone()).await;

        assert_eq!(ads.show_banner().await, AdOutcome::Skipped);
        assert_eq!(ads.show_interstitial().await, AdOutcome::Skipped);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_initialization_disables_banner_calls() {
        let backend = Arc::new(ScriptedBackend {
            fail_init: true,
            ..ScriptedBackend::default()
        });
        let mut ads = AdLifecycle::start(AdConfig::default(), true, backend.clone()).await;

        assert!(!ads.state().initialized);
        assert_eq!(ads.show_banner().await, AdOutcome::Skipped);
        assert_eq!(backend.calls(), vec!["initialize".to_string()]);
    }

    #[tokio::test]
    async fn show_failure_is_logged_and_retried_next_time() {
        let backend = Arc::new(ScriptedBackend {
            fail_show: true,
            ..ScriptedBackend::default()
        });
        let mut ads = AdLifecycle::start(AdConfig::new(true), true, backend.clone()).await;

        assert_eq!(ads.show_banner().await, AdOutcome::Failed);
        assert!(!ads.state().banner_visible);
        assert_eq!(ads.show_banner().await, AdOutcome::Failed);
        assert_eq!(backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn teardown_hides_banner_and_deactivates() {
        let backend = Arc::new(ScriptedBackend::default());
        let mut ads = AdLifecycle::start(AdConfig::default(), true, backend.clone()).await;

        assert_eq!(ads.show_banner().await, AdOutcome::Applied);
        assert_eq!(ads.show_banner().await, AdOutcome::Skipped);
        assert_eq!(ads.teardown().await, AdOutcome::Applied);
        assert!(!ads.state().is_active());
        assert_eq!(ads.hide_banner().await, AdOutcome::Skipped);
        assert_eq!(
            backend.calls(),
            vec![
                "initialize".to_string(),
                format!("show:{BANNER_AD_UNIT_ID}"),
                "hide".to_string(),
            ]
        );
    }
}
