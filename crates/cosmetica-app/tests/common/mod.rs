//! Shared fixtures for app integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cosmetica_ads::{AdBackend, AdError, BannerOptions, InitOptions, InterstitialOptions};
use cosmetica_analysis_contract::{AnalysisProvider, MockAnalysisProvider, ProviderError};
use cosmetica_app::{AppConfig, AppController};
use cosmetica_core::{AnalysisInput, AnalysisResult, ImagePayload};

/// Mock provider that counts calls.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct CountingProvider {
    inner: MockAnalysisProvider,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisProvider for CountingProvider {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.analyze(input).await
    }
}

/// Provider that always fails.
#[allow(dead_code)]
#[derive(Debug)]
pub struct FailingProvider;

#[async_trait]
impl AnalysisProvider for FailingProvider {
    async fn analyze(&self, _input: &AnalysisInput) -> Result<AnalysisResult, ProviderError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Err(ProviderError::Unavailable("backend offline".to_string()))
    }
}

/// Ad backend that records calls and optionally fails every one of them.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingAdBackend {
    pub fail_all: bool,
    calls: Mutex<Vec<&'static str>>,
}

#[allow(dead_code)]
impl RecordingAdBackend {
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("call log lock should work").clone()
    }

    fn record(&self, call: &'static str) -> Result<(), AdError> {
        self.calls
            .lock()
            .expect("call log lock should work")
            .push(call);
        if self.fail_all {
            Err(AdError::Backend(format!("{call} refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AdBackend for RecordingAdBackend {
    async fn initialize(&self, _options: &InitOptions) -> Result<(), AdError> {
        // Initialization always succeeds so later calls reach the backend.
        self.calls
            .lock()
            .expect("call log lock should work")
            .push("initialize");
        Ok(())
    }

    async fn show_banner(&self, _options: &BannerOptions) -> Result<(), AdError> {
        self.record("show_banner")
    }

    async fn hide_banner(&self) -> Result<(), AdError> {
        self.record("hide_banner")
    }

    async fn show_interstitial(&self, _options: &InterstitialOptions) -> Result<(), AdError> {
        self.record("show_interstitial")
    }
}

/// Small JPEG-looking payload.
#[allow(dead_code)]
pub fn fixture_image() -> ImagePayload {
    ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
        .expect("image fixture should build")
}

/// Native-runtime config used by controller fixtures.
#[allow(dead_code)]
pub fn native_config() -> AppConfig {
    AppConfig {
        native_runtime: true,
        ..AppConfig::default()
    }
}

/// Controller over a counting mock provider and a recording ad backend.
#[allow(dead_code)]
pub async fn controller_with(
    provider: Arc<dyn AnalysisProvider>,
    ads: Arc<RecordingAdBackend>,
) -> AppController {
    AppController::new(&native_config(), provider, ads).await
}
