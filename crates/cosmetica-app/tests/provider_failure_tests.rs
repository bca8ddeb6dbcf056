//! Integration tests for provider failure handling.

mod common;

use std::sync::Arc;

use cosmetica_app::SubmitOutcome;
use cosmetica_core::InputMode;
use cosmetica_lifecycle::AnalysisState;
use cosmetica_ui::{Notification, Screen};

#[tokio::test(start_paused = true)]
async fn provider_failure_tests_toast_and_return_to_idle() {
    let ads = Arc::new(common::RecordingAdBackend::default());
    let mut controller = common::controller_with(Arc::new(common::FailingProvider), ads).await;

    let outcome = controller.submit_name("Night Cream", None).await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.lifecycle().state(), &AnalysisState::Idle);
    assert_eq!(controller.screen(), Screen::Input);
    assert_eq!(
        controller.drain_notifications(),
        vec![Notification::analysis_failed(InputMode::Name)]
    );

    let outcome = controller.submit_image(Some(common::fixture_image())).await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(
        controller.drain_notifications(),
        vec![Notification::analysis_failed(InputMode::Image)]
    );
}
