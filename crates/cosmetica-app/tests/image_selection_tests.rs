//! Integration tests for image submissions.

mod common;

use std::sync::Arc;

use cosmetica_app::SubmitOutcome;
use cosmetica_lifecycle::AnalysisState;
use cosmetica_ui::{Notification, Screen};

#[tokio::test(start_paused = true)]
async fn image_selection_tests_missing_image_is_a_no_op() {
    let provider = Arc::new(common::CountingProvider::default());
    let ads = Arc::new(common::RecordingAdBackend::default());
    let mut controller = common::controller_with(provider.clone(), ads).await;

    let outcome = controller.submit_image(None).await;

    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(controller.lifecycle().state(), &AnalysisState::Idle);
    assert!(controller.drain_notifications().is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn image_selection_tests_selected_image_yields_image_result() {
    let provider = Arc::new(common::CountingProvider::default());
    let ads = Arc::new(common::RecordingAdBackend::default());
    let mut controller = common::controller_with(provider.clone(), ads).await;

    let outcome = controller.submit_image(Some(common::fixture_image())).await;

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert_eq!(controller.screen(), Screen::Results);
    assert_eq!(
        controller.drain_notifications(),
        vec![Notification::analysis_completed()]
    );
    let model = controller.display_model().expect("display model should exist");
    assert_eq!(model.brand, "SkinCare Pro");
    assert_eq!(model.rating_label, "4.5/5 (1247 reviews)");
}
