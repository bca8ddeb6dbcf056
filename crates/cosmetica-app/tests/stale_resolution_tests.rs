//! Integration tests for abandoned requests.

use std::sync::Arc;

use cosmetica_analysis_contract::MockAnalysisProvider;
use cosmetica_core::{AnalysisInput, NameQuery};
use cosmetica_lifecycle::{AnalysisClient, AnalysisLifecycle, AnalysisState, Resolution};

#[tokio::test(start_paused = true)]
async fn stale_resolution_tests_late_result_after_reset_is_discarded() {
    let client = AnalysisClient::new(Arc::new(MockAnalysisProvider::default()));
    let mut lifecycle = AnalysisLifecycle::new();

    let (abandoned, input) = lifecycle
        .start_name("Lip Balm", None)
        .expect("start should pass");
    lifecycle.reset();

    let late = client.analyze(abandoned, &input).await;
    assert_eq!(lifecycle.complete(abandoned, late), Resolution::Stale);
    assert_eq!(lifecycle.state(), &AnalysisState::Idle);
}

#[tokio::test(start_paused = true)]
async fn stale_resolution_tests_newer_request_wins() {
    let client = AnalysisClient::new(Arc::new(MockAnalysisProvider::default()));
    let mut lifecycle = AnalysisLifecycle::new();
    let first_input = AnalysisInput::Name(
        NameQuery::new("Old Query", None).expect("query should build"),
    );

    let first = lifecycle.start(Some(&first_input)).expect("start should pass");
    lifecycle.reset();
    let second = client
        .submit(
            &mut lifecycle,
            Some(AnalysisInput::Name(
                NameQuery::new("New Query", None).expect("query should build"),
            )),
        )
        .await
        .expect("submit should pass");
    assert_eq!(second, Resolution::Completed);

    let late = client.analyze(first, &first_input).await;
    assert_eq!(lifecycle.complete(first, late), Resolution::Stale);
    let held = lifecycle.result().expect("newer result should be held");
    assert_eq!(held.product_name, "New Query");
}
