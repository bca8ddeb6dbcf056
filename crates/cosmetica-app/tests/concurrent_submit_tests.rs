//! Integration tests for overlapping submissions.

use std::sync::Arc;

use cosmetica_analysis_contract::MockAnalysisProvider;
use cosmetica_core::{AnalysisInput, NameQuery};
use cosmetica_lifecycle::{AnalysisClient, AnalysisLifecycle, LifecycleError};

#[tokio::test(start_paused = true)]
async fn concurrent_submit_tests_rejects_start_while_pending() {
    let client = AnalysisClient::new(Arc::new(MockAnalysisProvider::default()));
    let mut lifecycle = AnalysisLifecycle::new();
    let (pending, _input) = lifecycle
        .start_name("Serum", Some("Acme"))
        .expect("start should pass");

    let second = AnalysisInput::Name(NameQuery::new("Cream", None).expect("query should build"));
    let error = client
        .submit(&mut lifecycle, Some(second))
        .await
        .expect_err("submit should be rejected while pending");

    assert!(matches!(error, LifecycleError::AlreadyPending(token) if token == pending));
    assert_eq!(lifecycle.current_token(), Some(pending));
}
