#![warn(missing_docs)]
//! # cosmetica-contract-tests
//!
//! Locates the frozen JSON contracts under the workspace `contracts/`
//! directory for schema validation tests.

use std::path::PathBuf;

/// Workspace `contracts/` directory.
pub fn contracts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../contracts")
}

/// Path of the analysis result schema.
pub fn analysis_result_schema() -> PathBuf {
    contracts_dir().join("analysis-result.schema.json")
}

/// Path of a named fixture.
pub fn fixture(name: &str) -> PathBuf {
    contracts_dir().join("fixtures").join(name)
}
