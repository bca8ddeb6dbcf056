#![warn(missing_docs)]
//! # cosmetica-analysis-contract
//!
//! ## Purpose
//! Defines the analysis provider boundary and the built-in mock provider.
//!
//! ## Responsibilities
//! - Expose [`AnalysisProvider`], the asynchronous capability that turns one
//!   [`AnalysisInput`] into one [`AnalysisResult`].
//! - Classify provider failures as [`ProviderError`].
//! - Ship [`MockAnalysisProvider`], a fixed-delay provider returning canned
//!   results per input mode.
//!
//! ## Data flow
//! Lifecycle driver -> [`AnalysisProvider::analyze`] -> validated
//! [`AnalysisResult`] or [`ProviderError`].
//!
//! ## Ownership and lifetimes
//! Providers borrow the input for the duration of the call and return an
//! owned result, so a pending call never pins lifecycle state.
//!
//! ## Error model
//! Every failure is a [`ProviderError`]. Errors are cloneable so the
//! lifecycle can hold them in its `Failed` state.
//!
//! ## Security and privacy notes
//! Image bytes are passed through untouched and never logged.

use std::time::Duration;

use async_trait::async_trait;
use cosmetica_core::{AnalysisInput, AnalysisResult, Ingredient, NameQuery, SafetyRating};
use thiserror::Error;

/// Delay applied by the mock provider when none is configured.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(3_000);

/// Brand substituted when a name query carries no brand.
pub const DEFAULT_BRAND: &str = "Generic Brand";

/// Asynchronous capability that analyzes one product input.
///
/// Implementations resolve exactly once per call, with no partial results.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyzes a product input.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the backend is unreachable, rejects the
    /// input, or produces an invalid result.
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, ProviderError>;
}

/// Provider failures surfaced to the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Backend could not be reached or timed out.
    #[error("analysis provider unavailable: {0}")]
    Unavailable(String),
    /// Backend refused the input (for example, no product recognized).
    #[error("analysis rejected: {0}")]
    Rejected(String),
    /// Backend answered with a result that violates the contract.
    #[error("invalid analysis result: {0}")]
    InvalidResult(String),
}

/// Checks a provider result before it is handed to the lifecycle.
///
/// # Errors
/// Returns [`ProviderError::InvalidResult`] when core invariants fail.
pub fn ensure_valid_result(result: AnalysisResult) -> Result<AnalysisResult, ProviderError> {
    result
        .validate()
        .map_err(|error| ProviderError::InvalidResult(error.to_string()))?;
    Ok(result)
}

/// Fixed-delay provider returning canned results.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    delay: Duration,
}

impl MockAnalysisProvider {
    /// Creates a mock provider with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, ProviderError> {
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(
            stage = "provider",
            action = "mock_analyze",
            mode = ?input.mode(),
            delay_ms,
            "simulating analysis"
        );
        tokio::time::sleep(self.delay).await;

        let result = match input {
            AnalysisInput::Image(_) => image_result(),
            AnalysisInput::Name(query) => name_result(query),
        };
        ensure_valid_result(result)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn ingredient(
    name: &str,
    purpose: &str,
    benefits: &[&str],
    concerns: &[&str],
    safety_rating: SafetyRating,
) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        purpose: purpose.to_string(),
        benefits: strings(benefits),
        concerns: strings(concerns),
        safety_rating,
    }
}

/// Canned result for photo submissions.
pub fn image_result() -> AnalysisResult {
    AnalysisResult {
        product_name: "Advanced Vitamin C Serum".to_string(),
        brand: "SkinCare Pro".to_string(),
        category: "Face Serum".to_string(),
        description: "A powerful anti-aging serum with 20% Vitamin C, designed to brighten skin \
                      tone and reduce fine lines."
            .to_string(),
        overall_rating: 4.5,
        review_count: 1247,
        key_benefits: strings(&[
            "Brightening",
            "Anti-aging",
            "Antioxidant Protection",
            "Collagen Boost",
        ]),
        skin_types: strings(&["Normal", "Dry", "Combination"]),
        texture: "Lightweight liquid".to_string(),
        scent: "Citrus".to_string(),
        price_range: "$25-35".to_string(),
        availability: "Available online and in stores".to_string(),
        ingredients: vec![
            ingredient(
                "L-Ascorbic Acid (Vitamin C)",
                "Antioxidant and brightening agent",
                &[
                    "Collagen synthesis",
                    "Skin brightening",
                    "Free radical protection",
                ],
                &["May cause irritation in sensitive skin"],
                SafetyRating::Safe,
            ),
            ingredient(
                "Hyaluronic Acid",
                "Humectant",
                &["Deep hydration", "Plumping effect", "Moisture retention"],
                &[],
                SafetyRating::Safe,
            ),
            ingredient(
                "Niacinamide",
                "Skin conditioning agent",
                &["Pore minimizing", "Oil control", "Skin barrier support"],
                &[],
                SafetyRating::Safe,
            ),
        ],
        warnings: strings(&["Patch test recommended", "Use sunscreen during the day"]),
        usage: "Apply 2-3 drops to clean skin in the morning. Follow with moisturizer and SPF."
            .to_string(),
        formula: strings(&[
            "Water",
            "L-Ascorbic Acid",
            "Propylene Glycol",
            "Hyaluronic Acid",
            "Niacinamide",
            "Vitamin E Acetate",
            "Citric Acid",
            "Sodium Benzoate",
        ]),
    }
}

/// Canned result for name submissions, echoing the queried product.
pub fn name_result(query: &NameQuery) -> AnalysisResult {
    let product_name = query.product_name.clone();
    let brand = query
        .brand_name
        .as_deref()
        .filter(|brand| !brand.trim().is_empty())
        .unwrap_or(DEFAULT_BRAND)
        .to_string();

    AnalysisResult {
        description: format!(
            "{product_name} is a high-quality cosmetic product designed to enhance your beauty \
             routine with effective ingredients."
        ),
        product_name,
        brand,
        category: "Skincare Product".to_string(),
        overall_rating: 4.2,
        review_count: 892,
        key_benefits: strings(&["Moisturizing", "Nourishing", "Gentle Formula", "Long-lasting"]),
        skin_types: strings(&["All Skin Types"]),
        texture: "Smooth cream".to_string(),
        scent: "Light fragrance".to_string(),
        price_range: "$15-45".to_string(),
        availability: "Available in most beauty stores".to_string(),
        ingredients: vec![
            ingredient(
                "Glycerin",
                "Humectant",
                &["Moisture retention", "Skin softening", "Barrier protection"],
                &[],
                SafetyRating::Safe,
            ),
            ingredient(
                "Cetyl Alcohol",
                "Emollient",
                &["Skin conditioning", "Texture enhancement"],
                &[],
                SafetyRating::Safe,
            ),
            ingredient(
                "Parfum",
                "Fragrance",
                &["Pleasant scent"],
                &["May cause allergic reactions in sensitive individuals"],
                SafetyRating::Caution,
            ),
        ],
        warnings: strings(&["For external use only", "Avoid contact with eyes"]),
        usage: "Apply to clean skin as needed. Use daily for best results.".to_string(),
        formula: strings(&[
            "Aqua",
            "Glycerin",
            "Cetyl Alcohol",
            "Stearyl Alcohol",
            "Dimethicone",
            "Parfum",
            "Tocopherol",
            "Phenoxyethanol",
        ]),
    }
}
