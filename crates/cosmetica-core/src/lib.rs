#![warn(missing_docs)]
//! # cosmetica-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `cosmetica` workspace.
//!
//! ## Responsibilities
//! - Represent analyzed ingredients and complete product analysis results.
//! - Represent the two submission inputs (image payload, name query) with
//!   validating constructors.
//! - Encode/decode analysis results for transport.
//!
//! ## Data flow
//! UI input is validated into [`AnalysisInput`]. An analysis provider turns it
//! into one [`AnalysisResult`], which is handed to the presentation layer and
//! dropped again when the user resets.
//!
//! ## Ownership and lifetimes
//! All values own their buffers (`String`, `Vec<u8>`) so results can outlive
//! the provider call that produced them without borrow coupling.
//!
//! ## Error model
//! Validation failures (blank product name, empty image, out-of-range rating)
//! return [`CoreError`] variants with caller-actionable categorization.
//!
//! ## Security and privacy notes
//! [`ImagePayload`] never prints its bytes in `Debug` output, so payloads are
//! safe to pass through structured logs.
//!
//! ## Example
//! ```rust
//! use cosmetica_core::{AnalysisInput, InputMode, NameQuery};
//!
//! let query = NameQuery::new("Vitamin C Serum", Some("")).unwrap();
//! assert_eq!(query.brand_name, None);
//! assert_eq!(AnalysisInput::Name(query).mode(), InputMode::Name);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the overall product rating scale.
pub const MAX_RATING: f32 = 5.0;

/// Safety classification of one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyRating {
    /// No known concerns at typical concentrations.
    Safe,
    /// Usable, but may irritate some users.
    Caution,
    /// Should be avoided.
    Avoid,
}

impl SafetyRating {
    /// All ratings in display order.
    pub const ALL: [SafetyRating; 3] = [Self::Safe, Self::Caution, Self::Avoid];

    /// Lowercase label used on badges and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::Avoid => "avoid",
        }
    }
}

impl fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One formula constituent under analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// INCI or common name.
    pub name: String,
    /// Short functional description.
    pub purpose: String,
    /// Benefits in display order.
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Concerns in display order; empty means none flagged.
    #[serde(default)]
    pub concerns: Vec<String>,
    /// Safety classification.
    #[serde(rename = "rating")]
    pub safety_rating: SafetyRating,
}

/// Output of one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Recognized product name.
    pub product_name: String,
    /// Brand name.
    pub brand: String,
    /// Product category (for example `Face Serum`).
    pub category: String,
    /// Free-text product description.
    pub description: String,
    /// Overall rating in `[0, 5]`.
    #[serde(rename = "rating")]
    pub overall_rating: f32,
    /// Number of reviews backing the rating.
    pub review_count: u32,
    /// Headline benefits.
    #[serde(default)]
    pub key_benefits: Vec<String>,
    /// Skin types the product suits.
    #[serde(default)]
    pub skin_types: Vec<String>,
    /// Texture description.
    pub texture: String,
    /// Scent description.
    pub scent: String,
    /// Price range, free text.
    pub price_range: String,
    /// Where the product can be bought.
    pub availability: String,
    /// Analyzed ingredient details.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Usage warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Usage directions.
    pub usage: String,
    /// Full ingredient declaration, independent of `ingredients`.
    #[serde(default)]
    pub formula: Vec<String>,
}

impl AnalysisResult {
    /// Checks numeric invariants of the result.
    ///
    /// # Errors
    /// Returns [`CoreError::RatingOutOfRange`] when `overall_rating` is not a
    /// finite value in `[0, 5]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        let rating = self.overall_rating;
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(CoreError::RatingOutOfRange(rating));
        }
        Ok(())
    }

    /// Returns analyzed ingredient names that do not appear in `formula`.
    ///
    /// Matching is case-insensitive on trimmed names. An empty return means
    /// the detail list is consistent with the declaration.
    pub fn unlisted_ingredients(&self) -> Vec<&str> {
        let declared: Vec<String> = self
            .formula
            .iter()
            .map(|entry| entry.trim().to_lowercase())
            .collect();

        self.ingredients
            .iter()
            .map(|ingredient| ingredient.name.as_str())
            .filter(|name| !declared.contains(&name.trim().to_lowercase()))
            .collect()
    }

    /// Encodes the result as JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Decode)
    }

    /// Decodes and validates a result from JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] for malformed JSON and
    /// [`CoreError::RatingOutOfRange`] for invalid ratings.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let parsed: Self = serde_json::from_slice(bytes).map_err(CoreError::Decode)?;
        parsed.validate()?;
        Ok(parsed)
    }
}

/// Photo submission: opaque image bytes plus declared media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Encoded image bytes; never inspected by this crate.
    pub bytes: Vec<u8>,
    /// Declared media type, always `image/*`.
    pub media_type: String,
}

impl ImagePayload {
    /// Constructs a validated image payload.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyImage`] for empty buffers and
    /// [`CoreError::UnsupportedMediaType`] for non-`image/*` types.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Result<Self, CoreError> {
        let media_type = media_type.into().trim().to_ascii_lowercase();
        if bytes.is_empty() {
            return Err(CoreError::EmptyImage);
        }
        if !media_type.starts_with("image/") || media_type.len() == "image/".len() {
            return Err(CoreError::UnsupportedMediaType(media_type));
        }

        Ok(Self { bytes, media_type })
    }

    /// Guesses an image media type from a file extension.
    pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "webp" => Some("image/webp"),
            "gif" => Some("image/gif"),
            "heic" => Some("image/heic"),
            _ => None,
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.bytes.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// Typed product lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    /// Non-blank product name.
    pub product_name: String,
    /// Optional brand; blank input is normalized to `None`.
    pub brand_name: Option<String>,
}

impl NameQuery {
    /// Constructs a validated name query.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyProductName`] when the product name is empty
    /// or whitespace.
    pub fn new(
        product_name: impl Into<String>,
        brand_name: Option<&str>,
    ) -> Result<Self, CoreError> {
        let product_name = product_name.into();
        if product_name.trim().is_empty() {
            return Err(CoreError::EmptyProductName);
        }

        let brand_name = brand_name
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
            .map(str::to_string);

        Ok(Self {
            product_name,
            brand_name,
        })
    }
}

/// Which input tab produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Photo upload.
    Image,
    /// Typed product name.
    Name,
}

/// Input to one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// Photo submission.
    Image(ImagePayload),
    /// Name submission.
    Name(NameQuery),
}

impl AnalysisInput {
    /// Returns the input mode of this submission.
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Image(_) => InputMode::Image,
            Self::Name(_) => InputMode::Name,
        }
    }
}

/// Core validation and codec errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product name was empty or whitespace.
    #[error("product name must be non-empty")]
    EmptyProductName,
    /// Image payload contained no bytes.
    #[error("image payload is empty")]
    EmptyImage,
    /// Declared media type is not an image.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    /// Overall rating is outside `[0, 5]`.
    #[error("rating {0} is outside [0, 5]")]
    RatingOutOfRange(f32),
    /// JSON encode/decode failure.
    #[error("result codec failure: {0}")]
    Decode(#[from] serde_json::Error),
}
