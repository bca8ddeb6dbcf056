#![warn(missing_docs)]
//! # cosmetica-ui
//!
//! ## Purpose
//! Defines the UI-facing projection of analysis results and user
//! notifications for `cosmetica`.
//!
//! ## Responsibilities
//! - Map a completed [`AnalysisResult`] into a [`DisplayModel`].
//! - Render the five-marker star strip for an overall rating.
//! - Group ingredients by safety rating for badge coloring.
//! - Omit empty warning/formula sections instead of rendering them blank.
//! - Describe success/failure toasts as [`Notification`] values.
//!
//! ## Data flow
//! Lifecycle `Complete(result)` -> [`DisplayModel::from_result`] -> shell
//! renderer. Lifecycle terminal transitions -> [`Notification`] queue.
//!
//! ## Ownership and lifetimes
//! The display model owns its strings so the held result can be dropped on
//! reset while a frame is still being drawn.
//!
//! ## Error model
//! Projection is total: any well-formed result maps to a display model.
//! Out-of-range ratings are clamped rather than rejected.

use cosmetica_core::{AnalysisResult, Ingredient, InputMode, MAX_RATING, SafetyRating};

/// Number of markers in the rating strip.
pub const STAR_COUNT: usize = 5;

/// One marker in the rating strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarMarker {
    /// Filled star.
    Full,
    /// Half-filled star.
    Half,
    /// Outline star.
    Empty,
}

/// Badge color for an ingredient rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    /// Safe ingredients.
    Green,
    /// Caution ingredients.
    Yellow,
    /// Ingredients to avoid.
    Red,
}

impl From<SafetyRating> for BadgeTone {
    fn from(rating: SafetyRating) -> Self {
        match rating {
            SafetyRating::Safe => Self::Green,
            SafetyRating::Caution => Self::Yellow,
            SafetyRating::Avoid => Self::Red,
        }
    }
}

/// Renders `rating` into exactly [`STAR_COUNT`] markers.
///
/// `floor(rating)` full stars, one half star when the rating has a fractional
/// part, and the remainder empty. Ratings outside `[0, 5]` are clamped and
/// NaN renders as zero.
pub fn render_stars(rating: f32) -> [StarMarker; STAR_COUNT] {
    let rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    };

    let full = rating.floor() as usize;
    let has_half = rating.fract() != 0.0;

    let mut markers = [StarMarker::Empty; STAR_COUNT];
    for marker in markers.iter_mut().take(full) {
        *marker = StarMarker::Full;
    }
    if has_half {
        markers[full] = StarMarker::Half;
    }
    markers
}

/// Display projection of one ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientView {
    /// Ingredient name.
    pub name: String,
    /// Functional description.
    pub purpose: String,
    /// Safety rating label source.
    pub rating: SafetyRating,
    /// Badge color.
    pub tone: BadgeTone,
    /// Benefits; `None` when there are none to show.
    pub benefits: Option<Vec<String>>,
    /// Concerns; `None` when there are none to show.
    pub concerns: Option<Vec<String>>,
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            purpose: ingredient.purpose.clone(),
            rating: ingredient.safety_rating,
            tone: ingredient.safety_rating.into(),
            benefits: non_empty(&ingredient.benefits),
            concerns: non_empty(&ingredient.concerns),
        }
    }
}

/// Ingredients sharing one safety rating, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientGroup {
    /// Shared rating.
    pub rating: SafetyRating,
    /// Badge color of the group.
    pub tone: BadgeTone,
    /// Member ingredients.
    pub ingredients: Vec<IngredientView>,
}

/// Everything the results screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    /// Product name headline.
    pub product_name: String,
    /// Brand line.
    pub brand: String,
    /// Category badge.
    pub category: String,
    /// Product description.
    pub description: String,
    /// Rating strip.
    pub stars: [StarMarker; STAR_COUNT],
    /// Rating caption, for example `4.5/5 (1247 reviews)`.
    pub rating_label: String,
    /// Headline benefits.
    pub key_benefits: Vec<String>,
    /// Suitable skin types.
    pub skin_types: Vec<String>,
    /// Texture description.
    pub texture: String,
    /// Scent description.
    pub scent: String,
    /// Price range.
    pub price_range: String,
    /// Availability note.
    pub availability: String,
    /// Usage directions.
    pub usage: String,
    /// Ingredients in original order.
    pub ingredients: Vec<IngredientView>,
    /// Ingredients partitioned by rating, in `safe`, `caution`, `avoid` order.
    pub ingredient_groups: Vec<IngredientGroup>,
    /// Warnings section; absent when the result lists none.
    pub warnings: Option<Vec<String>>,
    /// Full formula line; absent when the result lists no formula.
    pub formula: Option<String>,
}

impl DisplayModel {
    /// Projects a completed result into the display model.
    pub fn from_result(result: &AnalysisResult) -> Self {
        let ingredients: Vec<IngredientView> =
            result.ingredients.iter().map(IngredientView::from).collect();

        let ingredient_groups = SafetyRating::ALL
            .into_iter()
            .map(|rating| IngredientGroup {
                rating,
                tone: rating.into(),
                ingredients: ingredients
                    .iter()
                    .filter(|view| view.rating == rating)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            product_name: result.product_name.clone(),
            brand: result.brand.clone(),
            category: result.category.clone(),
            description: result.description.clone(),
            stars: render_stars(result.overall_rating),
            rating_label: format!(
                "{}/5 ({} reviews)",
                result.overall_rating, result.review_count
            ),
            key_benefits: result.key_benefits.clone(),
            skin_types: result.skin_types.clone(),
            texture: result.texture.clone(),
            scent: result.scent.clone(),
            price_range: result.price_range.clone(),
            availability: result.availability.clone(),
            usage: result.usage.clone(),
            ingredients,
            ingredient_groups,
            warnings: non_empty(&result.warnings),
            formula: (!result.formula.is_empty()).then(|| result.formula.join(", ")),
        }
    }

    /// Returns the group for `rating`.
    pub fn group(&self, rating: SafetyRating) -> &[IngredientView] {
        self.ingredient_groups
            .iter()
            .find(|group| group.rating == rating)
            .map(|group| group.ingredients.as_slice())
            .unwrap_or_default()
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Green toast.
    Success,
    /// Red toast.
    Error,
}

/// One transient user-visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Message text.
    pub message: String,
}

impl Notification {
    /// Blank product name on the name form.
    pub fn missing_product_name() -> Self {
        Self::error("Please enter a product name")
    }

    /// Analysis finished.
    pub fn analysis_completed() -> Self {
        Self {
            level: NotificationLevel::Success,
            message: "Analysis completed successfully!".to_string(),
        }
    }

    /// Analysis failed for a submission made in `mode`.
    pub fn analysis_failed(mode: InputMode) -> Self {
        match mode {
            InputMode::Image => Self::error("Failed to analyze the image. Please try again."),
            InputMode::Name => Self::error("Failed to analyze the product. Please try again."),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.to_string(),
        }
    }
}

/// Screen currently shown by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Tabbed input forms.
    Input,
    /// Results view for a completed analysis.
    Results,
}

#[cfg(test)]
mod tests {
    //! Unit tests for star rendering and conditional sections.

    use super::*;

    fn count(markers: &[StarMarker], kind: StarMarker) -> usize {
        markers.iter().filter(|marker| **marker == kind).count()
    }

    #[test]
    fn star_strip_always_has_five_markers() {
        for (rating, full, half, empty) in [
            (0.0, 0, 0, 5),
            (0.5, 0, 1, 4),
            (2.5, 2, 1, 2),
            (4.9, 4, 1, 0),
            (5.0, 5, 0, 0),
        ] {
            let markers = render_stars(rating);
            assert_eq!(markers.len(), STAR_COUNT);
            assert_eq!(count(&markers, StarMarker::Full), full, "full for {rating}");
            assert_eq!(count(&markers, StarMarker::Half), half, "half for {rating}");
            assert_eq!(count(&markers, StarMarker::Empty), empty, "empty for {rating}");
        }
    }

    #[test]
    fn star_strip_clamps_out_of_range_input() {
        assert_eq!(render_stars(7.0), [StarMarker::Full; STAR_COUNT]);
        assert_eq!(render_stars(-1.0), [StarMarker::Empty; STAR_COUNT]);
        assert_eq!(render_stars(f32::NAN), [StarMarker::Empty; STAR_COUNT]);
    }

    #[test]
    fn half_star_follows_full_stars() {
        assert_eq!(
            render_stars(3.5),
            [
                StarMarker::Full,
                StarMarker::Full,
                StarMarker::Full,
                StarMarker::Half,
                StarMarker::Empty,
            ]
        );
    }

    #[test]
    fn failure_toast_depends_on_input_mode() {
        assert_ne!(
            Notification::analysis_failed(InputMode::Image),
            Notification::analysis_failed(InputMode::Name)
        );
        assert_eq!(
            Notification::missing_product_name().level,
            NotificationLevel::Error
        );
    }
}
