//! Result vocabulary shared by every compression strategy.
//!
//! A strategy never returns an error for a per-image problem. It returns a
//! [`StrategyResult`] whose [`Outcome`] tells the caller whether to persist
//! the image, and whose detail string says why.

use image::DynamicImage;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Transform applied and every size constraint holds.
    Success,
    /// Transform applied but a soft floor was violated. The image is still saved.
    SuccessWithWarning,
    /// No usable image was produced. Nothing is saved for this input.
    Failure,
}

impl Outcome {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Outcome::Failure)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::SuccessWithWarning => "Success with warning",
            Outcome::Failure => "Failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The `(image, outcome, detail)` triple every strategy returns.
///
/// The constructors keep the image and the outcome consistent: a failure never
/// carries an image and the other two outcomes always do.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    image: Option<DynamicImage>,
    outcome: Outcome,
    detail: String,
}

impl StrategyResult {
    pub fn success(image: DynamicImage, detail: impl Into<String>) -> Self {
        Self::new(Some(image), Outcome::Success, detail.into())
    }

    pub fn warning(image: DynamicImage, detail: impl Into<String>) -> Self {
        Self::new(Some(image), Outcome::SuccessWithWarning, detail.into())
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self::new(None, Outcome::Failure, detail.into())
    }

    /// Picks `Success` or `SuccessWithWarning` depending on whether a soft
    /// constraint was violated.
    pub fn checked(image: DynamicImage, violated: bool, detail: impl Into<String>) -> Self {
        if violated {
            Self::warning(image, detail)
        } else {
            Self::success(image, detail)
        }
    }

    fn new(image: Option<DynamicImage>, outcome: Outcome, detail: String) -> Self {
        debug_assert!(!detail.is_empty(), "strategy detail must not be empty");
        Self {
            image,
            outcome,
            detail,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn into_parts(self) -> (Option<DynamicImage>, Outcome, String) {
        (self.image, self.outcome, self.detail)
    }
}
