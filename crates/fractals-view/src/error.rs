use thiserror::Error;

/// Validation failures at the edge of the viewport core.
///
/// The math itself never fails; these errors are produced only where external
/// input (window sizes, user-entered numbers) enters the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("screen size must be positive and finite, got {width}x{height}")]
    DegenerateScreen { width: f64, height: f64 },

    #[error("`{text}` is not a valid number")]
    InvalidNumber { text: String },
}
