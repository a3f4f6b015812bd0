use std::fmt;

/// A sketch parameter that was rejected before any sampling happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid step must be positive and finite.
    Gap(f64),
    /// Grid extent must be non-negative and finite on both axes.
    Extent([f64; 2]),
    /// Scale factors must be positive and finite on both axes.
    Scale([f64; 2]),
    /// Extent and gap describe more sample centers than a grid may hold.
    TooManyCells([f64; 2], f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Gap(g) => write!(f, "grid gap must be positive, got {g}"),
            ConfigError::Extent([w, h]) => {
                write!(f, "grid extent must be non-negative, got {w} x {h}")
            }
            ConfigError::Scale([x, y]) => {
                write!(f, "scale factors must be positive, got ({x}, {y})")
            }
            ConfigError::TooManyCells([w, h], gap) => {
                write!(f, "grid of {w} x {h} with gap {gap} holds too many cells")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
