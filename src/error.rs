//! Error types for sample-size calculation.

/// Errors returned by the calculator, its metrics and the sample-size search.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A metric, configuration value or solver input is malformed.
    ///
    /// Raised at construction or registration time; values are never
    /// silently coerced.
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Human-readable explanation.
        message: String,
    },

    /// The search exhausted its bracket or iteration budget without
    /// reaching the requested power within tolerance.
    PowerUnattainable {
        /// The power originally requested.
        power: f64,
    },

    /// A request document could not be parsed.
    Request(String),
}

impl Error {
    /// Build an [`Error::InvalidParameter`] with a custom message.
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build the error for a parameter that must be strictly positive.
    pub fn not_positive(name: impl Into<String>) -> Self {
        let name = name.into();
        let message = format!("Error: Please provide a positive number for {}.", name);
        Self::InvalidParameter { name, message }
    }

    /// Name of the offending parameter, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { message, .. } => write!(f, "{}", message),
            Self::PowerUnattainable { power } => write!(
                f,
                "Couldn't find a sample size that satisfies the power you requested: {}",
                power
            ),
            Self::Request(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Result type for sample-size operations.
pub type Result<T> = std::result::Result<T, Error>;
