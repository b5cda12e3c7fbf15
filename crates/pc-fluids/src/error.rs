//! Fluid property errors.

use thiserror::Error;

use crate::species::Species;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// State outside the range the backend can evaluate.
    #[error("Infeasible {species} state from {pair}: {message}")]
    Infeasible {
        species: Species,
        pair: String,
        message: String,
    },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported by this backend.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// A property the caller needs was not produced (e.g. transport inside the dome).
    #[error("Property '{what}' unavailable for {species} at p={p} Pa, T={t} K")]
    Unavailable {
        what: &'static str,
        species: Species,
        p: f64,
        t: f64,
    },

    /// Mass flow read before it was resolved.
    #[error("Mass flow of {what} has not been resolved")]
    UnresolvedMassFlow { what: String },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FluidError::Infeasible {
            species: Species::He,
            pair: "PT(p=1 Pa, T=1 K)".into(),
            message: "below triple point".into(),
        };
        let text = err.to_string();
        assert!(text.contains("He"));
        assert!(text.contains("triple"));
    }
}
