//! Error types for component operations.

use pc_core::CoreError;
use pc_correlations::CorrelationError;
use pc_fluids::FluidError;
use thiserror::Error;

/// Broad class of a failure, used by callers deciding whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The model was set up wrongly; retrying cannot help.
    Configuration,
    /// The requested operating point does not exist.
    Infeasible,
    /// An iteration cap was reached.
    Convergence,
}

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{component}: {what}")]
    Config { component: String, what: String },

    #[error("{component}: attribute '{attr}' cannot be sized on this component")]
    UnsupportedAttr { component: String, attr: String },

    #[error("{component}: infeasible {what}")]
    Infeasible { component: String, what: String },

    #[error(
        "{component}: bounds [{lo}, {hi}] for '{attr}' do not bracket a solution \
         (residual {f_lo:.6e} .. {f_hi:.6e})"
    )]
    NotBracketed {
        component: String,
        attr: &'static str,
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("{component}: temperature profiles cross at node {node} (dT = {dt:.4} K)")]
    PinchCrossing {
        component: String,
        node: usize,
        dt: f64,
    },

    #[error("{component}: {what} did not converge in {iterations} iterations (residual {residual:.6e})")]
    Convergence {
        component: String,
        what: &'static str,
        iterations: usize,
        residual: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ComponentError::InvalidArg { .. }
            | ComponentError::Config { .. }
            | ComponentError::UnsupportedAttr { .. }
            | ComponentError::Correlation(_) => ErrorClass::Configuration,
            ComponentError::Fluid(FluidError::UnresolvedMassFlow { .. }) => {
                ErrorClass::Configuration
            }
            ComponentError::Core(CoreError::InvalidBounds { .. })
            | ComponentError::Core(CoreError::InvalidConfig { .. }) => ErrorClass::Configuration,
            ComponentError::Convergence { .. }
            | ComponentError::Core(CoreError::MaxIterations { .. }) => ErrorClass::Convergence,
            _ => ErrorClass::Infeasible,
        }
    }

    /// Attach component and attribute context to a root-finder failure.
    pub(crate) fn in_sizing(self, component: &str, attr: &'static str) -> Self {
        match self {
            ComponentError::Core(CoreError::NotBracketed { lo, hi, f_lo, f_hi }) => {
                ComponentError::NotBracketed {
                    component: component.to_owned(),
                    attr,
                    lo,
                    hi,
                    f_lo,
                    f_hi,
                }
            }
            ComponentError::Core(CoreError::MaxIterations {
                iterations,
                residual,
                ..
            }) => ComponentError::Convergence {
                component: component.to_owned(),
                what: attr,
                iterations,
                residual,
            },
            ComponentError::Core(CoreError::InvalidBounds { lo, hi }) => ComponentError::Config {
                component: component.to_owned(),
                what: format!("malformed bounds [{lo}, {hi}] for '{attr}'"),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::Infeasible {
            component: "clr".into(),
            what: "pressure mismatch".into(),
        };
        assert!(err.to_string().contains("clr"));
        assert_eq!(err.class(), ErrorClass::Infeasible);
    }

    #[test]
    fn root_errors_gain_context() {
        let err = ComponentError::from(CoreError::NotBracketed {
            lo: 0.0,
            hi: 1.0,
            f_lo: 1.0,
            f_hi: 2.0,
        })
        .in_sizing("clr", "m");
        assert!(matches!(err, ComponentError::NotBracketed { attr: "m", .. }));

        let err = ComponentError::from(CoreError::MaxIterations {
            iterations: 50,
            x: 0.5,
            residual: 1e-3,
        })
        .in_sizing("clr", "m");
        assert_eq!(err.class(), ErrorClass::Convergence);

        let err = ComponentError::from(CoreError::InvalidBounds { lo: 2.0, hi: 1.0 })
            .in_sizing("clr", "m");
        assert_eq!(err.class(), ErrorClass::Configuration);
    }
}
