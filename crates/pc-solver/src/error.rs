//! Error types for cycle solving.

use pc_components::ComponentError;
use pc_fluids::FluidError;
use pc_graph::GraphError;
use thiserror::Error;

use crate::solution::CycleSolution;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Cycle setup error: {what}")]
    Setup { what: String },

    #[error("Component '{component}' failed: {source}")]
    Component {
        component: String,
        #[source]
        source: ComponentError,
    },

    #[error("Cycle did not converge in {iterations} passes, largest residual {residual:e}")]
    MaxIterExceeded {
        iterations: usize,
        residual: f64,
        /// Cycle state after the last pass.
        last: Box<CycleSolution>,
    },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Topology error: {0}")]
    Graph(#[from] GraphError),
}

impl SolverError {
    /// Whether the failure is a spent iteration budget rather than a hard error.
    pub fn is_convergence(&self) -> bool {
        match self {
            SolverError::MaxIterExceeded { .. } => true,
            SolverError::Component { source, .. } => {
                source.class() == pc_components::ErrorClass::Convergence
            }
            _ => false,
        }
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
