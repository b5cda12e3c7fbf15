//! CLI error type.

use std::path::PathBuf;

use pc_components::ComponentError;
use pc_core::CoreError;
use pc_fluids::FluidError;
use pc_graph::GraphError;
use pc_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot write output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {what}")]
    Input { what: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type AppResult<T> = Result<T, AppError>;

pub fn read_file(path: &std::path::Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
