use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Malformed bounds [{lo}, {hi}]")]
    InvalidBounds { lo: f64, hi: f64 },

    #[error("Bounds [{lo}, {hi}] do not bracket a root (f(lo)={f_lo:.6e}, f(hi)={f_hi:.6e})")]
    NotBracketed {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("Root finder exhausted {iterations} iterations (x={x}, residual={residual:.6e})")]
    MaxIterations {
        iterations: usize,
        x: f64,
        residual: f64,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::InvalidConfig {
            what: err.to_string(),
        }
    }
}
