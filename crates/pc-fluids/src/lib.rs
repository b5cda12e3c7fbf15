//! pc-fluids: fluid properties and flow states for power-cycle simulation.
//!
//! Provides:
//! - Working and secondary fluid identifiers (`Species`)
//! - Input pairs that fix a state (`InputPair`)
//! - The `PropertyBackend` trait with CoolProp and perfect-gas implementations
//! - `FlowState`: a fully evaluated state with its mass flow
//! - Saturation queries and a sampled `PhaseEnvelope`
//!
//! # Example
//!
//! ```no_run
//! use pc_core::units::{k, mpa};
//! use pc_fluids::{CoolPropModel, FlowState, InputPair, MassFlow, Species};
//!
//! let model = CoolPropModel::new();
//! let state = FlowState::new(
//!     &model,
//!     Species::He,
//!     InputPair::PT { p: mpa(6.7), t: k(1190.0) },
//!     MassFlow::Known(1.0),
//! )
//! .unwrap();
//! println!("h = {} J/kg", state.h());
//! ```

pub mod coolprop;
pub mod envelope;
pub mod error;
pub mod flow;
pub mod model;
pub mod perfect_gas;
pub mod species;
pub mod state;

pub use coolprop::CoolPropModel;
pub use envelope::PhaseEnvelope;
pub use error::{FluidError, FluidResult};
pub use flow::{FlowState, MassFlow};
pub use model::{Phase, PropertyBackend, Saturation, ThermoProps, Transport};
pub use perfect_gas::{IdealGas, PerfectGasModel};
pub use species::Species;
pub use state::{InputPair, SpecEnthalpy, SpecEntropy, SpecHeatCapacity};
