//! pc-components: component library for power-cycle simulation.
//!
//! Provides:
//! - Basic coolers and heaters at constant pressure
//! - Compressors and expanders with an isentropic efficiency
//! - A plate heat exchanger analysed segment by segment
//!
//! Every component implements [`Component`]: `run` computes the outlet from
//! the inlet, and `size` solves one attribute against a target outlet with a
//! closed form or a bracketed root finder.
//!
//! # Example
//!
//! ```no_run
//! use pc_core::{Defaults, units::{k, mpa}};
//! use pc_components::{ClrBasic, Component, CoolerAttr, SizeSetup};
//! use pc_fluids::{CoolPropModel, FlowState, InputPair, MassFlow, Species};
//!
//! let model = CoolPropModel::new();
//! let state = |t| {
//!     FlowState::new(&model, Species::He, InputPair::PT { p: mpa(6.7), t: k(t) }, MassFlow::Known(1.0))
//! };
//! let mut cooler = ClrBasic::new("cooler", 1.0, 1.0, &Defaults::default())
//!     .unwrap()
//!     .with_inlet(state(1190.0).unwrap())
//!     .with_outlet(state(424.0).unwrap());
//! let q = cooler.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();
//! println!("QCool = {q} W");
//! ```

mod basic;
pub mod clr;
pub mod common;
pub mod comp;
pub mod error;
pub mod exp;
pub mod htr;
pub mod hx_plate;
mod machine;
pub mod traits;

pub use clr::ClrBasic;
pub use comp::CompBasic;
pub use error::{ComponentError, ComponentResult, ErrorClass};
pub use exp::ExpBasic;
pub use htr::HtrBasic;
pub use hx_plate::{FlowArrangement, HxPlate, HxSolution, Orientation, PlateLayout, PlateSide, Segment};
pub use traits::{
    Component, ComponentKind, ComponentSnapshot, CoolerAttr, HeaterAttr, HxAttr, MachineAttr, SizeAttr,
    SizeSetup,
};
