//! Flow states: a fully determined state plus a mass flow.

use pc_core::TolAttr;
use pc_core::units::{MassRate, Pressure, Temperature, kgps};
use serde::Serialize;

use crate::error::{FluidError, FluidResult};
use crate::model::{Phase, PropertyBackend, ThermoProps};
use crate::species::Species;
use crate::state::InputPair;

/// Mass flow rate of a stream [kg/s].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MassFlow {
    Known(f64),
    /// Placeholder for a mass flow that a sizing step will solve.
    #[default]
    Unresolved,
}

impl MassFlow {
    pub fn value(self) -> Option<f64> {
        match self {
            MassFlow::Known(m) => Some(m),
            MassFlow::Unresolved => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, MassFlow::Known(_))
    }
}

impl From<f64> for MassFlow {
    fn from(m: f64) -> Self {
        MassFlow::Known(m)
    }
}

/// Stream state at a port.
///
/// Values are immutable; any change in inputs produces a new `FlowState`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    species: Species,
    input: InputPair,
    props: ThermoProps,
    mass_flow: MassFlow,
}

impl FlowState {
    pub fn new(
        backend: &dyn PropertyBackend,
        species: Species,
        input: InputPair,
        mass_flow: MassFlow,
    ) -> FluidResult<Self> {
        if let MassFlow::Known(m) = mass_flow
            && (!m.is_finite() || m < 0.0)
        {
            return Err(FluidError::NonPhysical {
                what: "mass flow must be finite and non-negative",
            });
        }
        let props = backend.props(species, input)?;
        Ok(Self {
            species,
            input,
            props,
            mass_flow,
        })
    }

    /// Same fluid and mass flow at a new state.
    pub fn with_state(&self, backend: &dyn PropertyBackend, input: InputPair) -> FluidResult<Self> {
        Self::new(backend, self.species, input, self.mass_flow)
    }

    /// Same state with a different mass flow.
    pub fn with_mass_flow(&self, mass_flow: MassFlow) -> Self {
        Self {
            mass_flow,
            ..self.clone()
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn input(&self) -> InputPair {
        self.input
    }

    pub fn props(&self) -> &ThermoProps {
        &self.props
    }

    pub fn mass_flow(&self) -> MassFlow {
        self.mass_flow
    }

    /// Mass flow [kg/s]; an unresolved flow is an error.
    pub fn m(&self) -> FluidResult<f64> {
        self.mass_flow
            .value()
            .ok_or_else(|| FluidError::UnresolvedMassFlow {
                what: format!("{} stream at {}", self.species, self.input),
            })
    }

    pub fn mass_rate(&self) -> FluidResult<MassRate> {
        Ok(kgps(self.m()?))
    }

    pub fn p(&self) -> f64 {
        self.props.p
    }

    pub fn t(&self) -> f64 {
        self.props.t
    }

    pub fn h(&self) -> f64 {
        self.props.h
    }

    pub fn s(&self) -> f64 {
        self.props.s
    }

    pub fn rho(&self) -> f64 {
        self.props.rho
    }

    pub fn quality(&self) -> Option<f64> {
        self.props.quality
    }

    pub fn phase(&self) -> Phase {
        self.props.phase
    }

    pub fn pressure(&self) -> Pressure {
        self.props.pressure()
    }

    pub fn temperature(&self) -> Temperature {
        self.props.temperature()
    }

    /// Value of the attribute used for convergence checks.
    pub fn attr(&self, attr: TolAttr) -> f64 {
        match attr {
            TolAttr::H => self.props.h,
            TolAttr::P => self.props.p,
            TolAttr::T => self.props.t,
            TolAttr::S => self.props.s,
            TolAttr::Rho => self.props.rho,
        }
    }
}
