//! CoolProp-based property backend.

use std::fmt::Display;

use pc_core::Defaults;
use pc_core::units::Pressure;
use rfluids::prelude::*;

use crate::error::{FluidError, FluidResult};
use crate::model::{Phase, PropertyBackend, Saturation, ThermoProps, validation};
use crate::species::Species;
use crate::state::InputPair;

/// CoolProp backend for real-fluid properties (pure fluids only).
///
/// Thread-safe: rfluids `Fluid` instances are created per query and never shared.
#[derive(Debug, Clone, Copy)]
pub struct CoolPropModel {
    /// Quality band around 0 and 1 reported as saturated liquid or vapour.
    tol_abs_x: f64,
}

impl Default for CoolPropModel {
    fn default() -> Self {
        Self::with_defaults(&Defaults::default())
    }
}

impl CoolPropModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: &Defaults) -> Self {
        Self {
            tol_abs_x: defaults.tol_abs_x,
        }
    }

    pub fn tol_abs_x(&self) -> f64 {
        self.tol_abs_x
    }

    fn fluid_at(&self, species: Species, input: InputPair) -> FluidResult<Fluid> {
        let (a, b) = match input {
            InputPair::PT { p, t } => (
                FluidInput::pressure(p.value),
                FluidInput::temperature(t.value),
            ),
            InputPair::PH { p, h } => (FluidInput::pressure(p.value), FluidInput::enthalpy(h)),
            InputPair::PS { p, s } => (FluidInput::pressure(p.value), FluidInput::entropy(s)),
            InputPair::PQ { p, q } => (FluidInput::pressure(p.value), FluidInput::quality(q)),
            InputPair::TQ { t, q } => (FluidInput::temperature(t.value), FluidInput::quality(q)),
            InputPair::HS { h, s } => (FluidInput::enthalpy(h), FluidInput::entropy(s)),
            InputPair::DT { rho, t } => (FluidInput::density(rho), FluidInput::temperature(t.value)),
        };
        Fluid::from(species.rfluids_pure())
            .in_state(a, b)
            .map_err(|e| infeasible(species, input, e))
    }

    /// Liquid, vapour or supercritical for a state known to lie outside the dome.
    fn single_phase(&self, species: Species, p: f64, t: f64) -> Phase {
        let saturated = Fluid::from(species.rfluids_pure())
            .in_state(FluidInput::pressure(p), FluidInput::quality(0.0));
        match saturated {
            Ok(mut fluid) => match fluid.temperature() {
                Ok(t_sat) if t < t_sat => Phase::Liquid,
                Ok(_) => Phase::Vapour,
                Err(_) => Phase::Supercritical,
            },
            // No saturation state at this pressure: above the critical point.
            Err(_) => Phase::Supercritical,
        }
    }

    fn extract(&self, species: Species, input: InputPair, fluid: &mut Fluid) -> FluidResult<ThermoProps> {
        let p = read(species, input, "pressure", fluid.pressure())?;
        let t = read(species, input, "temperature", fluid.temperature())?;
        let h = read(species, input, "enthalpy", fluid.enthalpy())?;
        let s = read(species, input, "entropy", fluid.entropy())?;
        let rho = read(species, input, "density", fluid.density())?;

        let quality = match input {
            InputPair::PQ { q, .. } | InputPair::TQ { q, .. } => Some(q),
            _ => fluid
                .quality()
                .ok()
                .filter(|q| (0.0..=1.0).contains(q)),
        };
        let phase = match quality {
            Some(q) => Phase::from_quality(q, self.tol_abs_x),
            None => self.single_phase(species, p, t),
        };

        let (cp, mu, k) = if phase.is_two_phase() {
            (None, None, None)
        } else {
            (
                validation::positive(fluid.specific_heat().ok()),
                validation::positive(fluid.dynamic_viscosity().ok()),
                validation::positive(fluid.conductivity().ok()),
            )
        };

        let props = ThermoProps {
            p,
            t,
            h,
            s,
            rho,
            quality,
            phase,
            cp,
            mu,
            k,
        };
        validation::validate_props(&props)?;
        Ok(props)
    }
}

fn infeasible(species: Species, input: InputPair, err: impl Display) -> FluidError {
    FluidError::Infeasible {
        species,
        pair: input.to_string(),
        message: err.to_string(),
    }
}

fn read<E: Display>(
    species: Species,
    input: InputPair,
    what: &'static str,
    value: Result<f64, E>,
) -> FluidResult<f64> {
    value.map_err(|e| infeasible(species, input, format!("{what}: {e}")))
}

impl PropertyBackend for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _species: Species) -> bool {
        true
    }

    fn props(&self, species: Species, input: InputPair) -> FluidResult<ThermoProps> {
        input.validate()?;
        let mut fluid = self.fluid_at(species, input)?;
        self.extract(species, input, &mut fluid)
    }

    fn saturation(&self, species: Species, p: Pressure) -> FluidResult<Saturation> {
        let liquid_input = InputPair::PQ { p, q: 0.0 };
        let mut liquid_fluid = self.fluid_at(species, liquid_input)?;
        let liquid = self.extract(species, liquid_input, &mut liquid_fluid)?;
        let sigma = validation::positive(liquid_fluid.surface_tension().ok());

        let vapour_input = InputPair::PQ { p, q: 1.0 };
        let mut vapour_fluid = self.fluid_at(species, vapour_input)?;
        let vapour = self.extract(species, vapour_input, &mut vapour_fluid)?;

        Ok(Saturation {
            p: p.value,
            t_sat: liquid.t,
            liquid,
            vapour,
            sigma,
        })
    }
}
