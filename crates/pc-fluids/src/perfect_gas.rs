//! Calorically perfect gas backend.
//!
//! Constant `cp` and gas constant, `p = rho R T`, no saturation dome. Enthalpy
//! and entropy are referenced to zero at 298.15 K and 101 325 Pa. Useful for
//! fast deterministic runs of gas cycles and for tests that must not depend on
//! an equation-of-state library.

use pc_core::units::Pressure;

use crate::error::{FluidError, FluidResult};
use crate::model::{Phase, PropertyBackend, Saturation, ThermoProps, validation};
use crate::species::Species;
use crate::state::InputPair;

pub const T_REF: f64 = 298.15;
pub const P_REF: f64 = 101_325.0;

/// Constant properties of one gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    /// Specific gas constant [J/(kg·K)]
    pub r: f64,
    /// Isobaric specific heat [J/(kg·K)]
    pub cp: f64,
    /// Dynamic viscosity [Pa·s]
    pub mu: f64,
    /// Thermal conductivity [W/(m·K)]
    pub k: f64,
}

impl IdealGas {
    /// Monatomic gas (`cp = 5/2 R`).
    pub fn monatomic(species: Species, mu: f64, k: f64) -> Self {
        let r = species.gas_constant();
        Self {
            r,
            cp: 2.5 * r,
            mu,
            k,
        }
    }

    /// Diatomic gas near room temperature (`cp = 7/2 R`).
    pub fn diatomic(species: Species, mu: f64, k: f64) -> Self {
        let r = species.gas_constant();
        Self {
            r,
            cp: 3.5 * r,
            mu,
            k,
        }
    }

    pub fn gamma(&self) -> f64 {
        self.cp / (self.cp - self.r)
    }

    fn h(&self, t: f64) -> f64 {
        self.cp * (t - T_REF)
    }

    fn s(&self, p: f64, t: f64) -> f64 {
        self.cp * (t / T_REF).ln() - self.r * (p / P_REF).ln()
    }

    fn t_from_h(&self, h: f64) -> f64 {
        T_REF + h / self.cp
    }
}

/// Perfect-gas backend holding one parameter set per supported species.
#[derive(Debug, Clone)]
pub struct PerfectGasModel {
    gases: Vec<(Species, IdealGas)>,
}

impl Default for PerfectGasModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfectGasModel {
    /// Helium, argon, nitrogen and air with transport properties at moderate temperature.
    pub fn new() -> Self {
        Self {
            gases: vec![
                (Species::He, IdealGas::monatomic(Species::He, 3.2e-5, 0.25)),
                (Species::Ar, IdealGas::monatomic(Species::Ar, 3.0e-5, 0.022)),
                (Species::N2, IdealGas::diatomic(Species::N2, 2.3e-5, 0.033)),
                (Species::Air, IdealGas::diatomic(Species::Air, 2.4e-5, 0.034)),
            ],
        }
    }

    /// Add or replace the parameters of one species.
    pub fn with_gas(mut self, species: Species, gas: IdealGas) -> Self {
        self.gases.retain(|(s, _)| *s != species);
        self.gases.push((species, gas));
        self
    }

    pub fn gas(&self, species: Species) -> FluidResult<&IdealGas> {
        self.gases
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, g)| g)
            .ok_or(FluidError::NotSupported {
                what: "species has no perfect-gas parameters",
            })
    }
}

impl PropertyBackend for PerfectGasModel {
    fn name(&self) -> &str {
        "PerfectGas"
    }

    fn supports(&self, species: Species) -> bool {
        self.gas(species).is_ok()
    }

    fn props(&self, species: Species, input: InputPair) -> FluidResult<ThermoProps> {
        input.validate()?;
        let gas = self.gas(species)?;

        let (p, t) = match input {
            InputPair::PT { p, t } => (p.value, t.value),
            InputPair::PH { p, h } => (p.value, gas.t_from_h(h)),
            InputPair::PS { p, s } => {
                let t = T_REF * ((s + gas.r * (p.value / P_REF).ln()) / gas.cp).exp();
                (p.value, t)
            }
            InputPair::HS { h, s } => {
                let t = gas.t_from_h(h);
                let p = P_REF * ((gas.cp * (t / T_REF).ln() - s) / gas.r).exp();
                (p, t)
            }
            InputPair::DT { rho, t } => (rho * gas.r * t.value, t.value),
            InputPair::PQ { .. } | InputPair::TQ { .. } => {
                return Err(FluidError::NotSupported {
                    what: "perfect gas has no saturation dome",
                });
            }
        };

        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::Infeasible {
                species,
                pair: input.to_string(),
                message: format!("temperature {t} K is not positive"),
            });
        }

        let props = ThermoProps {
            p,
            t,
            h: gas.h(t),
            s: gas.s(p, t),
            rho: p / (gas.r * t),
            quality: None,
            phase: Phase::Vapour,
            cp: Some(gas.cp),
            mu: Some(gas.mu),
            k: Some(gas.k),
        };
        validation::validate_props(&props)?;
        Ok(props)
    }

    fn saturation(&self, _species: Species, _p: Pressure) -> FluidResult<Saturation> {
        Err(FluidError::NotSupported {
            what: "perfect gas has no saturation dome",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pc_core::units::{k, pa};

    #[test]
    fn reference_state_is_zero() {
        let model = PerfectGasModel::new();
        let props = model
            .props(
                Species::N2,
                InputPair::PT {
                    p: pa(P_REF),
                    t: k(T_REF),
                },
            )
            .unwrap();
        assert_relative_eq!(props.h, 0.0, epsilon = 1e-9);
        assert_relative_eq!(props.s, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn input_pairs_agree() {
        let model = PerfectGasModel::new();
        let pt = model
            .props(
                Species::He,
                InputPair::PT {
                    p: pa(6.7e6),
                    t: k(900.0),
                },
            )
            .unwrap();

        let ph = model
            .props(Species::He, InputPair::PH { p: pa(pt.p), h: pt.h })
            .unwrap();
        let ps = model
            .props(Species::He, InputPair::PS { p: pa(pt.p), s: pt.s })
            .unwrap();
        let hs = model
            .props(Species::He, InputPair::HS { h: pt.h, s: pt.s })
            .unwrap();
        let dt = model
            .props(
                Species::He,
                InputPair::DT {
                    rho: pt.rho,
                    t: k(pt.t),
                },
            )
            .unwrap();

        for other in [ph, ps, hs, dt] {
            assert_relative_eq!(other.t, pt.t, max_relative = 1e-9);
            assert_relative_eq!(other.p, pt.p, max_relative = 1e-9);
        }
    }

    #[test]
    fn helium_gamma_is_monatomic() {
        let model = PerfectGasModel::new();
        let gas = model.gas(Species::He).unwrap();
        assert_relative_eq!(gas.gamma(), 5.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn no_dome() {
        let model = PerfectGasModel::new();
        assert!(model.saturation(Species::He, pa(1.0e5)).is_err());
        assert!(
            model
                .props(Species::He, InputPair::PQ { p: pa(1.0e5), q: 0.5 })
                .is_err()
        );
    }

    #[test]
    fn unknown_species_not_supported() {
        let model = PerfectGasModel::new();
        assert!(!model.supports(Species::R245fa));
        let custom = model.with_gas(
            Species::CO2,
            IdealGas {
                r: Species::CO2.gas_constant(),
                cp: 850.0,
                mu: 1.5e-5,
                k: 0.017,
            },
        );
        assert!(custom.supports(Species::CO2));
    }

    #[test]
    fn negative_temperature_is_infeasible() {
        let model = PerfectGasModel::new();
        let err = model
            .props(Species::He, InputPair::PH { p: pa(1.0e5), h: -1.0e7 })
            .unwrap_err();
        assert!(matches!(err, FluidError::Infeasible { .. }));
    }

    proptest::proptest! {
        #[test]
        fn isentropic_temperature_ratio(t in 200.0..1500.0_f64, ratio in 1.0..20.0_f64) {
            let model = PerfectGasModel::new();
            let gas = *model.gas(Species::Ar).unwrap();
            let start = model.props(Species::Ar, InputPair::PT { p: pa(1.0e5), t: k(t) }).unwrap();
            let end = model
                .props(Species::Ar, InputPair::PS { p: pa(1.0e5 * ratio), s: start.s })
                .unwrap();
            let expected = t * ratio.powf(gas.r / gas.cp);
            proptest::prop_assert!((end.t - expected).abs() <= 1e-9 * expected);
        }
    }
}
