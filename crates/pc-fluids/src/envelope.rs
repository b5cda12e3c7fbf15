//! Saturation envelope sampled over a pressure range.

use pc_core::units::{Pressure, pa};

use crate::error::{FluidError, FluidResult};
use crate::flow::{FlowState, MassFlow};
use crate::model::{PropertyBackend, Saturation};
use crate::species::Species;
use crate::state::InputPair;

/// Saturated liquid/vapour pairs at log-spaced pressures.
#[derive(Debug, Clone)]
pub struct PhaseEnvelope {
    species: Species,
    points: Vec<Saturation>,
}

impl PhaseEnvelope {
    /// Sample `n >= 2` saturation points between `p_lo` and `p_hi`.
    ///
    /// Fails if any point is outside the dome (e.g. `p_hi` above the critical
    /// pressure) or the backend has no saturation model.
    pub fn build(
        backend: &dyn PropertyBackend,
        species: Species,
        p_lo: Pressure,
        p_hi: Pressure,
        n: usize,
    ) -> FluidResult<Self> {
        let (lo, hi) = (p_lo.value, p_hi.value);
        if n < 2 || !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo >= hi {
            return Err(FluidError::InvalidArg {
                what: "phase envelope needs 0 < p_lo < p_hi and at least two points",
            });
        }

        let ratio = (hi / lo).ln() / (n - 1) as f64;
        let points = (0..n)
            .map(|i| backend.saturation(species, pa(lo * (ratio * i as f64).exp())))
            .collect::<FluidResult<Vec<_>>>()?;

        tracing::debug!(%species, n, p_lo = lo, p_hi = hi, "phase envelope built");
        Ok(Self { species, points })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn points(&self) -> &[Saturation] {
        &self.points
    }

    pub fn p_range(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (a.p, b.p),
            _ => (f64::NAN, f64::NAN),
        }
    }

    pub fn contains(&self, p: Pressure) -> bool {
        let (lo, hi) = self.p_range();
        p.value >= lo && p.value <= hi
    }

    /// Saturation temperature [K], interpolated linearly in `ln p`.
    pub fn t_sat(&self, p: Pressure) -> FluidResult<f64> {
        if !self.contains(p) {
            return Err(FluidError::InvalidArg {
                what: "pressure outside the sampled phase envelope",
            });
        }
        let x = p.value.ln();
        let upper = self
            .points
            .iter()
            .position(|s| s.p >= p.value)
            .unwrap_or(self.points.len() - 1)
            .max(1);
        let (a, b) = (&self.points[upper - 1], &self.points[upper]);
        let w = (x - a.p.ln()) / (b.p.ln() - a.p.ln());
        Ok(a.t_sat + w * (b.t_sat - a.t_sat))
    }

    /// Saturated-liquid flow state at `p`.
    pub fn saturated_liquid(
        &self,
        backend: &dyn PropertyBackend,
        p: Pressure,
        mass_flow: MassFlow,
    ) -> FluidResult<FlowState> {
        if !self.contains(p) {
            return Err(FluidError::InvalidArg {
                what: "pressure outside the sampled phase envelope",
            });
        }
        FlowState::new(backend, self.species, InputPair::PQ { p, q: 0.0 }, mass_flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, ThermoProps};

    /// Saturation line `T_sat = 300 + 10 ln(p / 1e5)` with fixed latent heat.
    struct TableBackend;

    impl PropertyBackend for TableBackend {
        fn name(&self) -> &str {
            "table"
        }

        fn supports(&self, _species: Species) -> bool {
            true
        }

        fn props(&self, _species: Species, input: InputPair) -> FluidResult<ThermoProps> {
            match input {
                InputPair::PQ { p, q } => {
                    let sat = self.saturation(Species::R245fa, p)?;
                    Ok(if q <= 0.0 { sat.liquid } else { sat.vapour })
                }
                _ => Err(FluidError::NotSupported { what: "table" }),
            }
        }

        fn saturation(&self, _species: Species, p: Pressure) -> FluidResult<Saturation> {
            if p.value > 3.6e6 {
                return Err(FluidError::NotSupported {
                    what: "above critical",
                });
            }
            let t_sat = 300.0 + 10.0 * (p.value / 1.0e5).ln();
            let liquid = ThermoProps {
                p: p.value,
                t: t_sat,
                h: 2.0e5,
                s: 1.0e3,
                rho: 1300.0,
                quality: Some(0.0),
                phase: Phase::Liquid,
                cp: Some(1300.0),
                mu: Some(4.0e-4),
                k: Some(0.08),
            };
            let vapour = ThermoProps {
                h: 3.9e5,
                rho: 10.0,
                quality: Some(1.0),
                phase: Phase::Vapour,
                ..liquid
            };
            Ok(Saturation {
                p: p.value,
                t_sat,
                liquid,
                vapour,
                sigma: Some(0.014),
            })
        }
    }

    #[test]
    fn interpolates_saturation_temperature() {
        let env = PhaseEnvelope::build(&TableBackend, Species::R245fa, pa(1.0e5), pa(1.0e6), 5).unwrap();
        let t = env.t_sat(pa(3.0e5)).unwrap();
        let exact = 300.0 + 10.0 * 3.0_f64.ln();
        assert!((t - exact).abs() < 1e-9, "t = {t}, exact = {exact}");
        assert_eq!(env.points().len(), 5);
    }

    #[test]
    fn rejects_range_above_critical() {
        let err = PhaseEnvelope::build(&TableBackend, Species::R245fa, pa(1.0e5), pa(5.0e6), 4);
        assert!(err.is_err());
    }

    #[test]
    fn saturated_liquid_seed() {
        let env = PhaseEnvelope::build(&TableBackend, Species::R245fa, pa(1.0e5), pa(1.0e6), 3).unwrap();
        let seed = env
            .saturated_liquid(&TableBackend, pa(2.0e5), MassFlow::Known(1.0))
            .unwrap();
        assert_eq!(seed.phase(), Phase::Liquid);
        assert!(env.saturated_liquid(&TableBackend, pa(2.0e6), MassFlow::Known(1.0)).is_err());
    }
}
