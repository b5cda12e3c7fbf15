//! Phase-envelope seeding of the closing state point.

use pc_core::units::pa;
use pc_fluids::{FlowState, FluidResult, PhaseEnvelope, PropertyBackend};

const ENVELOPE_POINTS: usize = 8;
/// The envelope is sampled over `[p / SPAN, p * SPAN]` around the seed pressure.
const ENVELOPE_SPAN: f64 = 1.5;

/// Saturated liquid at the pressure of `seed`, carrying the same mass flow.
///
/// Fails when the backend has no saturation model or the seed pressure is
/// too close to (or above) the critical point.
pub(crate) fn envelope_seed(backend: &dyn PropertyBackend, seed: &FlowState) -> FluidResult<FlowState> {
    let p = seed.p();
    let envelope = PhaseEnvelope::build(
        backend,
        seed.species(),
        pa(p / ENVELOPE_SPAN),
        pa(p * ENVELOPE_SPAN),
        ENVELOPE_POINTS,
    )?;
    envelope.saturated_liquid(backend, seed.pressure(), seed.mass_flow())
}
