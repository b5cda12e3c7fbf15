//! Smooth parallel-plate correlations.

use super::{Friction, Heat, friction, heat, single, two};
use crate::error::{CorrelationError, CorrelationResult};
use crate::geometry::Smooth;
use crate::props::FlowInput;

const SHIBANI: &str = "shibani_ozisik";
const ROTHFUS: &str = "rothfus";
const HUANG: &str = "huang";

/// Laminar-turbulent transition for flow between parallel plates.
pub const RE_TRANSITION: f64 = 2300.0;

/// Shibani & Özişik (1977), uniform heat flux between parallel plates.
///
/// Fully developed laminar flow takes `Nu = 8.235`.
pub fn shibani_ozisik_heat(geom: &Smooth, input: &FlowInput) -> CorrelationResult<Heat> {
    let bulk = single(SHIBANI, input)?;
    let dh = 2.0 * geom.b;
    let re = input.g * dh / bulk.mu;
    let pr = bulk.prandtl();
    let nu = if re < RE_TRANSITION {
        8.235
    } else if pr < 1.0 {
        8.3 + 0.02 * re.powf(0.82) * pr.powf(0.52)
    } else {
        let m = 0.88 - 0.24 / (3.6 + pr);
        let n = 0.33 + 0.5 * (-0.6 * pr).exp();
        12.0 + 0.03 * re.powf(m) * pr.powf(n)
    };
    heat(SHIBANI, nu, bulk.k, dh, re)
}

/// Fanning friction between smooth parallel plates: `24/Re` when laminar,
/// `0.073 Re^-0.25` when turbulent.
pub fn rothfus_friction(geom: &Smooth, input: &FlowInput) -> CorrelationResult<Friction> {
    let bulk = single(ROTHFUS, input)?;
    let re = input.g * 2.0 * geom.b / bulk.mu;
    let f = if re < RE_TRANSITION {
        24.0 / re
    } else {
        0.073 * re.powf(-0.25)
    };
    friction(ROTHFUS, f, re)
}

/// Huang, Sheer & Bailey-McEwan (2012) nucleate boiling, scaled on the
/// bubble departure diameter with a 35° contact angle.
pub fn huang_heat(geom: &Smooth, input: &FlowInput) -> CorrelationResult<Heat> {
    let tp = two(HUANG, input)?;
    let sigma = tp.sigma.ok_or(CorrelationError::MissingInput {
        method: HUANG,
        what: "surface tension",
    })?;
    let liquid = &tp.liquid;
    let d0 = 0.0146 * 35.0 * (2.0 * sigma / (input.gravity * (liquid.rho - tp.rho_v))).sqrt();
    let q = input.q_flux.abs().max(1.0);
    let alpha = liquid.diffusivity();
    let nu = 1.87e-3
        * (q * d0 / (liquid.k * tp.t_sat)).powf(0.56)
        * (tp.h_fg * d0 * d0 / (alpha * alpha)).powf(0.31)
        * liquid.prandtl().powf(0.33);
    let re = input.g * 2.0 * geom.b / liquid.mu;
    heat(HUANG, nu, liquid.k, d0, re)
}
