//! Manglik & Bergles (1995) offset strip fin j and f factors, valid across
//! laminar, transition and turbulent flow.

use super::{Friction, Heat, friction, heat, single};
use crate::error::CorrelationResult;
use crate::geometry::{Geometry, OffsetFin};
use crate::props::FlowInput;

const NAME: &str = "manglik_bergles";

struct Groups {
    re: f64,
    alpha: f64,
    delta: f64,
    gamma: f64,
    dh: f64,
}

fn groups(geom: &OffsetFin, g: f64, mu: f64) -> Groups {
    let dh = Geometry::OffsetFin(*geom).dh();
    Groups {
        re: g * dh / mu,
        alpha: geom.s / geom.h,
        delta: geom.t / geom.l,
        gamma: geom.t / geom.s,
        dh,
    }
}

pub fn manglik_bergles_heat(geom: &OffsetFin, input: &FlowInput) -> CorrelationResult<Heat> {
    let bulk = single(NAME, input)?;
    let Groups {
        re,
        alpha,
        delta,
        gamma,
        dh,
    } = groups(geom, input.g, bulk.mu);
    let j = 0.6522
        * re.powf(-0.5403)
        * alpha.powf(-0.1541)
        * delta.powf(0.1499)
        * gamma.powf(-0.0678)
        * (1.0
            + 5.269e-5
                * re.powf(1.340)
                * alpha.powf(0.504)
                * delta.powf(0.456)
                * gamma.powf(-1.055))
        .powf(0.1);
    let pr = bulk.prandtl();
    let h = j * input.g * bulk.cp * pr.powf(-2.0 / 3.0);
    heat(NAME, h * dh / bulk.k, bulk.k, dh, re)
}

pub fn manglik_bergles_friction(geom: &OffsetFin, input: &FlowInput) -> CorrelationResult<Friction> {
    let bulk = single(NAME, input)?;
    let Groups {
        re,
        alpha,
        delta,
        gamma,
        ..
    } = groups(geom, input.g, bulk.mu);
    let f = 9.6243
        * re.powf(-0.7422)
        * alpha.powf(-0.1856)
        * delta.powf(0.3053)
        * gamma.powf(-0.2659)
        * (1.0
            + 7.669e-8
                * re.powf(4.429)
                * alpha.powf(0.920)
                * delta.powf(3.767)
                * gamma.powf(0.236))
        .powf(0.1);
    friction(NAME, f, re)
}
