//! Chevron plate correlations.
//!
//! - Chisholm & Wanniarachchi (1992), single phase
//! - Yan & Lin (1999), evaporation
//! - Han, Lee & Kim (2003), condensation

use std::f64::consts::FRAC_PI_2;

use super::{Friction, Heat, friction, heat, single, two};
use crate::error::CorrelationResult;
use crate::geometry::Chevron;
use crate::props::FlowInput;

const CW: &str = "chisholm_wanniarachchi";
const YAN_LIN: &str = "yan_lin";
const HAN_LEE_KIM: &str = "han_lee_kim";

fn dh(geom: &Chevron) -> f64 {
    2.0 * geom.b / geom.phi
}

pub fn chisholm_wanniarachchi_heat(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Heat> {
    let bulk = single(CW, input)?;
    let dh = dh(geom);
    let re = input.g * dh / bulk.mu;
    let nu = 0.72
        * re.powf(0.59)
        * bulk.prandtl().powf(0.4)
        * geom.phi.powf(0.41)
        * (geom.beta / 30.0).powf(0.66);
    heat(CW, nu, bulk.k, dh, re)
}

pub fn chisholm_wanniarachchi_friction(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Friction> {
    let bulk = single(CW, input)?;
    let re = input.g * dh(geom) / bulk.mu;
    let f = 0.8 * re.powf(-0.25) * geom.phi.powf(1.25) * (geom.beta / 30.0).powf(3.6);
    friction(CW, f, re)
}

pub fn yan_lin_heat(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Heat> {
    let tp = two(YAN_LIN, input)?;
    let dh = dh(geom);
    let g_eq = input.g * tp.equivalent_factor();
    let re_l = input.g * dh / tp.liquid.mu;
    let re_eq = g_eq * dh / tp.liquid.mu;
    // Boiling number floors at 1 W/m² so a first guess of zero flux stays finite.
    let bo_eq = input.q_flux.abs().max(1.0) / (g_eq * tp.h_fg);
    let nu = 1.926
        * re_eq
        * tp.liquid.prandtl().powf(1.0 / 3.0)
        * bo_eq.powf(0.3)
        * re_l.powf(-0.5)
        * tp.equivalent_factor();
    heat(YAN_LIN, nu, tp.liquid.k, dh, re_eq)
}

pub fn yan_lin_friction(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Friction> {
    let tp = two(YAN_LIN, input)?;
    let dh = dh(geom);
    let re_l = input.g * dh / tp.liquid.mu;
    let re_eq = input.g * tp.equivalent_factor() * dh / tp.liquid.mu;
    let f_re = if re_l < 6000.0 {
        6.947e5 * re_l.powf(-1.109)
    } else {
        31.21 * re_l.powf(0.04557)
    };
    friction(YAN_LIN, f_re / re_eq.sqrt(), re_eq)
}

fn han_lee_kim_groups(geom: &Chevron) -> (f64, f64) {
    let ratio = geom.pitch / dh(geom);
    let angle = FRAC_PI_2 - geom.beta.to_radians();
    (ratio, angle)
}

pub fn han_lee_kim_heat(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Heat> {
    let tp = two(HAN_LEE_KIM, input)?;
    let dh = dh(geom);
    let (ratio, angle) = han_lee_kim_groups(geom);
    let ge1 = 11.22 * ratio.powf(-2.83) * angle.powf(-4.5);
    let ge2 = 0.35 * ratio.powf(0.23) * angle.powf(1.48);
    let re_eq = input.g * tp.equivalent_factor() * dh / tp.liquid.mu;
    let nu = ge1 * re_eq.powf(ge2) * tp.liquid.prandtl().powf(1.0 / 3.0);
    heat(HAN_LEE_KIM, nu, tp.liquid.k, dh, re_eq)
}

pub fn han_lee_kim_friction(geom: &Chevron, input: &FlowInput) -> CorrelationResult<Friction> {
    let tp = two(HAN_LEE_KIM, input)?;
    let (ratio, angle) = han_lee_kim_groups(geom);
    let ge3 = 3521.1 * ratio.powf(4.17) * angle.powf(-7.75);
    let ge4 = -1.024 * ratio.powf(0.0925) * angle.powf(-1.3);
    let re_eq = input.g * tp.equivalent_factor() * dh(geom) / tp.liquid.mu;
    friction(HAN_LEE_KIM, ge3 * re_eq.powf(ge4), re_eq)
}
