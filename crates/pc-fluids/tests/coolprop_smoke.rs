//! CoolProp integration tests.
//!
//! Broad tolerances avoid backend version issues while still enforcing
//! physical plausibility.

use pc_core::Defaults;
use pc_core::units::{k, mpa, pa};
use pc_fluids::{
    CoolPropModel, FlowState, InputPair, MassFlow, Phase, PhaseEnvelope, PropertyBackend, Species,
};

#[test]
fn water_at_1atm_300k_is_liquid() {
    let model = CoolPropModel::new();
    let props = model
        .props(
            Species::H2O,
            InputPair::PT {
                p: pa(101_325.0),
                t: k(300.0),
            },
        )
        .unwrap();

    assert!(props.rho > 900.0 && props.rho < 1100.0, "rho = {}", props.rho);
    assert_eq!(props.phase, Phase::Liquid);
    assert!(props.quality.is_none());
    let pr = props.prandtl().unwrap();
    assert!(pr > 3.0 && pr < 10.0, "Pr = {pr}");
}

#[test]
fn helium_cooler_states_are_supercritical() {
    let model = CoolPropModel::new();
    let hot = model
        .props(
            Species::He,
            InputPair::PT {
                p: mpa(6.7),
                t: k(1190.0),
            },
        )
        .unwrap();
    let cold = model
        .props(
            Species::He,
            InputPair::PT {
                p: mpa(6.7),
                t: k(424.0),
            },
        )
        .unwrap();

    assert_eq!(hot.phase, Phase::Supercritical);
    // Enthalpy drop close to cp ΔT for a near-perfect gas.
    let dh = hot.h - cold.h;
    assert!(dh > 3.9e6 && dh < 4.05e6, "dh = {dh}");
}

#[test]
fn ph_round_trip() {
    let model = CoolPropModel::new();
    let p = pa(500_000.0);
    let pt = model
        .props(Species::N2, InputPair::PT { p, t: k(350.0) })
        .unwrap();
    let ph = model
        .props(Species::N2, InputPair::PH { p, h: pt.h })
        .unwrap();
    assert!((ph.t - 350.0).abs() < 1e-3, "T = {}", ph.t);
}

#[test]
fn saturation_brackets_latent_heat() {
    let model = CoolPropModel::new();
    let sat = model.saturation(Species::R245fa, pa(5.0e5)).unwrap();
    assert!(sat.h_fg() > 1.0e5 && sat.h_fg() < 2.5e5, "h_fg = {}", sat.h_fg());
    assert!(sat.t_sat > 300.0 && sat.t_sat < 380.0, "T_sat = {}", sat.t_sat);
    assert!(sat.liquid.rho > sat.vapour.rho);
    assert!(sat.sigma.is_some());

    let mid = model
        .props(Species::R245fa, InputPair::PQ { p: pa(5.0e5), q: 0.4 })
        .unwrap();
    assert_eq!(mid.phase, Phase::TwoPhase);
    assert!((sat.quality_of(mid.h) - 0.4).abs() < 1e-6);
}

#[test]
fn supercritical_pressure_has_no_saturation() {
    let model = CoolPropModel::new();
    assert!(model.saturation(Species::He, mpa(6.7)).is_err());
}

#[test]
fn temperature_pressure_validation() {
    let model = CoolPropModel::new();
    assert!(
        model
            .props(
                Species::N2,
                InputPair::PT {
                    p: pa(-100.0),
                    t: k(300.0)
                }
            )
            .is_err()
    );
    assert!(
        model
            .props(
                Species::N2,
                InputPair::PT {
                    p: pa(101_325.0),
                    t: k(0.0)
                }
            )
            .is_err()
    );
}

#[test]
fn envelope_seeds_saturated_liquid() {
    let model = CoolPropModel::new();
    let env = PhaseEnvelope::build(&model, Species::R245fa, pa(2.0e5), pa(2.0e6), 8).unwrap();
    let seed = env
        .saturated_liquid(&model, pa(1.0e6), MassFlow::Known(0.5))
        .unwrap();
    assert_eq!(seed.phase(), Phase::Liquid);
    let t_interp = env.t_sat(pa(1.0e6)).unwrap();
    assert!((t_interp - seed.t()).abs() < 2.0, "{} vs {}", t_interp, seed.t());
}

#[test]
fn flow_state_from_coolprop() {
    let model = CoolPropModel::new();
    let state = FlowState::new(
        &model,
        Species::N2,
        InputPair::PT {
            p: pa(101_325.0),
            t: k(300.0),
        },
        MassFlow::Known(2.0),
    )
    .unwrap();
    assert!(state.rho() > 1.0 && state.rho() < 1.3, "rho = {}", state.rho());
    assert_eq!(state.phase(), Phase::Vapour);
    assert_eq!(state.m().unwrap(), 2.0);
}

#[test]
fn quality_tolerance_decides_saturated_liquid() {
    let near_liquid = InputPair::PQ {
        p: mpa(0.5),
        q: 1e-6,
    };
    let strict = CoolPropModel::new();
    assert_eq!(strict.props(Species::R245fa, near_liquid).unwrap().phase, Phase::TwoPhase);

    let loose = CoolPropModel::with_defaults(&Defaults {
        tol_abs_x: 1e-4,
        ..Defaults::default()
    });
    assert_eq!(loose.tol_abs_x(), 1e-4);
    assert_eq!(loose.props(Species::R245fa, near_liquid).unwrap().phase, Phase::Liquid);
}
