//! Integration tests for pc-components with real fluid models.

use approx::assert_relative_eq;
use pc_components::{
    ClrBasic, CompBasic, Component, ComponentError, CoolerAttr, ErrorClass, HeaterAttr, HtrBasic,
    MachineAttr, SizeSetup,
};
use pc_core::Defaults;
use pc_core::units::{k, mpa};
use pc_fluids::{CoolPropModel, FlowState, InputPair, MassFlow, Species};

fn helium(model: &CoolPropModel, p_mpa: f64, t: f64, m: f64) -> FlowState {
    FlowState::new(
        model,
        Species::He,
        InputPair::PT {
            p: mpa(p_mpa),
            t: k(t),
        },
        MassFlow::Known(m),
    )
    .unwrap()
}

fn helium_cooler(model: &CoolPropModel, p_in_mpa: f64) -> ClrBasic {
    ClrBasic::new("cooler", 1.0, 1.0, &Defaults::default())
        .unwrap()
        .with_inlet(helium(model, p_in_mpa, 1190.0, 1.0))
        .with_outlet(helium(model, 6.7, 424.0, 1.0))
}

#[test]
fn helium_cooler_duty() {
    let model = CoolPropModel::new();
    let mut cooler = helium_cooler(&model, 6.7);

    cooler.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();

    let duty_mw = cooler.duty().value / 1e6;
    assert!((duty_mw + 3.975).abs() < 1e-3, "duty = {duty_mw} MW");
    let outlet = cooler.outlet().unwrap();
    assert_relative_eq!(outlet.t(), 424.0, max_relative = 1e-6);
}

#[test]
fn helium_cooler_mass_flow() {
    let model = CoolPropModel::new();
    let mut cooler = ClrBasic::new("cooler", 3.975e6, 1.0, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 6.7, 1190.0, 1.0))
        .with_outlet(helium(&model, 6.7, 424.0, 1.0));

    let setup = SizeSetup::new(CoolerAttr::M).with_bounds(0.8, 1.1);
    let m = cooler.size(&model, &setup).unwrap();

    assert!((m - 1.0).abs() < 1e-3, "m = {m}");
    assert_eq!(cooler.inlet().unwrap().mass_flow(), MassFlow::Known(m));
}

#[test]
fn helium_cooler_pressure_mismatch_is_infeasible() {
    let model = CoolPropModel::new();
    let mut cooler = helium_cooler(&model, 6.8);

    let err = cooler
        .size(&model, &SizeSetup::new(CoolerAttr::QCool))
        .unwrap_err();

    assert!(matches!(err, ComponentError::Infeasible { .. }), "{err}");
    assert_eq!(err.class(), ErrorClass::Infeasible);
}

#[test]
fn sizing_mass_flow_reproduces_duty() {
    let model = CoolPropModel::new();
    let mut cooler = helium_cooler(&model, 6.7);
    let q = cooler.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();

    let mut again = ClrBasic::new("cooler", q, 1.0, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 6.7, 1190.0, 1.0))
        .with_outlet(helium(&model, 6.7, 424.0, 1.0));
    let m = again
        .size(&model, &SizeSetup::new(CoolerAttr::M).with_bounds(0.5, 2.0))
        .unwrap();

    let mut check = ClrBasic::new("cooler", 1.0, 1.0, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 6.7, 1190.0, m))
        .with_outlet(helium(&model, 6.7, 424.0, m));
    let q_again = check.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();
    assert_relative_eq!(q_again, q, max_relative = 1e-6);
}

#[test]
fn non_bracketing_bounds_fail() {
    let model = CoolPropModel::new();
    let mut cooler = ClrBasic::new("cooler", 3.975e6, 1.0, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 6.7, 1190.0, 1.0))
        .with_outlet(helium(&model, 6.7, 424.0, 1.0));

    let err = cooler
        .size(&model, &SizeSetup::new(CoolerAttr::M).with_bounds(1.5, 3.0))
        .unwrap_err();
    assert!(matches!(err, ComponentError::NotBracketed { attr: "m", .. }), "{err}");

    let err = cooler
        .size(&model, &SizeSetup::new(CoolerAttr::M).with_bounds(3.0, 1.5))
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Configuration);
}

#[test]
fn repeated_sizing_is_stable() {
    let model = CoolPropModel::new();
    let mut cooler = helium_cooler(&model, 6.7);
    let first = cooler.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();
    let second = cooler.size(&model, &SizeSetup::new(CoolerAttr::QCool)).unwrap();
    assert_relative_eq!(first, second, max_relative = 1e-7);
}

#[test]
fn heater_efficiency_closed_form() {
    let model = CoolPropModel::new();
    let mut heater = HtrBasic::new("heater", 5.0e6, 0.5, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 6.7, 424.0, 1.0))
        .with_outlet(helium(&model, 6.7, 1190.0, 1.0));

    let eff = heater
        .size(&model, &SizeSetup::new(HeaterAttr::Efficiency))
        .unwrap();
    let dh = heater.outlet().unwrap().h() - heater.inlet().unwrap().h();
    assert_relative_eq!(eff, dh / 5.0e6, max_relative = 1e-6);
    assert!(heater.duty().value > 0.0);
}

#[test]
fn compressor_ratio_and_efficiency() {
    let model = CoolPropModel::new();
    let mut comp = CompBasic::new("compressor", 2.5, 0.85, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 2.68, 300.0, 1.0));
    let outlet = comp.run(&model).unwrap();
    assert_relative_eq!(outlet.p(), 6.7e6, max_relative = 1e-9);
    assert!(comp.power().value > 0.0);

    let mut sized = CompBasic::new("compressor", 1.0, 0.5, &Defaults::default())
        .unwrap()
        .with_inlet(helium(&model, 2.68, 300.0, 1.0))
        .with_outlet(outlet.clone());
    let ratio = sized
        .size(&model, &SizeSetup::new(MachineAttr::PRatio))
        .unwrap();
    assert_relative_eq!(ratio, 2.5, max_relative = 1e-9);
    // sizing refreshed the outlet with the old efficiency
    sized.set_outlet(outlet);
    let eff = sized
        .size(&model, &SizeSetup::new(MachineAttr::EffIsen))
        .unwrap();
    assert_relative_eq!(eff, 0.85, max_relative = 1e-6);
}
