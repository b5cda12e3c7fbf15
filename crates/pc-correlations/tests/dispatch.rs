//! Table dispatch against real geometries.

use pc_correlations::{
    Bulk, Chevron, FlowInput, FlowProps, Geometry, GeometryKind, Method, MethodKey, MethodTable,
    OffsetFin, Regime, Side, Smooth, Transfer, TwoPhase,
};

fn liquid() -> Bulk {
    Bulk {
        rho: 1250.0,
        cp: 1350.0,
        mu: 3.0e-4,
        k: 0.078,
    }
}

fn single(g: f64) -> FlowInput {
    FlowInput {
        g,
        props: FlowProps::Single(liquid()),
        q_flux: 0.0,
        gravity: 9.80665,
    }
}

fn boiling(q_flux: f64) -> FlowInput {
    FlowInput {
        g: 40.0,
        props: FlowProps::Two(TwoPhase {
            x: 0.5,
            liquid: liquid(),
            rho_v: 28.0,
            h_fg: 1.75e5,
            t_sat: 335.0,
            sigma: Some(0.01),
        }),
        q_flux,
        gravity: 9.80665,
    }
}

fn geometries() -> [Geometry; 3] {
    [
        Geometry::Chevron(Chevron {
            b: 0.002,
            beta: 60.0,
            pitch: 0.007,
            phi: 1.2,
        }),
        Geometry::OffsetFin(OffsetFin {
            s: 0.002,
            h: 0.005,
            t: 0.0002,
            l: 0.004,
        }),
        Geometry::Smooth(Smooth { b: 0.003 }),
    ]
}

#[test]
fn single_phase_dispatch_for_every_geometry_and_side() {
    let table = MethodTable::default();
    for geometry in geometries() {
        for side in [Side::Wf, Side::Sf] {
            for regime in Regime::SINGLE_PHASE {
                let (_, heat) = table.heat(&geometry, side, regime, &single(200.0)).unwrap();
                let friction = table
                    .friction(&geometry, side, regime, &single(200.0))
                    .unwrap();
                assert!(heat.h > 0.0 && friction.f > 0.0);
            }
        }
    }
}

#[test]
fn chevron_evaporation_uses_heat_flux() {
    let table = MethodTable::default();
    let geometry = geometries()[0];
    let (method, low) = table
        .heat(&geometry, Side::Wf, Regime::TpEvap, &boiling(2.0e3))
        .unwrap();
    let (_, high) = table
        .heat(&geometry, Side::Wf, Regime::TpEvap, &boiling(2.0e4))
        .unwrap();
    assert_eq!(method, Method::YanLin);
    assert!(method.uses_heat_flux());
    assert!(high.h > low.h);
}

#[test]
fn offset_fin_two_phase_is_missing() {
    let table = MethodTable::default();
    let geometry = geometries()[1];
    let err = table
        .heat(&geometry, Side::Wf, Regime::TpCond, &boiling(0.0))
        .unwrap_err();
    assert!(err.to_string().contains("tpCond"), "{err}");
}

#[test]
fn geometry_mismatch_is_reported() {
    let mut table = MethodTable::empty();
    table
        .set(
            MethodKey::new(GeometryKind::Smooth, Transfer::Heat, Side::Sf, Regime::Liq),
            Method::ShibaniOzisik,
        )
        .unwrap();
    assert!(Method::ShibaniOzisik.heat(&geometries()[0], &single(100.0)).is_err());
    assert!(table.validate().is_ok());
}
