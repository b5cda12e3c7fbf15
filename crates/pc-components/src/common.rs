//! Helpers shared by component sizing and evaluation.

use pc_core::numeric::ensure_finite;
use pc_core::{RootOptions, Tolerances, bisect};
use pc_fluids::{FlowState, MassFlow};

use crate::error::{ComponentError, ComponentResult};

/// Reject an efficiency outside `(0, 1]`.
pub fn check_efficiency(value: f64, what: &'static str) -> ComponentResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what)?;
    Ok(())
}

/// Inlet and target outlet for a sizing call, with the optional mass-flow
/// override applied to the inlet.
pub fn sizing_states(
    component: &str,
    inlet: Option<&FlowState>,
    outlet: Option<&FlowState>,
    m: Option<f64>,
) -> ComponentResult<(FlowState, FlowState)> {
    let missing = |port: &str| ComponentError::Config {
        component: component.to_owned(),
        what: format!("{port} state must be set before sizing"),
    };
    let inlet = inlet.ok_or_else(|| missing("inlet"))?;
    let outlet = outlet.ok_or_else(|| missing("outlet"))?;
    let inlet = match m {
        Some(m) => {
            if !m.is_finite() || m <= 0.0 {
                return Err(ComponentError::InvalidArg {
                    what: "sizing mass flow must be finite and positive",
                });
            }
            inlet.with_mass_flow(MassFlow::Known(m))
        }
        None => inlet.clone(),
    };
    Ok((inlet, outlet.clone()))
}

pub fn require_inlet<'a>(component: &str, inlet: Option<&'a FlowState>) -> ComponentResult<&'a FlowState> {
    inlet.ok_or_else(|| ComponentError::Config {
        component: component.to_owned(),
        what: "inlet state is not set".to_owned(),
    })
}

/// Constant-pressure components need matching inlet and outlet pressures.
pub fn check_same_pressure(
    component: &str,
    inlet: &FlowState,
    outlet: &FlowState,
    tol: Tolerances,
) -> ComponentResult<()> {
    let (p_in, p_out) = (inlet.p(), outlet.p());
    if (p_in - p_out).abs() > tol.band(p_in) {
        return Err(ComponentError::Infeasible {
            component: component.to_owned(),
            what: format!("inlet pressure {p_in:.6e} Pa differs from outlet pressure {p_out:.6e} Pa"),
        });
    }
    Ok(())
}

/// Accept a directly computed attribute value when it is finite and positive.
pub fn closed_form(component: &str, attr: &'static str, value: f64) -> ComponentResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ComponentError::Infeasible {
            component: component.to_owned(),
            what: format!("value {value:.6e} for '{attr}'"),
        });
    }
    Ok(value)
}

/// Bisect `residual` on `bounds`, tagging root-finder failures with the
/// component and attribute.
pub fn solve_bounded<F>(
    component: &str,
    attr: &'static str,
    bounds: [f64; 2],
    opts: RootOptions,
    residual: F,
) -> ComponentResult<f64>
where
    F: FnMut(f64) -> ComponentResult<f64>,
{
    let root = bisect(residual, bounds[0], bounds[1], opts)
        .map_err(|e: ComponentError| e.in_sizing(component, attr))?;
    tracing::debug!(
        component,
        attr,
        value = root.x,
        iterations = root.iterations,
        "sized by bisection"
    );
    Ok(root.x)
}

/// Error for attributes that only solve on a bracket.
pub fn bounds_required(component: &str, attr: &'static str) -> ComponentError {
    ComponentError::Config {
        component: component.to_owned(),
        what: format!("sizing '{attr}' needs bounds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_range() {
        assert!(check_efficiency(1.0, "eff").is_ok());
        assert!(check_efficiency(0.0, "eff").is_err());
        assert!(check_efficiency(1.2, "eff").is_err());
        assert!(check_efficiency(f64::NAN, "eff").is_err());
    }

    #[test]
    fn closed_form_rejects_nonsense() {
        assert_eq!(closed_form("c", "m", 2.0).unwrap(), 2.0);
        assert!(closed_form("c", "m", f64::INFINITY).is_err());
        assert!(closed_form("c", "m", -1.0).is_err());
    }

    #[test]
    fn bounded_solve_reports_bracket() {
        let opts = RootOptions::default();
        let x = solve_bounded("c", "x", [0.0, 4.0], opts, |x| Ok(x * x - 2.0)).unwrap();
        assert!((x - 2f64.sqrt()).abs() < 1e-6);

        let err = solve_bounded("c", "x", [2.0, 4.0], opts, |x| Ok(x * x - 2.0)).unwrap_err();
        assert!(matches!(err, ComponentError::NotBracketed { attr: "x", .. }));
    }

    #[test]
    fn finite_check() {
        assert!(check_finite(1.0, "v").is_ok());
        assert!(check_finite(f64::NAN, "v").is_err());
    }
}
