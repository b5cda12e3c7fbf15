//! Plain-number inputs to the correlation functions.

/// Bulk properties of a single-phase stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bulk {
    /// Density [kg/m³]
    pub rho: f64,
    /// Isobaric specific heat [J/(kg·K)]
    pub cp: f64,
    /// Dynamic viscosity [Pa·s]
    pub mu: f64,
    /// Thermal conductivity [W/(m·K)]
    pub k: f64,
}

impl Bulk {
    pub fn prandtl(&self) -> f64 {
        self.cp * self.mu / self.k
    }

    /// Thermal diffusivity [m²/s].
    pub fn diffusivity(&self) -> f64 {
        self.k / (self.rho * self.cp)
    }
}

/// Saturated properties and local quality of a boiling or condensing stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhase {
    /// Vapour quality
    pub x: f64,
    pub liquid: Bulk,
    /// Saturated vapour density [kg/m³]
    pub rho_v: f64,
    /// Latent heat [J/kg]
    pub h_fg: f64,
    /// Saturation temperature [K]
    pub t_sat: f64,
    /// Surface tension [N/m]
    pub sigma: Option<f64>,
}

impl TwoPhase {
    /// Homogeneous mixture density [kg/m³].
    pub fn rho_mix(&self) -> f64 {
        1.0 / (self.x / self.rho_v + (1.0 - self.x) / self.liquid.rho)
    }

    /// Equivalent mass-flux factor `(1 - x) + x sqrt(rho_l / rho_v)`.
    pub fn equivalent_factor(&self) -> f64 {
        (1.0 - self.x) + self.x * (self.liquid.rho / self.rho_v).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowProps {
    Single(Bulk),
    Two(TwoPhase),
}

impl FlowProps {
    /// Density used for momentum terms [kg/m³].
    pub fn rho(&self) -> f64 {
        match self {
            FlowProps::Single(b) => b.rho,
            FlowProps::Two(tp) => tp.rho_mix(),
        }
    }
}

/// Everything a correlation reads for one wall segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowInput {
    /// Mass flux through one channel [kg/(m²·s)]
    pub g: f64,
    pub props: FlowProps,
    /// Wall heat flux [W/m²], used by boiling correlations
    pub q_flux: f64,
    /// Gravitational acceleration [m/s²]
    pub gravity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixture_density_limits() {
        let liquid = Bulk {
            rho: 1000.0,
            cp: 4000.0,
            mu: 1e-3,
            k: 0.6,
        };
        let mut tp = TwoPhase {
            x: 0.0,
            liquid,
            rho_v: 10.0,
            h_fg: 2.0e6,
            t_sat: 373.0,
            sigma: None,
        };
        assert!((tp.rho_mix() - 1000.0).abs() < 1e-9);
        tp.x = 1.0;
        assert!((tp.rho_mix() - 10.0).abs() < 1e-9);
        assert!((tp.equivalent_factor() - 10.0).abs() < 1e-9);
    }
}
