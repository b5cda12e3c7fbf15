//! Plate pack dimensions and per-side channel geometry.

use pc_correlations::Geometry;
use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, ComponentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowArrangement {
    #[default]
    Counter,
    Parallel,
}

/// Direction of a stream along the plate length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Up,
    Down,
}

impl Orientation {
    /// Elevation gain per unit of flow length.
    pub fn rise(self) -> f64 {
        match self {
            Orientation::Horizontal => 0.0,
            Orientation::Up => 1.0,
            Orientation::Down => -1.0,
        }
    }
}

/// Channel geometry and port data for one fluid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSide {
    pub geometry: Geometry,
    /// Fouling resistance [m²·K/W]
    #[serde(default)]
    pub r_fouling: f64,
    /// Port diameter [m]
    pub port_d: f64,
    #[serde(default)]
    pub orientation: Orientation,
}

impl PlateSide {
    pub fn new(geometry: Geometry, port_d: f64) -> Self {
        Self {
            geometry,
            r_fouling: 0.0,
            port_d,
            orientation: Orientation::Horizontal,
        }
    }

    /// Flow area of the ports [m²].
    pub fn port_area(&self) -> f64 {
        std::f64::consts::FRAC_PI_4 * self.port_d * self.port_d
    }
}

/// Plate pack of a gasketed plate heat exchanger.
///
/// `n_plate` counts every plate including the two end plates. The `n_plate -
/// 1` channels alternate between the fluids, with the working fluid taking
/// the odd one; the `n_plate - 2` inner plates are the heat transfer walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateLayout {
    pub n_plate: u32,
    /// Length in the flow direction [m]
    pub l: f64,
    /// Width [m]
    pub w: f64,
    /// Plate thickness [m]
    pub t_plate: f64,
    /// Plate conductivity [W/(m·K)]
    pub k_plate: f64,
    #[serde(default)]
    pub arrangement: FlowArrangement,
    pub wf: PlateSide,
    pub sf: PlateSide,
}

impl PlateLayout {
    pub const MIN_PLATES: u32 = 3;

    pub fn validate(&self) -> ComponentResult<()> {
        let positive = |v: f64, what: &'static str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ComponentError::InvalidArg { what })
            }
        };
        if self.n_plate < Self::MIN_PLATES {
            return Err(ComponentError::InvalidArg {
                what: "a plate pack needs at least 3 plates",
            });
        }
        positive(self.w, "plate width must be positive")?;
        positive(self.t_plate, "plate thickness must be positive")?;
        positive(self.k_plate, "plate conductivity must be positive")?;
        positive(self.wf.port_d, "working fluid port diameter must be positive")?;
        positive(self.sf.port_d, "secondary fluid port diameter must be positive")?;
        if !self.l.is_finite() || self.l < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "plate length must be finite and non-negative",
            });
        }
        for side in [&self.wf, &self.sf] {
            if !side.r_fouling.is_finite() || side.r_fouling < 0.0 {
                return Err(ComponentError::InvalidArg {
                    what: "fouling resistance must be finite and non-negative",
                });
            }
            side.geometry.validate()?;
        }
        Ok(())
    }

    pub fn channels_wf(&self) -> u32 {
        (self.n_plate - 1).div_ceil(2)
    }

    pub fn channels_sf(&self) -> u32 {
        (self.n_plate - 1) / 2
    }

    pub fn walls(&self) -> u32 {
        self.n_plate - 2
    }

    /// Mass flux through one channel [kg/(m²·s)].
    pub fn mass_flux(&self, side: &PlateSide, channels: u32, m: f64) -> f64 {
        let area = channels as f64 * side.geometry.gap() * self.w * side.geometry.open_fraction();
        m / area
    }

    /// Wall conduction resistance [m²·K/W].
    pub fn wall_resistance(&self) -> f64 {
        self.t_plate / self.k_plate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_correlations::Chevron;

    fn chevron_layout(n_plate: u32) -> PlateLayout {
        let geometry = Geometry::Chevron(Chevron {
            b: 0.002,
            beta: 60.0,
            pitch: 0.007,
            phi: 1.2,
        });
        PlateLayout {
            n_plate,
            l: 0.5,
            w: 0.1,
            t_plate: 5e-4,
            k_plate: 16.0,
            arrangement: FlowArrangement::Counter,
            wf: PlateSide::new(geometry, 0.02),
            sf: PlateSide::new(geometry, 0.02),
        }
    }

    #[test]
    fn channel_split() {
        let layout = chevron_layout(10);
        assert_eq!(layout.channels_wf(), 5);
        assert_eq!(layout.channels_sf(), 4);
        assert_eq!(layout.walls(), 8);

        let layout = chevron_layout(3);
        assert_eq!(layout.channels_wf(), 1);
        assert_eq!(layout.channels_sf(), 1);
        assert_eq!(layout.walls(), 1);
    }

    #[test]
    fn validation() {
        assert!(chevron_layout(10).validate().is_ok());
        assert!(chevron_layout(2).validate().is_err());
        let mut layout = chevron_layout(10);
        layout.w = 0.0;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn mass_flux_scales_with_channels() {
        let layout = chevron_layout(11);
        let g = layout.mass_flux(&layout.wf, layout.channels_wf(), 0.2);
        assert!((g - 0.2 / (5.0 * 0.002 * 0.1)).abs() < 1e-9);
    }

    #[test]
    fn orientation_rise() {
        assert_eq!(Orientation::Up.rise(), 1.0);
        assert_eq!(Orientation::Horizontal.rise(), 0.0);
    }
}
