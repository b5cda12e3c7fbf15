//! Working and secondary fluid identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pure fluids used as cycle working fluids or heat-exchanger secondary fluids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Helium (He)
    He,
    /// Nitrogen (N₂)
    N2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water (H₂O)
    H2O,
    /// Air (pseudo-pure backend fluid)
    Air,
    /// Hydrogen (H₂)
    H2,
    /// Methane (CH₄)
    CH4,
    /// Ammonia (NH₃)
    Ammonia,
    /// Propane
    Propane,
    /// n-Butane
    NButane,
    /// Isobutane
    Isobutane,
    /// n-Pentane
    NPentane,
    /// Isopentane
    Isopentane,
    /// n-Hexane
    NHexane,
    /// Refrigerant R32
    R32,
    /// Refrigerant R134a
    R134a,
    /// Refrigerant R245fa
    R245fa,
    /// Refrigerant R1234yf
    R1234yf,
}

impl Species {
    pub const ALL: [Species; 19] = [
        Species::He,
        Species::N2,
        Species::Ar,
        Species::CO2,
        Species::H2O,
        Species::Air,
        Species::H2,
        Species::CH4,
        Species::Ammonia,
        Species::Propane,
        Species::NButane,
        Species::Isobutane,
        Species::NPentane,
        Species::Isopentane,
        Species::NHexane,
        Species::R32,
        Species::R134a,
        Species::R245fa,
        Species::R1234yf,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::He => "He",
            Species::N2 => "N2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::H2O => "H2O",
            Species::Air => "Air",
            Species::H2 => "H2",
            Species::CH4 => "CH4",
            Species::Ammonia => "NH3",
            Species::Propane => "Propane",
            Species::NButane => "nButane",
            Species::Isobutane => "Isobutane",
            Species::NPentane => "nPentane",
            Species::Isopentane => "Isopentane",
            Species::NHexane => "nHexane",
            Species::R32 => "R32",
            Species::R134a => "R134a",
            Species::R245fa => "R245fa",
            Species::R1234yf => "R1234yf",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::He => "Helium",
            Species::N2 => "Nitrogen",
            Species::Ar => "Argon",
            Species::CO2 => "Carbon Dioxide",
            Species::H2O => "Water",
            Species::Air => "Air",
            Species::H2 => "Hydrogen",
            Species::CH4 => "Methane",
            Species::Ammonia => "Ammonia",
            Species::Propane => "Propane",
            Species::NButane => "n-Butane",
            Species::Isobutane => "Isobutane",
            Species::NPentane => "n-Pentane",
            Species::Isopentane => "Isopentane",
            Species::NHexane => "n-Hexane",
            Species::R32 => "R32",
            Species::R134a => "R134a",
            Species::R245fa => "R245fa",
            Species::R1234yf => "R1234yf",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::He => 4.003,
            Species::N2 => 28.014,
            Species::Ar => 39.948,
            Species::CO2 => 44.010,
            Species::H2O => 18.015,
            Species::Air => 28.965,
            Species::H2 => 2.016,
            Species::CH4 => 16.043,
            Species::Ammonia => 17.031,
            Species::Propane => 44.097,
            Species::NButane => 58.124,
            Species::Isobutane => 58.124,
            Species::NPentane => 72.151,
            Species::Isopentane => 72.151,
            Species::NHexane => 86.178,
            Species::R32 => 52.024,
            Species::R134a => 102.031,
            Species::R245fa => 134.048,
            Species::R1234yf => 114.042,
        }
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn gas_constant(&self) -> f64 {
        8314.462_618 / self.molar_mass()
    }

    /// Map to the rfluids substance used by the CoolProp backend.
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::He => Pure::Helium,
            Species::N2 => Pure::Nitrogen,
            Species::Ar => Pure::Argon,
            Species::CO2 => Pure::CarbonDioxide,
            Species::H2O => Pure::Water,
            Species::Air => Pure::Air,
            Species::H2 => Pure::Hydrogen,
            Species::CH4 => Pure::Methane,
            Species::Ammonia => Pure::Ammonia,
            Species::Propane => Pure::nPropane,
            Species::NButane => Pure::nButane,
            Species::Isobutane => Pure::Isobutane,
            Species::NPentane => Pure::nPentane,
            Species::Isopentane => Pure::Isopentane,
            Species::NHexane => Pure::nHexane,
            Species::R32 => Pure::R32,
            Species::R134a => Pure::R134a,
            Species::R245fa => Pure::R245fa,
            Species::R1234yf => Pure::R1234yf,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HE" | "HELIUM" => Ok(Species::He),
            "N2" | "NITROGEN" => Ok(Species::N2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "H2O" | "WATER" => Ok(Species::H2O),
            "AIR" => Ok(Species::Air),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "NH3" | "AMMONIA" => Ok(Species::Ammonia),
            "PROPANE" | "C3H8" => Ok(Species::Propane),
            "NBUTANE" | "N-BUTANE" | "BUTANE" => Ok(Species::NButane),
            "ISOBUTANE" | "I-BUTANE" => Ok(Species::Isobutane),
            "NPENTANE" | "N-PENTANE" | "PENTANE" => Ok(Species::NPentane),
            "ISOPENTANE" | "I-PENTANE" => Ok(Species::Isopentane),
            "NHEXANE" | "N-HEXANE" | "HEXANE" => Ok(Species::NHexane),
            "R32" => Ok(Species::R32),
            "R134A" => Ok(Species::R134a),
            "R245FA" => Ok(Species::R245fa),
            "R1234YF" => Ok(Species::R1234yf),
            _ => Err("unknown species"),
        }
    }
}

impl Serialize for Species {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown species '{text}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("helium".parse::<Species>().unwrap(), Species::He);
        assert_eq!("NH3".parse::<Species>().unwrap(), Species::Ammonia);
        assert_eq!("n-pentane".parse::<Species>().unwrap(), Species::NPentane);
        assert!("kerosene".parse::<Species>().is_err());
    }

    #[test]
    fn canonical_keys_round_trip() {
        for species in Species::ALL {
            assert_eq!(species.key().parse::<Species>().unwrap(), species);
        }
    }

    #[test]
    fn helium_gas_constant() {
        let r = Species::He.gas_constant();
        assert!((r - 2077.0).abs() < 1.0, "R = {r}");
    }

    #[test]
    fn display_names() {
        assert_eq!(Species::CO2.display_name(), "Carbon Dioxide");
        assert_eq!(Species::R245fa.to_string(), "R245fa");
    }
}
