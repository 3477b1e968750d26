//! Sheet-metal material properties for warping analysis.
//!
//! Thermal property values are typical room-temperature handbook figures
//! for the common laser-cut alloys of each family; the susceptibility
//! factor folds in shop experience with how readily each family distorts
//! under cutting heat relative to mild steel.

use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};

/// Material families supported by the warping-risk calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Low-carbon structural steel
    MildSteel,
    /// Austenitic stainless (304/316 class)
    StainlessSteel,
    /// Wrought aluminum (5052/6061 class)
    Aluminum,
    /// Pure and low-alloy copper
    Copper,
    /// Common yellow brass
    Brass,
    /// Commercially pure and Ti-6Al-4V titanium
    Titanium,
}

impl MaterialKind {
    /// All material kinds for UI selection
    pub const ALL: [MaterialKind; 6] = [
        MaterialKind::MildSteel,
        MaterialKind::StainlessSteel,
        MaterialKind::Aluminum,
        MaterialKind::Copper,
        MaterialKind::Brass,
        MaterialKind::Titanium,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ScoreResult<Self> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "mildsteel" | "steel" | "carbonsteel" | "ms" => Ok(MaterialKind::MildSteel),
            "stainlesssteel" | "stainless" | "ss" | "304" | "316" => {
                Ok(MaterialKind::StainlessSteel)
            }
            "aluminum" | "aluminium" | "al" => Ok(MaterialKind::Aluminum),
            "copper" | "cu" => Ok(MaterialKind::Copper),
            "brass" => Ok(MaterialKind::Brass),
            "titanium" | "ti" => Ok(MaterialKind::Titanium),
            _ => Err(ScoreError::unknown_benchmark(s)),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::MildSteel => "Mild Steel",
            MaterialKind::StainlessSteel => "Stainless Steel",
            MaterialKind::Aluminum => "Aluminum",
            MaterialKind::Copper => "Copper",
            MaterialKind::Brass => "Brass",
            MaterialKind::Titanium => "Titanium",
        }
    }

    /// Thermal properties for this material family
    pub fn properties(&self) -> ThermalProperties {
        match self {
            MaterialKind::MildSteel => ThermalProperties {
                expansion_um_per_m_k: 11.8,
                conductivity_w_per_m_k: 50.0,
                susceptibility: 1.0,
            },
            MaterialKind::StainlessSteel => ThermalProperties {
                expansion_um_per_m_k: 17.3,
                conductivity_w_per_m_k: 16.0,
                susceptibility: 1.6,
            },
            MaterialKind::Aluminum => ThermalProperties {
                expansion_um_per_m_k: 23.1,
                conductivity_w_per_m_k: 237.0,
                susceptibility: 1.3,
            },
            MaterialKind::Copper => ThermalProperties {
                expansion_um_per_m_k: 16.5,
                conductivity_w_per_m_k: 401.0,
                susceptibility: 0.9,
            },
            MaterialKind::Brass => ThermalProperties {
                expansion_um_per_m_k: 19.0,
                conductivity_w_per_m_k: 120.0,
                susceptibility: 1.1,
            },
            MaterialKind::Titanium => ThermalProperties {
                expansion_um_per_m_k: 8.6,
                conductivity_w_per_m_k: 22.0,
                susceptibility: 1.2,
            },
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Thermal behavior of one material family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalProperties {
    /// Coefficient of thermal expansion (um/m/K)
    pub expansion_um_per_m_k: f64,

    /// Thermal conductivity (W/m/K)
    pub conductivity_w_per_m_k: f64,

    /// Relative distortion susceptibility (mild steel = 1.0)
    pub susceptibility: f64,
}

impl ThermalProperties {
    /// Dimensionless thermal-distortion index used as the warping
    /// calculator's material driver: susceptibility-weighted expansion,
    /// scaled so mild steel sits near 1.2 and aluminum near 3.0.
    pub fn distortion_index(&self) -> f64 {
        self.susceptibility * self.expansion_um_per_m_k / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_lookup() {
        let props = MaterialKind::Aluminum.properties();
        assert_eq!(props.expansion_um_per_m_k, 23.1);
        assert_eq!(props.conductivity_w_per_m_k, 237.0);
    }

    #[test]
    fn test_distortion_index_ordering() {
        // Aluminum and stainless are the distortion-prone families;
        // titanium and copper hold shape best.
        let index = |kind: MaterialKind| kind.properties().distortion_index();
        assert!(index(MaterialKind::Aluminum) > index(MaterialKind::MildSteel));
        assert!(index(MaterialKind::StainlessSteel) > index(MaterialKind::MildSteel));
        assert!(index(MaterialKind::Titanium) < index(MaterialKind::MildSteel));
        assert!(index(MaterialKind::Copper) < index(MaterialKind::Brass));
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(
            MaterialKind::from_str_flexible("Stainless Steel").unwrap(),
            MaterialKind::StainlessSteel
        );
        assert_eq!(
            MaterialKind::from_str_flexible("aluminium").unwrap(),
            MaterialKind::Aluminum
        );
        assert_eq!(
            MaterialKind::from_str_flexible("TI").unwrap(),
            MaterialKind::Titanium
        );

        let err = MaterialKind::from_str_flexible("plywood").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_BENCHMARK");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MaterialKind::StainlessSteel).unwrap();
        assert_eq!(json, "\"stainless_steel\"");
        let roundtrip: MaterialKind = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, MaterialKind::StainlessSteel);
    }

    #[test]
    fn test_all_materials_have_positive_properties() {
        for kind in MaterialKind::ALL {
            let props = kind.properties();
            assert!(props.expansion_um_per_m_k > 0.0);
            assert!(props.conductivity_w_per_m_k > 0.0);
            assert!(props.susceptibility > 0.0);
        }
    }
}
