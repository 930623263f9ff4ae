use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Discrete temperature classification used to match clothing against the weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Cold,
    Mild,
    Hot,
}

impl TemperatureBand {
    pub const ALL: [TemperatureBand; 3] = [
        TemperatureBand::Cold,
        TemperatureBand::Mild,
        TemperatureBand::Hot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "cold",
            TemperatureBand::Mild => "mild",
            TemperatureBand::Hot => "hot",
        }
    }

    /// Catalog labels that denote this band
    ///
    /// The canonical English name comes first, followed by the Spanish
    /// adjectives the widget's catalog is written with.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            TemperatureBand::Cold => &["cold", "frío", "muy frío"],
            TemperatureBand::Mild => &["mild", "templado"],
            TemperatureBand::Hot => &["hot", "calor"],
        }
    }
}

impl Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single garment from the catalog
///
/// Field names accept both the English names and the Spanish ones used by
/// `prendas.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    /// Grouping key for outfit composition (e.g. "Camisa", "Pantalón")
    #[serde(alias = "categoria")]
    pub category: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "talla")]
    pub size: String,
    #[serde(alias = "estilos")]
    pub applicable_styles: Vec<String>,
    #[serde(alias = "temperatura_adecuada")]
    pub applicable_temperature_bands: Vec<String>,
    #[serde(default, alias = "imagen_url")]
    pub image_url: String,
    #[serde(default, alias = "descripcion_adicional")]
    pub additional_description: String,
}

/// A style the widget offers, with the icon it is drawn with
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StyleOption {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const STYLE_OPTIONS: &[StyleOption] = &[
    StyleOption { name: "Trabajo", icon: "workflow" },
    StyleOption { name: "Trabajo Formal", icon: "user" },
    StyleOption { name: "Casa", icon: "home" },
    StyleOption { name: "Casa Formal", icon: "shield" },
    StyleOption { name: "Deporte", icon: "share" },
    StyleOption { name: "Salidas", icon: "messageSquare" },
];
