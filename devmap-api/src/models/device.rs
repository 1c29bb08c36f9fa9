use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Equipment type that identifies a gateway, every other value is a node.
pub const GATEWAY_TYPE: &str = "gateway";

/// Device row as published by the upstream inventory.
///
/// Every field is optional. Text fields accept numbers and booleans, which are
/// kept in their textual form, while `null`, empty strings and nested values
/// are treated as missing.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device EUI
    #[serde(rename = "devEUI", default, deserialize_with = "lenient_text")]
    pub dev_eui: Option<String>,
    /// Display name
    #[serde(rename = "nom_equipement", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Equipment type, `gateway` or a node type
    #[serde(rename = "type_equipement", default, deserialize_with = "lenient_text")]
    pub equipment_type: Option<String>,
    /// WKT location, `POINT(lat lon)`
    #[serde(rename = "localisation_gps", default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    /// Last communication timestamp as sent upstream
    #[serde(rename = "derniere_comm", default, deserialize_with = "lenient_text")]
    pub last_seen: Option<String>,
    /// Network name
    #[serde(default, deserialize_with = "lenient_text")]
    pub network: Option<String>,
    /// Received signal bucket, expected within 1-5
    #[serde(rename = "indice_signal", default, deserialize_with = "lenient_number")]
    pub signal_index: Option<f64>,
    /// Owning site name
    #[serde(rename = "site_nom", default, deserialize_with = "lenient_text")]
    pub site: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Gateway,
    Node,
}

impl EquipmentKind {
    pub fn from_type(equipment_type: Option<&str>) -> Self {
        match equipment_type {
            Some(GATEWAY_TYPE) => EquipmentKind::Gateway,
            _ => EquipmentKind::Node,
        }
    }
}

impl DeviceRecord {
    /// Decodes one upstream row, `None` when the row is not an object.
    pub fn from_row(row: Value) -> Option<Self> {
        if !row.is_object() {
            return None;
        }

        serde_json::from_value(row).ok()
    }

    pub fn kind(&self) -> EquipmentKind {
        EquipmentKind::from_type(self.equipment_type.as_deref())
    }

    /// Display name, falling back to the EUI and then to an empty title.
    pub fn title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.dev_eui.as_deref())
            .unwrap_or_default()
    }

    /// Signal bucket when it is a whole number within 1-5.
    pub fn signal_level(&self) -> Option<u8> {
        self.signal_index
            .filter(|s| s.fract() == 0.0 && (1.0..=5.0).contains(s))
            .map(|s| s as u8)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}
