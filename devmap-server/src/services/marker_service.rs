use devmap_api::geo::extract_lat_lng;
use devmap_api::models::{DeviceRecord, EquipmentKind, MapMarker, MarkerIcon};
use minijinja::{Environment, context};
use time::OffsetDateTime;

use crate::services::StatusPolicy;

const POPUP_TEMPLATE: &str = r#"<strong>{{ title }}</strong><br>
Type: {{ equipment_type }}<br>
Site: {{ site }}<br>
Last seen: {{ last_seen }}<br>
Network: {{ network }}<br>
Signal: {% if signal %}<img src="{{ signal }}.png" alt="Signal {{ signal }}" style="height:14px;vertical-align:top;">{% else %}Unavailable{% endif %}"#;

/// Picks the glyph for an equipment type and tints it.
pub fn select_icon(equipment_type: Option<&str>, color: &str) -> MarkerIcon {
    let kind = EquipmentKind::from_type(equipment_type);
    let glyph = match kind {
        EquipmentKind::Gateway => "fa-tower-broadcast",
        EquipmentKind::Node => "fa-address-card",
    };

    MarkerIcon {
        kind,
        glyph: glyph.to_string(),
        color: color.to_string(),
        class_name: String::from("fa-icon-wrapper"),
        size: [16, 16],
        anchor: [16, 16],
        popup_anchor: [0, -32],
        html: format!(r#"<i class="fa-solid {glyph} fa-2xl" style="color: {color};"></i>"#),
    }
}

/// Renders device popups through an auto-escaping HTML template.
pub struct PopupRenderer {
    env: Environment<'static>,
}

impl PopupRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("popup.html", POPUP_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Missing fields are rendered as empty text.
    pub fn render(&self, device: &DeviceRecord) -> Result<String, minijinja::Error> {
        let template = self.env.get_template("popup.html")?;

        template.render(context! {
            title => device.title(),
            equipment_type => device.equipment_type.as_deref().unwrap_or_default(),
            site => device.site.as_deref().unwrap_or_default(),
            last_seen => device.last_seen.as_deref().unwrap_or_default(),
            network => device.network.as_deref().unwrap_or_default(),
            signal => device.signal_level(),
        })
    }
}

/// Turns device records into map markers.
pub struct MarkerBuilder {
    policy: StatusPolicy,
    popups: PopupRenderer,
}

impl MarkerBuilder {
    pub fn new(policy: StatusPolicy) -> Result<Self, minijinja::Error> {
        Ok(Self {
            policy,
            popups: PopupRenderer::new()?,
        })
    }

    /// `None` when the device has no readable location.
    pub fn build(&self, device: DeviceRecord, now: OffsetDateTime) -> Option<MapMarker> {
        let position = device.location.as_deref().and_then(extract_lat_lng)?;

        let status = self.policy.classify(device.last_seen.as_deref(), now);
        let icon = select_icon(device.equipment_type.as_deref(), status.color());
        let popup = match self.popups.render(&device) {
            Ok(popup) => popup,
            Err(e) => {
                tracing::warn!("Failed to render popup for {:?}: {}", device.dev_eui, e);
                return None;
            }
        };

        Some(MapMarker {
            id: device.dev_eui.clone(),
            position,
            status,
            icon,
            popup,
            device,
        })
    }
}
