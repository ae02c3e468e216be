use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::{
    errors::{AppError, AppResult},
    json::{is_truthy, optional_scalar_string, scalar_string},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePayload {
    pub business: Business,
    #[serde(default, deserialize_with = "deserialize_menu")]
    pub menu: Vec<MenuCategory>,
    #[serde(default)]
    pub tables: Option<Vec<TableRecord>>,
    #[serde(default)]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub website: WebsiteSettings,
    #[serde(default)]
    pub layout: Option<Value>,
}

impl Business {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebsiteSettings {
    #[serde(default)]
    pub website_title: Option<String>,
    #[serde(default)]
    pub website_description: Option<String>,
    #[serde(default)]
    pub about_title: Option<String>,
    #[serde(default)]
    pub about_description: Option<String>,
    #[serde(default)]
    pub about_image: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_address: Option<String>,
    #[serde(default)]
    pub contact_working_hours: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub map_latitude: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub map_longitude: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub map_zoom_level: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub show_menu: Option<bool>,
    #[serde(default)]
    pub show_contact: Option<bool>,
    #[serde(default)]
    pub show_map: Option<bool>,
    #[serde(default)]
    pub allow_reservations: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_campaign_bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRecord {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub table_number: String,
}

/// Category order follows the payload's key order.
fn deserialize_menu<'de, D>(deserializer: D) -> Result<Vec<MenuCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(vec![]);
    };
    raw.into_iter()
        .map(|(name, items)| {
            let items = if items.is_null() {
                vec![]
            } else {
                serde_json::from_value::<Vec<MenuItem>>(items)
                    .map_err(<D::Error as serde::de::Error>::custom)?
            };
            Ok(MenuCategory { name, items })
        })
        .collect()
}

/// Everything the page needs, captured once when the fetch completes and read
/// only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub business: Business,
    pub menu: Vec<MenuCategory>,
    pub tables: Vec<TableRecord>,
    pub layout: Option<Value>,
}

impl PageSnapshot {
    pub fn from_payload(payload: PagePayload) -> Self {
        let layout = payload
            .layout
            .filter(is_truthy)
            .or_else(|| payload.business.layout.clone().filter(is_truthy));
        Self {
            business: payload.business,
            menu: payload.menu,
            tables: payload.tables.unwrap_or_default(),
            layout,
        }
    }

    pub fn from_value(value: Value) -> AppResult<Self> {
        let payload: PagePayload = serde_json::from_value(value)
            .map_err(|err| AppError::InvalidResponse(format!("page payload: {err}")))?;
        Ok(Self::from_payload(payload))
    }

    pub fn website(&self) -> &WebsiteSettings {
        &self.business.website
    }

    pub fn raw_layout(&self) -> Option<&Value> {
        self.layout.as_ref()
    }
}

/// Body of the public reservation POST.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRequest {
    pub table: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub reservation_time: String,
    pub party_size: String,
    pub notes: String,
}
