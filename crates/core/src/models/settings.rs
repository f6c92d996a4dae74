use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single editable business setting (contact details, opening hours text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub label: String,
    pub category: String,
}

/// `(key, default value, label, category)` for every known setting.
pub const DEFAULT_SETTINGS: &[(&str, &str, &str, &str)] = &[
    ("phone", "47 9961-3570", "Phone", "contact"),
    ("whatsapp", "5547996135570", "WhatsApp", "contact"),
    ("address", "R Monsenhor Gercino 5207 - Jarivatuba", "Address", "location"),
    ("city", "Joinville, SC", "City", "location"),
    ("instagram", "BARBEARIA.ARTCABELO", "Instagram", "social"),
    ("facebook", "", "Facebook", "social"),
    ("hours_weekday", "09:00 - 19:00", "Weekday hours", "hours"),
    ("hours_saturday", "09:00 - 18:00", "Saturday hours", "hours"),
    ("hours_sunday", "Fechado", "Sunday hours", "hours"),
];

pub type PublicSettings = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub values: BTreeMap<String, String>,
}

/// Defaults overlaid with whatever is stored.
pub fn merge_with_defaults<'a, I>(stored: I) -> PublicSettings
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut settings: PublicSettings = DEFAULT_SETTINGS
        .iter()
        .map(|(key, value, _, _)| (key.to_string(), value.to_string()))
        .collect();

    for (key, value) in stored {
        settings.insert(key.to_string(), value.to_string());
    }

    settings
}
