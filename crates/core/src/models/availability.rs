use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub barber_id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    #[serde(with = "hh_mm")]
    pub slots: Vec<NaiveTime>,
}

/// Slot lists travel as `"HH:MM"` strings.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(slots: &[NaiveTime], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(slots.len()))?;
        for slot in slots {
            seq.serialize_element(&slot.format(FORMAT).to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|slot| NaiveTime::parse_from_str(slot, FORMAT).map_err(D::Error::custom))
            .collect()
    }
}
