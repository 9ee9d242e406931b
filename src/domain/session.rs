use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Work sessions that make up one hour in the stored `hours` figure
pub const SESSIONS_PER_HOUR: f64 = 3.0;

/// Daily count of completed work intervals, as stored in sessions.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(with = "day_month_year")]
    pub created: NaiveDate,
    pub sessions_count: u32,
    pub hours: f64,
}

impl SessionRecord {
    /// Zeroed record for the given day
    pub fn fresh(day: NaiveDate) -> Self {
        Self {
            created: day,
            sessions_count: 0,
            hours: 0.0,
        }
    }

    /// Add one completed session and recompute hours
    pub fn increment(&mut self) {
        self.sessions_count += 1;
        self.hours = hours_for(self.sessions_count);
    }

    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.created == day
    }
}

/// sessions / 3, rounded to two decimals
pub fn hours_for(sessions: u32) -> f64 {
    (f64::from(sessions) / SESSIONS_PER_HOUR * 100.0).round() / 100.0
}

/// `DD/MM/YYYY` date encoding
mod day_month_year {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
