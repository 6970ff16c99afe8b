mod appointment;
mod availability;
mod stylist;

pub use appointment::*;
pub use availability::*;
pub use stylist::*;

/// Serde adapter for calendar dates in `YYYY-MM-DD` form.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use crate::scheduling::clock;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&clock::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        clock::parse_date(&value).map_err(serde::de::Error::custom)
    }
}
