//! Domain models for the catalog wire format.

mod page;
mod title;

pub use page::PageResponse;
pub use title::Title;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize a release date leniently.
///
/// The upstream API sends dates as `"YYYY-MM-DD"` strings but omits the
/// field, sends `null`, or sends `""` for unreleased titles; malformed
/// strings also occur. All of those become `None`.
pub(crate) fn deserialize_release_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}
