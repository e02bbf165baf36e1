pub mod candidate;
pub mod communication;
pub mod job;

use serde::{Deserialize, Deserializer};

/// For PATCH bodies: a missing key stays `None` (via `#[serde(default)]`),
/// an explicit `null` becomes `Some(None)` and clears the column.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
