//! Serialize maps with structured keys as a sequence of `(key, value)` pairs.
//!
//! JSON object keys must be strings, so maps keyed by [`crate::Position`] or
//! [`crate::MapId`] go through this module with `#[serde(with = "...")]`.

use serde::de::{Deserialize, Deserializer};
use serde::ser::Serializer;
use serde::Serialize;

pub fn serialize<'a, M, K, V, S>(map: &'a M, serializer: S) -> Result<S::Ok, S::Error>
where
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    K: Serialize + 'a,
    V: Serialize + 'a,
    S: Serializer,
{
    serializer.collect_seq(map)
}

pub fn deserialize<'de, M, K, V, D>(deserializer: D) -> Result<M, D::Error>
where
    M: FromIterator<(K, V)>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
    Ok(pairs.into_iter().collect())
}
