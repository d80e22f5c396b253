use indexmap::IndexMap;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Repeated groups come back either as a JSON array or as an object keyed by
/// the decimal index (`{"0": .., "1": ..}`), depending on the adapter version.
#[derive(Deserialize)]
#[serde(untagged)]
enum Indexed<T> {
    List(Vec<T>),
    Map(IndexMap<String, T>),
}

pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Indexed::<T>::deserialize(deserializer)? {
        Indexed::List(items) => Ok(items),
        Indexed::Map(entries) => {
            let mut keyed = entries
                .into_iter()
                .map(|(key, value)| {
                    key.parse::<usize>()
                        .map(|index| (index, value))
                        .map_err(|_| D::Error::custom(format!("invalid index key {key:?}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            keyed.sort_by_key(|(index, _)| *index);

            if let Some(position) = keyed.iter().enumerate().position(|(i, (index, _))| i != *index) {
                return Err(D::Error::custom(format!("missing entry for index {position}")));
            }

            Ok(keyed.into_iter().map(|(_, value)| value).collect())
        }
    }
}
