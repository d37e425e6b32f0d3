//! Partial-update fields that can be cleared.
//!
//! With `#[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]`
//! on an `Option<Option<T>>` field:
//!
//! | JSON            | value           |
//! |-----------------|-----------------|
//! | field absent    | `None`          |
//! | `"field": null` | `Some(None)`    |
//! | `"field": v`    | `Some(Some(v))` |

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
