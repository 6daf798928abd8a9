// src/presentation/http/controllers/mod.rs
pub mod articles;
pub mod newsletters;
pub mod publishers;
pub mod subscriptions;
pub mod users;

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

pub(crate) const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Distinguishes an absent field from an explicit `null` in PATCH bodies.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
