pub mod article;
pub mod custom_object;
pub mod custom_status;
pub mod page;
pub mod request;

pub use article::*;
pub use custom_object::*;
pub use custom_status::*;
pub use page::*;
pub use request::*;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
