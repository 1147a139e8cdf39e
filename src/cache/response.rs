//! Helpers shared by the refresh protocols for reading provider responses.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Returns the provider's error text when `field` is present and non-null.
///
/// Object-shaped errors prefer their `message` or `error_description` members and fall back
/// to the serialized object.
pub(crate) fn error_text(body: &Value, field: &str) -> Option<String> {
	match body.get(field)? {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		Value::Object(map) => Some(
			["message", "error_description"]
				.iter()
				.find_map(|key| map.get(*key).and_then(Value::as_str))
				.map(ToOwned::to_owned)
				.unwrap_or_else(|| Value::Object(map.clone()).to_string()),
		),
		other => Some(other.to_string()),
	}
}

/// Deserializes `body` into `T`, reporting the failing JSON path on error.
pub(crate) fn parse<T>(origin: &'static str, body: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(body).map_err(|e| Error::malformed(origin, e))
}

/// Adds `seconds` to `now`, rejecting values outside the representable range.
pub(crate) fn expires_after(
	origin: &'static str,
	now: OffsetDateTime,
	seconds: i64,
) -> Result<OffsetDateTime> {
	now.checked_add(Duration::seconds(seconds))
		.ok_or_else(|| Error::malformed(origin, format!("lifetime of {seconds}s is out of range")))
}
