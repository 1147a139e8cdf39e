//! Persisted-query dispatch against the partner API.
//!
//! Callers name one of the registered [`QueryDefinition`]s; the cache attaches a valid
//! partner token, posts the persisted-query envelope, and returns the `data` member.

pub mod query;

pub use query::*;

// crates.io
use ::http::{
	Method,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{_prelude::*, cache::TokenCache, obs::TokenSpan, slot::TokenKind};

const ORIGIN: &str = "partner API";

impl TokenCache {
	/// Runs the registered query `name` with `variables` and returns the response `data`.
	///
	/// Unknown names fail with [`Error::UnknownQuery`] before any token or network work.
	pub async fn invoke_query(&self, name: &str, variables: Value) -> Result<Value> {
		let query =
			QueryDefinition::find(name).ok_or_else(|| Error::UnknownQuery { name: name.into() })?;

		self.invoke(query, variables).await
	}

	/// Runs `query` with `variables` and returns the response `data`.
	///
	/// A missing `data` member yields [`Value::Null`].
	pub async fn invoke(&self, query: &QueryDefinition, variables: Value) -> Result<Value> {
		TokenSpan::new(TokenKind::Partner, query.operation_name)
			.instrument(async move {
				let token = self.get_partner_token().await?;
				let client = &self.descriptor.client;
				let request = ::http::Request::builder()
					.method(Method::POST)
					.uri(self.descriptor.endpoints.partner_api.as_str())
					.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
					.header("App-Platform", client.app_platform.as_str())
					.header("Spotify-App-Version", client.app_version.as_str())
					.header(CONTENT_TYPE, "application/json; charset=utf-8")
					.header(ACCEPT, "application/json")
					.body(query.request_body(variables).to_string().into_bytes())?;
				let body = self.http_client.send(request).await?;

				match body {
					Value::Object(mut map) => match map.remove("errors") {
						Some(errors) if !errors.is_null() =>
							Err(Error::PartnerApi { errors: errors.to_string() }),
						_ => Ok(map.remove("data").unwrap_or_default()),
					},
					other => Err(Error::malformed(
						ORIGIN,
						format!("expected a JSON object, got `{other}`"),
					)),
				}
			})
			.await
	}
}
