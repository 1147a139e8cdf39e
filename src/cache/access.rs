//! Client-credentials grant for the access-token slot.

// crates.io
use ::http::{
	Method,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	cache::{TokenCache, response},
	slot::{CachedToken, TokenKind},
};

const ORIGIN: &str = "access token";

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
	access_token: String,
	#[serde(default)]
	expires_in: Option<i64>,
}

impl TokenCache {
	/// Runs `grant_type=client_credentials` with HTTP Basic client authentication.
	pub(crate) async fn refresh_access_token(&self) -> Result<CachedToken> {
		let credentials = self
			.client_credentials
			.read()
			.clone()
			.ok_or(Error::CredentialsMissing { kind: TokenKind::Access })?;
		let form = form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "client_credentials")
			.finish();
		let request = ::http::Request::builder()
			.method(Method::POST)
			.uri(self.descriptor.endpoints.token.as_str())
			.header(AUTHORIZATION, credentials.basic_authorization())
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(ACCEPT, "application/json")
			.body(form.into_bytes())?;
		let body = self.http_client.send(request).await?;

		if let Some(message) = response::error_text(&body, "error") {
			return Err(Error::Provider { kind: TokenKind::Access, message });
		}

		let now = OffsetDateTime::now_utc();
		let parsed: AccessTokenResponse = response::parse(ORIGIN, body)?;
		let expires_at = response::expires_after(ORIGIN, now, parsed.expires_in.unwrap_or(0))?;

		Ok(CachedToken::new(parsed.access_token, expires_at))
	}
}
