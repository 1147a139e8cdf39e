//! Session-cookie exchange for the account-token slot.
//!
//! Unlike the other two protocols, the web-player endpoint reports an absolute expiry in
//! epoch milliseconds.

// crates.io
use ::http::{
	Method,
	header::{ACCEPT, COOKIE},
};
// self
use crate::{
	_prelude::*,
	cache::{TokenCache, response},
	slot::{CachedToken, TokenKind},
};

const ORIGIN: &str = "account token";
const NANOS_PER_MILLI: i128 = 1_000_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebAccessTokenResponse {
	access_token: String,
	#[serde(default)]
	access_token_expiration_timestamp_ms: Option<i64>,
}

impl TokenCache {
	/// Exchanges the `sp_dc` cookie for a web-player access token.
	pub(crate) async fn refresh_account_token(&self) -> Result<CachedToken> {
		let cookie = self
			.session_cookie
			.read()
			.clone()
			.ok_or(Error::CredentialsMissing { kind: TokenKind::Account })?;
		let request = ::http::Request::builder()
			.method(Method::GET)
			.uri(self.descriptor.web_access_token_url().as_str())
			.header("App-Platform", self.descriptor.client.app_platform.as_str())
			.header(COOKIE, cookie.header_value())
			.header(ACCEPT, "application/json")
			.body(Vec::new())?;
		let body = self.http_client.send(request).await?;

		if let Some(message) = response::error_text(&body, "error") {
			return Err(Error::Provider { kind: TokenKind::Account, message });
		}

		let parsed: WebAccessTokenResponse = response::parse(ORIGIN, body)?;
		let expires_at = OffsetDateTime::from_unix_timestamp_nanos(
			i128::from(parsed.access_token_expiration_timestamp_ms.unwrap_or(0)) * NANOS_PER_MILLI,
		)
		.map_err(|e| Error::malformed(ORIGIN, e))?;

		Ok(CachedToken::new(parsed.access_token, expires_at))
	}
}
