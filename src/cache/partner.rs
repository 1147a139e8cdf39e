//! Anonymous client-token exchange for the partner-token slot.

// crates.io
use ::http::{Method, header::ACCEPT};
// self
use crate::{
	_prelude::*,
	cache::{TokenCache, response},
	slot::{CachedToken, TokenKind},
};

const ORIGIN: &str = "partner token";
const DEFAULT_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct GrantedToken {
	token: String,
	#[serde(default)]
	expires_after_seconds: Option<i64>,
}

impl TokenCache {
	/// Requests an anonymous partner token; no caller credentials are involved.
	pub(crate) async fn refresh_partner_token(&self) -> Result<CachedToken> {
		let request = ::http::Request::builder()
			.method(Method::GET)
			.uri(self.descriptor.endpoints.client_token.as_str())
			.header(ACCEPT, "application/json")
			.body(Vec::new())?;
		let mut body = self.http_client.send(request).await?;
		let now = OffsetDateTime::now_utc();

		match body.get_mut("granted_token").map(Value::take) {
			Some(granted) if !granted.is_null() => {
				let granted: GrantedToken = response::parse(ORIGIN, granted)?;
				let lifetime = granted.expires_after_seconds.unwrap_or(DEFAULT_LIFETIME_SECS);
				let expires_at = response::expires_after(ORIGIN, now, lifetime)?;

				Ok(CachedToken::new(granted.token, expires_at))
			},
			_ => match response::error_text(&body, "error") {
				Some(message) => Err(Error::Provider { kind: TokenKind::Partner, message }),
				None => Err(Error::malformed(ORIGIN, "neither granted_token nor error is present")),
			},
		}
	}
}
