//! Owner-supplied credentials. Empty values count as absent, which leaves the dependent slot
//! unrefreshable until real values arrive.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Client-credentials pair used by the access-token grant.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	/// Application client identifier.
	pub client_id: String,
	/// Application client secret.
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Returns the pair when both halves are non-empty.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Option<Self> {
		let client_id = client_id.into();
		let client_secret = TokenSecret::new(client_secret);

		if client_id.is_empty() || client_secret.is_empty() {
			None
		} else {
			Some(Self { client_id, client_secret })
		}
	}

	/// Formats the `Authorization` header value for HTTP Basic authentication.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

/// Web-player session cookie (`sp_dc`) used by the account-token exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie(TokenSecret);
impl SessionCookie {
	/// Returns the cookie when `value` is non-empty.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let secret = TokenSecret::new(value);

		if secret.is_empty() { None } else { Some(Self(secret)) }
	}

	/// Formats the `Cookie` header value.
	pub fn header_value(&self) -> String {
		format!("sp_dc={}", self.0.expose())
	}
}
