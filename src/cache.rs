//! The token cache: three independent slots plus the credentials that feed them.
//!
//! [`TokenCache`] owns one [`TokenSlot`] per [`TokenKind`]. Each slot is refreshed by its own
//! protocol (see the submodules) and shares the generic single-flight logic from
//! [`crate::slot`]. Replacing credentials invalidates the dependent slot while the
//! credential write lock is held, so no caller that starts afterwards can observe a token
//! minted with the old credentials.

mod access;
mod account;
mod partner;
mod response;

// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, SessionCookie, TokenSecret},
	descriptor::ServiceDescriptor,
	http::TokenHttpClient,
	obs,
	slot::{TokenKind, TokenSlot},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Lazily refreshed cache for the access, partner, and account tokens of one credential set.
pub struct TokenCache {
	pub(crate) http_client: Arc<dyn TokenHttpClient>,
	pub(crate) descriptor: ServiceDescriptor,
	client_credentials: RwLock<Option<ClientCredentials>>,
	session_cookie: RwLock<Option<SessionCookie>>,
	access: TokenSlot,
	partner: TokenSlot,
	account: TokenSlot,
}
impl TokenCache {
	/// Creates a cache without credentials that sends requests through `http_client`.
	///
	/// Only the partner token is obtainable until credentials are supplied via
	/// [`TokenCache::with_client_credentials`] / [`TokenCache::with_session_cookie`] or their
	/// runtime setters.
	pub fn with_http_client(
		descriptor: ServiceDescriptor,
		http_client: Arc<dyn TokenHttpClient>,
	) -> Self {
		obs::trace_credentials_missing(TokenKind::Access);
		obs::trace_credentials_missing(TokenKind::Account);

		Self {
			http_client,
			descriptor,
			client_credentials: RwLock::new(None),
			session_cookie: RwLock::new(None),
			access: TokenSlot::new(TokenKind::Access),
			partner: TokenSlot::new(TokenKind::Partner),
			account: TokenSlot::new(TokenKind::Account),
		}
	}

	/// Sets the client credentials used by the access-token grant.
	pub fn with_client_credentials(
		self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		self.set_client_credentials(client_id, client_secret);

		self
	}

	/// Sets the `sp_dc` session cookie used by the account-token exchange.
	pub fn with_session_cookie(self, value: impl Into<String>) -> Self {
		self.set_session_cookie(value);

		self
	}

	/// Service descriptor the cache talks to.
	pub fn descriptor(&self) -> &ServiceDescriptor {
		&self.descriptor
	}

	/// Returns the slot backing `kind`, mainly for inspection and metrics.
	pub fn slot(&self, kind: TokenKind) -> &TokenSlot {
		match kind {
			TokenKind::Access => &self.access,
			TokenKind::Partner => &self.partner,
			TokenKind::Account => &self.account,
		}
	}

	/// Returns `true` when both halves of the client credentials are present.
	pub fn has_valid_client_credentials(&self) -> bool {
		self.client_credentials.read().is_some()
	}

	/// Returns `true` when a session cookie is present.
	pub fn has_valid_session_cookie(&self) -> bool {
		self.session_cookie.read().is_some()
	}

	/// Replaces the client credentials and drops any access token minted with the old ones.
	///
	/// Empty values clear the credentials, after which [`TokenCache::get_access_token`] falls
	/// back to the partner token.
	pub fn set_client_credentials(
		&self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) {
		let mut credentials = self.client_credentials.write();

		*credentials = ClientCredentials::new(client_id, client_secret);

		self.access.invalidate();

		if credentials.is_none() {
			obs::trace_credentials_missing(TokenKind::Access);
		}
	}

	/// Replaces the session cookie and drops any account token minted with the old one.
	pub fn set_session_cookie(&self, value: impl Into<String>) {
		let mut cookie = self.session_cookie.write();

		*cookie = SessionCookie::new(value);

		self.account.invalidate();

		if cookie.is_none() {
			obs::trace_credentials_missing(TokenKind::Account);
		}
	}

	/// Returns a valid token for `kind`, refreshing it if needed.
	pub async fn get_valid(&self, kind: TokenKind) -> Result<TokenSecret> {
		match kind {
			TokenKind::Access => self.get_client_access_token().await,
			TokenKind::Partner => self.get_partner_token().await,
			TokenKind::Account => self.get_account_access_token().await,
		}
	}

	/// Returns the token callers should use for Web API requests.
	///
	/// The partner token is returned when `prefer_partner` is set or no client credentials
	/// were supplied; the client-credentials access token otherwise.
	pub async fn get_access_token(&self, prefer_partner: bool) -> Result<TokenSecret> {
		if prefer_partner {
			return self.get_partner_token().await;
		}
		if !self.has_valid_client_credentials() {
			obs::trace_credentials_missing(TokenKind::Access);

			return self.get_partner_token().await;
		}

		self.get_client_access_token().await
	}

	/// Returns a valid partner token, refreshing it five minutes before it expires.
	pub async fn get_partner_token(&self) -> Result<TokenSecret> {
		self.partner.get_valid(|| self.refresh_partner_token()).await
	}

	/// Returns a valid account token derived from the session cookie.
	pub async fn get_account_access_token(&self) -> Result<TokenSecret> {
		if !self.has_valid_session_cookie() {
			obs::trace_credentials_missing(TokenKind::Account);

			return Err(Error::CredentialsMissing { kind: TokenKind::Account });
		}

		self.account.get_valid(|| self.refresh_account_token()).await
	}

	async fn get_client_access_token(&self) -> Result<TokenSecret> {
		if !self.has_valid_client_credentials() {
			return Err(Error::CredentialsMissing { kind: TokenKind::Access });
		}

		self.access.get_valid(|| self.refresh_access_token()).await
	}
}
#[cfg(feature = "reqwest")]
impl TokenCache {
	/// Creates a cache backed by a default reqwest transport.
	pub fn new(descriptor: ServiceDescriptor) -> Self {
		Self::with_http_client(descriptor, Arc::new(ReqwestHttpClient::default()))
	}
}
impl Debug for TokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache")
			.field("descriptor", &self.descriptor)
			.field("client_credentials_set", &self.has_valid_client_credentials())
			.field("session_cookie_set", &self.has_valid_session_cookie())
			.field("access", &self.access)
			.field("partner", &self.partner)
			.field("account", &self.account)
			.finish()
	}
}
