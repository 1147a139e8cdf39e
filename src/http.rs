//! Transport primitives for token and partner-API exchanges.
//!
//! The cache needs exactly one capability from an HTTP stack: send a request and hand back
//! the parsed JSON body. [`TokenHttpClient`] captures that contract so downstream crates can
//! plug in their own transport (or a scripted fake in tests) while [`ReqwestHttpClient`]
//! covers the default case.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Request type handed to [`TokenHttpClient::send`].
pub type HttpRequest = ::http::Request<Vec<u8>>;

/// Boxed future returned by [`TokenHttpClient::send`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing a request and parsing its JSON body.
///
/// Implementations must return the decoded body for every response that carries JSON,
/// including non-success statuses, because providers report failures through `error` fields.
/// Timeouts are the transport's responsibility and must surface as [`TransportError`].
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the parsed JSON body.
	fn send(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail with [`TransportError::Network`] after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn send(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = reqwest::Request::try_from(request)?;
			let response = client.execute(request).await?;
			let status = response.status();
			let body = response.bytes().await?;

			decode_body(status.as_u16(), status.is_success(), &body)
		})
	}
}

/// Parses a response body, classifying non-JSON bodies by status.
#[cfg(any(test, feature = "reqwest"))]
pub(crate) fn decode_body(
	status: u16,
	success: bool,
	body: &[u8],
) -> Result<Value, TransportError> {
	match serde_json::from_slice::<Value>(body) {
		Ok(value) => Ok(value),
		Err(_) if !success => Err(TransportError::Status { status }),
		Err(e) => Err(TransportError::decode(status, e)),
	}
}
