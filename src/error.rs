//! Cache-level error types shared across slots, refresh protocols, and the partner API.

// self
use crate::{_prelude::*, slot::TokenKind};

/// Cache-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shared, cloneable boxed error.
///
/// Sources are reference counted so a single refresh failure can be handed to every caller
/// that waited on it.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Clone, Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, HTTP status, undecodable body).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The provider answered with an explicit `error` field.
	#[error("Provider rejected the {kind} token request: {message}.")]
	Provider {
		/// Slot whose refresh failed.
		kind: TokenKind,
		/// Provider-supplied error text.
		message: String,
	},
	/// The response was JSON but did not have the expected shape.
	#[error("Malformed {origin} response: {reason}.")]
	MalformedResponse {
		/// Endpoint label the response came from.
		origin: &'static str,
		/// Path-aware description of what was missing or mistyped.
		reason: String,
	},
	/// The requested partner query is not part of the registry.
	#[error("Unknown partner query `{name}`.")]
	UnknownQuery {
		/// Query name supplied by the caller.
		name: String,
	},
	/// A refresh was requested but its prerequisite credential is absent.
	#[error("Cannot refresh the {kind} token because its credentials are missing.")]
	CredentialsMissing {
		/// Slot whose credentials are absent.
		kind: TokenKind,
	},
	/// The partner API answered with an `errors` payload.
	#[error("Partner API returned errors: {errors}.")]
	PartnerApi {
		/// Serialized `errors` payload.
		errors: String,
	},
}
impl Error {
	pub(crate) fn malformed(origin: &'static str, reason: impl Display) -> Self {
		Self::MalformedResponse { origin, reason: reason.to_string() }
	}
}

/// Configuration failures raised while wiring the cache or building requests.
#[derive(Clone, Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: SharedError,
	},
	/// HTTP request construction failed.
	#[error("HTTP request could not be constructed.")]
	HttpRequest {
		/// Underlying `http` builder failure.
		#[source]
		source: SharedError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Arc::new(src) }
	}
}
impl From<::http::Error> for ConfigError {
	fn from(e: ::http::Error) -> Self {
		Self::HttpRequest { source: Arc::new(e) }
	}
}
impl From<::http::Error> for Error {
	fn from(e: ::http::Error) -> Self {
		ConfigError::from(e).into()
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, status, decoding).
#[derive(Clone, Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure or timeout.
	#[error("Network error occurred while calling the endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: SharedError,
	},
	/// The endpoint answered with a non-success status and no JSON body.
	#[error("Endpoint answered with HTTP {status} and no JSON body.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// The endpoint answered with a body that is not valid JSON.
	#[error("Endpoint answered with a body that is not valid JSON.")]
	Decode {
		/// HTTP status code.
		status: u16,
		/// Underlying JSON failure.
		#[source]
		source: SharedError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Arc::new(src) }
	}

	/// Wraps a JSON decoding failure for a response with the given status.
	pub fn decode(status: u16, src: serde_json::Error) -> Self {
		Self::Decode { status, source: Arc::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
