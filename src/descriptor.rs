//! Service descriptor: the endpoints and client profile the cache talks to.
//!
//! Descriptors are plain serde data so application wiring can load them from whatever
//! configuration source it uses. The defaults target Spotify's production hosts; tests and
//! proxies override individual endpoints through [`ServiceDescriptorBuilder`].

/// Builder API for assembling service descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Default client-credentials token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";
/// Default anonymous client-token endpoint used for partner tokens.
pub const DEFAULT_CLIENT_TOKEN_ENDPOINT: &str = "https://clienttoken.spotify.com/v1/clienttoken";
/// Default web-player access-token endpoint used for account tokens.
pub const DEFAULT_WEB_ACCESS_TOKEN_ENDPOINT: &str = "https://open.spotify.com/get_access_token";
/// Default partner API (persisted GraphQL queries) endpoint.
pub const DEFAULT_PARTNER_API_ENDPOINT: &str =
	"https://api-partner.spotify.com/pathfinder/v2/query";
/// Default `App-Platform` header value.
pub const DEFAULT_APP_PLATFORM: &str = "WebPlayer";
/// Default `Spotify-App-Version` header value.
pub const DEFAULT_APP_VERSION: &str = "1.2.81.104.g225ec0e6";

/// Endpoint set used by the three refresh protocols and the partner API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
	/// Client-credentials token endpoint.
	pub token: Url,
	/// Anonymous client-token endpoint.
	pub client_token: Url,
	/// Web-player access-token endpoint.
	pub web_access_token: Url,
	/// Partner API query endpoint.
	pub partner_api: Url,
}

/// Platform identity sent with web-player and partner-API requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
	/// `App-Platform` header value.
	pub app_platform: String,
	/// `Spotify-App-Version` header value.
	pub app_version: String,
}
impl Default for ClientProfile {
	fn default() -> Self {
		Self { app_platform: DEFAULT_APP_PLATFORM.into(), app_version: DEFAULT_APP_VERSION.into() }
	}
}

/// Immutable service descriptor consumed by the cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
	/// Endpoint definitions.
	pub endpoints: ServiceEndpoints,
	/// Platform identity headers.
	#[serde(default)]
	pub client: ClientProfile,
}
impl ServiceDescriptor {
	/// Creates a builder seeded with the production defaults.
	pub fn builder() -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::default()
	}

	/// Account-token URL with the fixed `reason` and `productType` query parameters.
	pub fn web_access_token_url(&self) -> Url {
		let mut url = self.endpoints.web_access_token.clone();

		url.query_pairs_mut()
			.append_pair("reason", "transport")
			.append_pair("productType", "web_player");

		url
	}
}
