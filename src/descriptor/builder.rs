// self
use crate::{
	_prelude::*,
	descriptor::{
		ClientProfile, DEFAULT_APP_PLATFORM, DEFAULT_APP_VERSION, DEFAULT_CLIENT_TOKEN_ENDPOINT,
		DEFAULT_PARTNER_API_ENDPOINT, DEFAULT_TOKEN_ENDPOINT, DEFAULT_WEB_ACCESS_TOKEN_ENDPOINT,
		ServiceDescriptor, ServiceEndpoints,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum DescriptorError {
	/// Endpoint is not a valid absolute URL.
	#[error("The {endpoint} endpoint is not a valid URL ({reason}): {url}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Raw value that failed to parse.
		url: String,
		/// Parser message.
		reason: String,
	},
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Client profile headers must not be empty.
	#[error("The client profile field `{field}` must not be empty.")]
	EmptyClientProfile {
		/// Offending field name.
		field: &'static str,
	},
}

/// Builder for [`ServiceDescriptor`] values, seeded with the production defaults.
#[derive(Debug)]
pub struct ServiceDescriptorBuilder {
	/// Client-credentials token endpoint.
	pub token_endpoint: String,
	/// Anonymous client-token endpoint.
	pub client_token_endpoint: String,
	/// Web-player access-token endpoint.
	pub web_access_token_endpoint: String,
	/// Partner API query endpoint.
	pub partner_api_endpoint: String,
	/// `App-Platform` header value.
	pub app_platform: String,
	/// `Spotify-App-Version` header value.
	pub app_version: String,
}
impl Default for ServiceDescriptorBuilder {
	fn default() -> Self {
		Self {
			token_endpoint: DEFAULT_TOKEN_ENDPOINT.into(),
			client_token_endpoint: DEFAULT_CLIENT_TOKEN_ENDPOINT.into(),
			web_access_token_endpoint: DEFAULT_WEB_ACCESS_TOKEN_ENDPOINT.into(),
			partner_api_endpoint: DEFAULT_PARTNER_API_ENDPOINT.into(),
			app_platform: DEFAULT_APP_PLATFORM.into(),
			app_version: DEFAULT_APP_VERSION.into(),
		}
	}
}
impl ServiceDescriptorBuilder {
	/// Sets the client-credentials token endpoint.
	pub fn token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.token_endpoint = url.into();

		self
	}

	/// Sets the anonymous client-token endpoint.
	pub fn client_token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.client_token_endpoint = url.into();

		self
	}

	/// Sets the web-player access-token endpoint.
	pub fn web_access_token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.web_access_token_endpoint = url.into();

		self
	}

	/// Sets the partner API endpoint.
	pub fn partner_api_endpoint(mut self, url: impl Into<String>) -> Self {
		self.partner_api_endpoint = url.into();

		self
	}

	/// Overrides the `App-Platform` header value.
	pub fn app_platform(mut self, platform: impl Into<String>) -> Self {
		self.app_platform = platform.into();

		self
	}

	/// Overrides the `Spotify-App-Version` header value.
	pub fn app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = version.into();

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, DescriptorError> {
		let endpoints = ServiceEndpoints {
			token: parse_endpoint("token", &self.token_endpoint)?,
			client_token: parse_endpoint("client_token", &self.client_token_endpoint)?,
			web_access_token: parse_endpoint("web_access_token", &self.web_access_token_endpoint)?,
			partner_api: parse_endpoint("partner_api", &self.partner_api_endpoint)?,
		};
		let client =
			ClientProfile { app_platform: self.app_platform, app_version: self.app_version };
		let descriptor = ServiceDescriptor { endpoints, client };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	pub fn validate(&self) -> Result<(), DescriptorError> {
		validate_scheme("token", &self.endpoints.token)?;
		validate_scheme("client_token", &self.endpoints.client_token)?;
		validate_scheme("web_access_token", &self.endpoints.web_access_token)?;
		validate_scheme("partner_api", &self.endpoints.partner_api)?;

		if self.client.app_platform.trim().is_empty() {
			return Err(DescriptorError::EmptyClientProfile { field: "app_platform" });
		}
		if self.client.app_version.trim().is_empty() {
			return Err(DescriptorError::EmptyClientProfile { field: "app_version" });
		}

		Ok(())
	}
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, DescriptorError> {
	Url::parse(raw).map_err(|e| DescriptorError::InvalidUrl {
		endpoint: name,
		url: raw.to_owned(),
		reason: e.to_string(),
	})
}

fn validate_scheme(name: &'static str, url: &Url) -> Result<(), DescriptorError> {
	match url.scheme() {
		"https" | "http" => Ok(()),
		_ => Err(DescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_rejects_unparsable_and_unsupported_endpoints() {
		let err = ServiceDescriptor::builder()
			.token_endpoint("not a url")
			.build()
			.expect_err("Relative garbage should be rejected.");

		assert!(matches!(err, DescriptorError::InvalidUrl { endpoint: "token", .. }));

		let err = ServiceDescriptor::builder()
			.partner_api_endpoint("ftp://example.com/query")
			.build()
			.expect_err("Non-HTTP schemes should be rejected.");

		assert!(matches!(err, DescriptorError::UnsupportedScheme { endpoint: "partner_api", .. }));
	}

	#[test]
	fn builder_rejects_empty_profile() {
		let err = ServiceDescriptor::builder()
			.app_version(" ")
			.build()
			.expect_err("Blank app version should be rejected.");

		assert_eq!(err, DescriptorError::EmptyClientProfile { field: "app_version" });
	}
}
