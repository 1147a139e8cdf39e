//! Shared fixtures for integration tests: descriptors pointing at mock hosts, a reqwest-backed
//! cache for `httpmock` servers, and a scripted in-process transport.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use spotify_token_cache::{
	cache::TokenCache,
	descriptor::ServiceDescriptor,
	error::TransportError,
	http::{HttpFuture, HttpRequest, ReqwestHttpClient, TokenHttpClient},
	http_types::{HeaderMap, Method},
	reqwest::Client as ReqwestClient,
	serde_json::Value,
};

pub const TOKEN_PATH: &str = "/api/token";
pub const CLIENT_TOKEN_PATH: &str = "/v1/clienttoken";
pub const WEB_ACCESS_TOKEN_PATH: &str = "/get_access_token";
pub const PARTNER_API_PATH: &str = "/pathfinder/v2/query";

/// Builds a descriptor whose endpoints all live under `base`.
pub fn test_descriptor(base: &str) -> ServiceDescriptor {
	let base = base.trim_end_matches('/');

	ServiceDescriptor::builder()
		.token_endpoint(format!("{base}{TOKEN_PATH}"))
		.client_token_endpoint(format!("{base}{CLIENT_TOKEN_PATH}"))
		.web_access_token_endpoint(format!("{base}{WEB_ACCESS_TOKEN_PATH}"))
		.partner_api_endpoint(format!("{base}{PARTNER_API_PATH}"))
		.build()
		.expect("Failed to build test service descriptor.")
}

/// Builds a cache that talks to `base` through a plain reqwest client.
pub fn reqwest_cache(base: &str) -> TokenCache {
	let client = ReqwestClient::builder()
		.no_proxy()
		.build()
		.expect("Failed to build Reqwest client for tests.");

	TokenCache::with_http_client(
		test_descriptor(base),
		Arc::new(ReqwestHttpClient::with_client(client)),
	)
}

/// Builds a cache whose reqwest client gives up on requests after `timeout`.
pub fn reqwest_cache_with_timeout(base: &str, timeout: std::time::Duration) -> TokenCache {
	let client = ReqwestClient::builder()
		.no_proxy()
		.timeout(timeout)
		.build()
		.expect("Failed to build Reqwest client for tests.");

	TokenCache::with_http_client(
		test_descriptor(base),
		Arc::new(ReqwestHttpClient::with_client(client)),
	)
}

/// Builds a cache backed by `client`.
pub fn scripted_cache(client: Arc<ScriptedHttpClient>) -> TokenCache {
	TokenCache::with_http_client(test_descriptor("https://spotify.test"), client)
}

type Responder = Box<dyn Fn(&HttpRequest) -> Result<Value, TransportError> + Send + Sync>;

/// Request captured by [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub path: String,
	pub headers: HeaderMap,
	pub body: Vec<u8>,
}

/// In-process transport that answers through a closure after an optional delay.
pub struct ScriptedHttpClient {
	responder: Responder,
	delay: std::time::Duration,
	requests: Mutex<Vec<RecordedRequest>>,
}
impl ScriptedHttpClient {
	pub fn new(
		responder: impl 'static + Fn(&HttpRequest) -> Result<Value, TransportError> + Send + Sync,
	) -> Self {
		Self {
			responder: Box::new(responder),
			delay: std::time::Duration::ZERO,
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
		self.delay = delay;

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	pub fn calls_to(&self, path: &str) -> usize {
		self.requests.lock().iter().filter(|request| request.path == path).count()
	}
}
impl TokenHttpClient for ScriptedHttpClient {
	fn send(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			self.requests.lock().push(RecordedRequest {
				method: request.method().clone(),
				path: request.uri().path().to_owned(),
				headers: request.headers().clone(),
				body: request.body().clone(),
			});

			if !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}

			(self.responder)(&request)
		})
	}
}
