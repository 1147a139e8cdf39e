#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{OffsetDateTime, macros::datetime};
// self
use common::WEB_ACCESS_TOKEN_PATH;
use spotify_token_cache::{error::Error, slot::TokenKind};

// 2100-01-01T00:00:00Z
const EXPIRES_AT_MS: i64 = 4_102_444_800_000;

#[tokio::test]
async fn cookie_exchange_uses_the_absolute_expiry() {
	let server = MockServer::start_async().await;
	let cache = common::reqwest_cache(&server.base_url()).with_session_cookie("cookie-v1");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(WEB_ACCESS_TOKEN_PATH)
				.query_param("reason", "transport")
				.query_param("productType", "web_player")
				.header("app-platform", "WebPlayer")
				.header("cookie", "sp_dc=cookie-v1");
			then.status(200).json_body(json!({
				"clientId": "web-player",
				"accessToken": "A1",
				"accessTokenExpirationTimestampMs": EXPIRES_AT_MS,
				"isAnonymous": false
			}));
		})
		.await;

	assert_eq!(
		cache.get_account_access_token().await.expect("Exchange should succeed.").expose(),
		"A1"
	);
	assert_eq!(
		cache.get_valid(TokenKind::Account).await.expect("Cached read should succeed.").expose(),
		"A1"
	);

	mock.assert_calls_async(1).await;

	let cached = cache.slot(TokenKind::Account).snapshot().expect("Slot should hold the token.");

	assert_eq!(cached.expires_at, datetime!(2100-01-01 0:00 UTC));
}

#[tokio::test]
async fn missing_cookie_fails_without_network_traffic() {
	let server = MockServer::start_async().await;
	let cache = common::reqwest_cache(&server.base_url()).with_session_cookie("");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(WEB_ACCESS_TOKEN_PATH);
			then.status(200)
				.json_body(json!({ "accessToken": "A1", "accessTokenExpirationTimestampMs": 0 }));
		})
		.await;

	assert!(!cache.has_valid_session_cookie());

	let err = cache.get_account_access_token().await.expect_err("A cookie is required.");

	assert!(matches!(err, Error::CredentialsMissing { kind: TokenKind::Account }));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn provider_error_is_reported_for_the_account_kind() {
	let server = MockServer::start_async().await;
	let cache = common::reqwest_cache(&server.base_url()).with_session_cookie("expired-cookie");

	server
		.mock_async(|when, then| {
			when.method(GET).path(WEB_ACCESS_TOKEN_PATH);
			then.status(401).json_body(json!({
				"error": { "code": 401, "message": "Invalid session cookie" }
			}));
		})
		.await;

	let err = cache.get_account_access_token().await.expect_err("Rejected cookies should fail.");

	match err {
		Error::Provider { kind, message } => {
			assert_eq!(kind, TokenKind::Account);
			assert_eq!(message, "Invalid session cookie");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(cache.slot(TokenKind::Account).snapshot().is_none());
}

#[tokio::test]
async fn replacing_the_cookie_forces_a_new_exchange() {
	let server = MockServer::start_async().await;
	let cache = common::reqwest_cache(&server.base_url()).with_session_cookie("cookie-v1");
	let first = server
		.mock_async(|when, then| {
			when.method(GET).path(WEB_ACCESS_TOKEN_PATH).header("cookie", "sp_dc=cookie-v1");
			then.status(200).json_body(json!({
				"accessToken": "A1",
				"accessTokenExpirationTimestampMs": EXPIRES_AT_MS
			}));
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(GET).path(WEB_ACCESS_TOKEN_PATH).header("cookie", "sp_dc=cookie-v2");
			then.status(200).json_body(json!({
				"accessToken": "A2",
				"accessTokenExpirationTimestampMs": EXPIRES_AT_MS
			}));
		})
		.await;

	assert_eq!(cache.get_account_access_token().await.expect("First exchange.").expose(), "A1");

	cache.set_session_cookie("cookie-v2");

	assert!(cache.slot(TokenKind::Account).snapshot().is_none());
	assert_eq!(cache.get_account_access_token().await.expect("Second exchange.").expose(), "A2");

	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;
}

#[tokio::test]
async fn null_expiry_timestamp_falls_back_to_the_epoch() {
	let server = MockServer::start_async().await;
	let cache = common::reqwest_cache(&server.base_url()).with_session_cookie("cookie-v1");

	server
		.mock_async(|when, then| {
			when.method(GET).path(WEB_ACCESS_TOKEN_PATH);
			then.status(200).json_body(json!({
				"accessToken": "A1",
				"accessTokenExpirationTimestampMs": null
			}));
		})
		.await;

	let token = cache.get_account_access_token().await.expect("Null expiries are accepted.");

	assert_eq!(token.expose(), "A1");

	let cached = cache.slot(TokenKind::Account).snapshot().expect("Slot should hold the token.");

	assert_eq!(cached.expires_at, OffsetDateTime::UNIX_EPOCH);
}
