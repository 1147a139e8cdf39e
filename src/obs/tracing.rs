// self
use crate::{
	_prelude::*,
	slot::{CachedToken, TokenKind},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFuture<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFuture<F> = F;

/// A span builder used around refreshes and partner-API calls.
#[derive(Clone, Debug)]
pub struct TokenSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl TokenSpan {
	/// Creates a new span tagged with the provided slot + stage.
	pub fn new(kind: TokenKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("spotify_token_cache.token", token = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFuture<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs that a slot is about to run its refresh protocol.
pub(crate) fn trace_refresh_started(kind: TokenKind) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(token = kind.as_str(), "Token is missing or expired, refreshing.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = kind;
	}
}

/// Logs the result of a refresh without exposing the token value.
pub(crate) fn trace_refresh_finished(kind: TokenKind, outcome: Result<&CachedToken, &Error>) {
	#[cfg(feature = "tracing")]
	{
		match outcome {
			Ok(token) => tracing::debug!(
				token = kind.as_str(),
				expires_at = %token.expires_at,
				"Token refreshed."
			),
			Err(e) => tracing::warn!(token = kind.as_str(), error = %e, "Token refresh failed."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, outcome);
	}
}

/// Logs that a slot cannot refresh until its credentials are supplied.
pub(crate) fn trace_credentials_missing(kind: TokenKind) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(token = kind.as_str(), "Credentials are missing; slot is unrefreshable.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = kind;
	}
}
