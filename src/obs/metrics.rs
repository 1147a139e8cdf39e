// self
use crate::{obs::RefreshOutcome, slot::TokenKind};

/// Records a refresh outcome via the global metrics recorder (when enabled).
pub fn record_refresh_outcome(kind: TokenKind, outcome: RefreshOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"spotify_token_cache_refresh_total",
			"token" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
