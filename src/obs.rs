//! Optional observability helpers for slot refreshes and partner-API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `spotify_token_cache.token` with the
//!   `token` (slot) and `stage` (call site) fields, plus debug/warn events around refreshes.
//! - Enable `metrics` to increment the `spotify_token_cache_refresh_total` counter for every
//!   attempt/success/failure, labeled by `token` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

pub(crate) use tracing::{
	trace_credentials_missing, trace_refresh_finished, trace_refresh_started,
};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
	/// A refresh protocol was started.
	Attempt,
	/// The refresh stored a new token.
	Success,
	/// The refresh failed and the slot kept its prior state.
	Failure,
}
impl RefreshOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RefreshOutcome::Attempt => "attempt",
			RefreshOutcome::Success => "success",
			RefreshOutcome::Failure => "failure",
		}
	}
}
impl Display for RefreshOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
