//! Generic expiring cache cell with single-flight refresh.
//!
//! A [`TokenSlot`] holds at most one [`CachedToken`]. Readers whose cached value is still
//! fresh only take a short read lock and never wait on a refresh. Stale readers queue on an
//! async guard so at most one refresh runs per slot; callers that queued behind an in-flight
//! refresh receive its outcome (value or failure) instead of starting another one.
//!
//! Each slot also carries an epoch. [`TokenSlot::invalidate`] bumps it, which both clears the
//! cached value and prevents a refresh that started under the previous credentials from
//! storing its result.

mod metrics;

pub use metrics::SlotMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	obs::{self, RefreshOutcome, TokenSpan},
};

/// Lead time before a partner token's declared expiry at which it is treated as expired.
pub const PARTNER_REFRESH_MARGIN: Duration = Duration::minutes(5);

/// The three independently cached token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// Client-credentials access token.
	Access,
	/// Anonymous partner token.
	Partner,
	/// Session-cookie derived account token.
	Account,
}
impl TokenKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::Access => "access",
			TokenKind::Partner => "partner",
			TokenKind::Account => "account",
		}
	}

	/// Expiry margin applied by this kind's slot.
	pub const fn refresh_margin(self) -> Duration {
		match self {
			TokenKind::Partner => PARTNER_REFRESH_MARGIN,
			TokenKind::Access | TokenKind::Account => Duration::ZERO,
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A token value together with the instant it stops being valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Token secret; callers must avoid logging it.
	pub value: TokenSecret,
	/// Server-declared expiry instant.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a token record.
	pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { value: TokenSecret::new(value), expires_at }
	}

	/// Returns `true` if the token outlives `now + margin`.
	pub fn is_fresh_at(&self, now: OffsetDateTime, margin: Duration) -> bool {
		self.expires_at > now + margin
	}
}

#[derive(Debug, Default)]
struct SlotState {
	cached: Option<CachedToken>,
	epoch: u64,
	completed: u64,
	last_outcome: Option<Result<TokenSecret>>,
}
impl SlotState {
	fn fresh_value(&self, now: OffsetDateTime, margin: Duration) -> Option<TokenSecret> {
		self.cached
			.as_ref()
			.filter(|token| token.is_fresh_at(now, margin))
			.map(|token| token.value.clone())
	}
}

/// Expiring cache cell whose refreshes are serialized by an async guard.
#[derive(Debug)]
pub struct TokenSlot {
	kind: TokenKind,
	margin: Duration,
	state: RwLock<SlotState>,
	refresh_guard: AsyncMutex<()>,
	metrics: SlotMetrics,
}
impl TokenSlot {
	/// Creates an empty slot using the margin associated with `kind`.
	pub fn new(kind: TokenKind) -> Self {
		Self::with_margin(kind, kind.refresh_margin())
	}

	/// Creates an empty slot with an explicit expiry margin (negative values clamp to zero).
	pub fn with_margin(kind: TokenKind, margin: Duration) -> Self {
		Self {
			kind,
			margin: if margin.is_negative() { Duration::ZERO } else { margin },
			state: Default::default(),
			refresh_guard: AsyncMutex::new(()),
			metrics: Default::default(),
		}
	}

	/// Token kind served by this slot.
	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	/// Expiry margin applied before the declared expiry.
	pub fn margin(&self) -> Duration {
		self.margin
	}

	/// Refresh counters for this slot.
	pub fn metrics(&self) -> &SlotMetrics {
		&self.metrics
	}

	/// Returns a copy of the cached token, fresh or not.
	pub fn snapshot(&self) -> Option<CachedToken> {
		self.state.read().cached.clone()
	}

	/// Returns `true` if the cached token is usable at `now` under this slot's margin.
	pub fn is_fresh_at(&self, now: OffsetDateTime) -> bool {
		self.state.read().fresh_value(now, self.margin).is_some()
	}

	/// Drops the cached token and detaches any in-flight refresh from the slot.
	pub fn invalidate(&self) {
		let mut state = self.state.write();

		state.cached = None;
		state.epoch += 1;
		state.last_outcome = None;
	}

	/// Returns the cached value if fresh, otherwise runs `refresh` under the single-flight
	/// guard and returns its value.
	///
	/// A failed refresh leaves the previously cached token untouched.
	pub async fn get_valid<F, Fut>(&self, refresh: F) -> Result<TokenSecret>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<CachedToken>>,
	{
		let (observed_epoch, observed_completed) = {
			let state = self.state.read();

			if let Some(value) = state.fresh_value(OffsetDateTime::now_utc(), self.margin) {
				return Ok(value);
			}

			(state.epoch, state.completed)
		};
		let _singleflight = self.refresh_guard.lock().await;
		let epoch = {
			let state = self.state.read();

			if state.epoch == observed_epoch && state.completed != observed_completed {
				if let Some(outcome) = state.last_outcome.as_ref() {
					return outcome.clone();
				}
			}
			if let Some(value) = state.fresh_value(OffsetDateTime::now_utc(), self.margin) {
				return Ok(value);
			}

			state.epoch
		};

		self.run_refresh(epoch, refresh).await
	}

	async fn run_refresh<F, Fut>(&self, epoch: u64, refresh: F) -> Result<TokenSecret>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<CachedToken>>,
	{
		obs::trace_refresh_started(self.kind);
		obs::record_refresh_outcome(self.kind, RefreshOutcome::Attempt);
		self.metrics.record_attempt();

		let outcome = TokenSpan::new(self.kind, "refresh").instrument(refresh()).await;

		obs::trace_refresh_finished(self.kind, outcome.as_ref());

		if outcome.is_ok() {
			obs::record_refresh_outcome(self.kind, RefreshOutcome::Success);
			self.metrics.record_success();
		} else {
			obs::record_refresh_outcome(self.kind, RefreshOutcome::Failure);
			self.metrics.record_failure();
		}

		let mut state = self.state.write();
		let current = state.epoch == epoch;
		let shared = outcome.map(|token| {
			let value = token.value.clone();

			if current {
				state.cached = Some(token);
			}

			value
		});

		if current {
			state.completed += 1;
			state.last_outcome = Some(shared.clone());
		}

		shared
	}
}
