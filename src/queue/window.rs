//! Sliding-window admission logic shared by every queued call.

// std
use std::collections::VecDeque;
// self
use crate::_prelude::*;

/// Persisted call history: unix-millisecond timestamps of admitted calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallHistory {
	/// Admission timestamps in ascending order.
	pub calls: Vec<i64>,
}

/// Admits at most `limit` calls in any window of `window` length.
///
/// Timestamps are unix milliseconds so the history can be shared between processes.
#[derive(Clone, Debug)]
pub struct CallWindow {
	limit: usize,
	window_ms: i64,
	calls: VecDeque<i64>,
}
impl CallWindow {
	/// Builds a window from a previously persisted history.
	pub fn new(limit: u32, window: Duration, history: CallHistory) -> Self {
		let mut calls = history.calls;

		calls.sort_unstable();

		Self {
			limit: usize::try_from(limit).unwrap_or(usize::MAX).max(1),
			window_ms: i64::try_from(window.whole_milliseconds()).unwrap_or(i64::MAX).max(1),
			calls: calls.into(),
		}
	}

	/// Number of calls still inside the window at `now`.
	pub fn in_flight(&mut self, now: i64) -> usize {
		self.prune(now);

		self.calls.len()
	}

	/// How long the next call must wait at `now`, or `None` if it may proceed.
	pub fn wait_time(&mut self, now: i64) -> Option<Duration> {
		self.prune(now);

		if self.calls.len() < self.limit {
			return None;
		}

		let gate = self.calls[self.calls.len() - self.limit];
		let wait = gate.saturating_add(self.window_ms).saturating_sub(now);

		(wait > 0).then(|| Duration::milliseconds(wait))
	}

	/// Records a call admitted at `now`.
	///
	/// Callers must have observed `wait_time(now) == None`.
	pub fn admit(&mut self, now: i64) {
		self.prune(now);
		self.calls.push_back(now);

		while self.calls.len() > self.limit {
			self.calls.pop_front();
		}
	}

	/// Converts the window back into its persisted form.
	pub fn into_history(self) -> CallHistory {
		CallHistory { calls: self.calls.into() }
	}

	fn prune(&mut self, now: i64) {
		let horizon = now.saturating_sub(self.window_ms);

		while self.calls.front().is_some_and(|&call| call <= horizon) {
			self.calls.pop_front();
		}
		// Entries from a clock that ran ahead would block forever.
		while self.calls.back().is_some_and(|&call| call > now.saturating_add(self.window_ms)) {
			self.calls.pop_back();
		}
	}
}

/// Current wall-clock time in unix milliseconds.
pub fn now_millis() -> i64 {
	i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}
