// self
use crate::{_prelude::*, http::Method};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping a single API call.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the method and request path.
	pub fn new(method: Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("cloudscrape.request", method = method.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Notes that a queued call is waiting for the call window to reopen.
pub fn trace_queue_wait(lock_name: &str, wait: Duration) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(lock_name, wait_ms = wait.whole_milliseconds() as u64, "queue window full");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (lock_name, wait);
	}
}

/// Notes that the queue lock was acquired after `attempts` polls.
pub fn trace_queue_acquired(lock_name: &str, attempts: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(lock_name, attempts, "queue lock acquired");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (lock_name, attempts);
	}
}
