//! Cross-process request queue with a per-window call budget.
//!
//! Every queued call takes the named file lock, consults the shared call history, waits until
//! fewer than `limit_count` calls remain inside the last `limit_window`, records itself, and
//! then runs while still holding the lock. Clients in different processes that share a lock
//! name and directory therefore share one budget and never overlap.

mod lock;
pub mod window;

pub use window::{CallHistory, CallWindow};

// self
// crates.io
use tokio::time::Instant;
// self
use crate::{
	_prelude::*,
	config::QueueConfig,
	error::{ConfigError, QueueError},
	obs,
	queue::lock::QueueLock,
};

/// Serializes and throttles calls through a named cross-process lock.
#[derive(Debug)]
pub struct RequestQueue {
	config: QueueConfig,
	local: AsyncMutex<()>,
}
impl RequestQueue {
	/// Creates a queue after validating its settings.
	pub fn new(config: QueueConfig) -> Result<Self, ConfigError> {
		config.validate()?;

		Ok(Self { config, local: AsyncMutex::new(()) })
	}

	/// Queue settings.
	pub fn config(&self) -> &QueueConfig {
		&self.config
	}

	/// Runs `call` inside the queue and propagates its result.
	///
	/// Fails with [`QueueError::LockTimeout`] when the lock is not acquired within the
	/// configured timeout; `call` is not started in that case. The timeout covers both the wait
	/// behind other tasks of this process and the wait for the file lock.
	pub async fn enter<T, F, Fut>(&self, call: F) -> Result<T>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let deadline = Instant::now() + self.config.lock_timeout.unsigned_abs();
		// Tasks of this process line up here instead of spinning on the file lock.
		let _local = tokio::time::timeout_at(deadline, self.local.lock())
			.await
			.map_err(|_| self.lock_timeout())?;
		let lock = QueueLock::acquire(&self.config, deadline).await?;
		let mut window =
			CallWindow::new(self.config.limit_count, self.config.limit_window, lock.read_history());

		while let Some(wait) = window.wait_time(window::now_millis()) {
			obs::trace_queue_wait(&self.config.lock_name, wait);
			tokio::time::sleep(wait.unsigned_abs()).await;
		}

		window.admit(window::now_millis());
		lock.write_history(&window.into_history())?;

		let result = call().await;

		drop(lock);

		result
	}

	fn lock_timeout(&self) -> QueueError {
		QueueError::LockTimeout {
			name: self.config.lock_name.clone(),
			timeout: self.config.lock_timeout,
		}
	}
}
