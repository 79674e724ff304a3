//! Named cross-process lock backed by an advisory file lock.

// std
use std::{
	fs::{self, File, OpenOptions, TryLockError},
	io::Write,
	path::{Path, PathBuf},
	time::Duration as StdDuration,
};
// crates.io
use tokio::time::Instant;
// self
use crate::{
	_prelude::*,
	config::QueueConfig,
	error::QueueError,
	obs,
	queue::window::CallHistory,
};

/// Exclusive hold on the queue lock file; released on drop.
#[derive(Debug)]
pub(crate) struct QueueLock {
	file: File,
	history_path: PathBuf,
}
impl QueueLock {
	const POLL_INTERVAL: StdDuration = StdDuration::from_millis(10);

	/// Polls the lock file until it is acquired or `deadline` passes.
	pub(crate) async fn acquire(
		config: &QueueConfig,
		deadline: Instant,
	) -> Result<Self, QueueError> {
		let path = config.lock_path();

		ensure_parent_exists(&path)?;

		let file = OpenOptions::new()
			.create(true)
			.truncate(false)
			.write(true)
			.open(&path)
			.map_err(|source| io_error(&path, source))?;
		let mut attempts = 0_u32;

		loop {
			attempts = attempts.saturating_add(1);

			match file.try_lock() {
				Ok(()) => break,
				Err(TryLockError::WouldBlock) => {},
				Err(TryLockError::Error(source)) => return Err(io_error(&path, source)),
			}

			let remaining = deadline.saturating_duration_since(Instant::now());

			if remaining.is_zero() {
				return Err(QueueError::LockTimeout {
					name: config.lock_name.clone(),
					timeout: config.lock_timeout,
				});
			}

			tokio::time::sleep(remaining.min(Self::POLL_INTERVAL)).await;
		}

		obs::trace_queue_acquired(&config.lock_name, attempts);

		Ok(Self { file, history_path: config.history_path() })
	}

	/// Reads the shared call history. Missing or unreadable history counts as empty.
	pub(crate) fn read_history(&self) -> CallHistory {
		fs::read(&self.history_path)
			.ok()
			.and_then(|bytes| serde_json::from_slice(&bytes).ok())
			.unwrap_or_default()
	}

	/// Replaces the shared call history.
	///
	/// The snapshot is written to a sibling temp file and renamed over the history file, so a
	/// crash mid-write never leaves a truncated history behind.
	pub(crate) fn write_history(&self, history: &CallHistory) -> Result<(), QueueError> {
		let serialized = serde_json::to_vec(history).map_err(QueueError::History)?;
		let tmp_path = self.history_path.with_extension("json.tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| io_error(&tmp_path, e))?;

			file.write_all(&serialized).map_err(|e| io_error(&tmp_path, e))?;
			file.sync_all().map_err(|e| io_error(&tmp_path, e))?;
		}

		fs::rename(&tmp_path, &self.history_path).map_err(|e| io_error(&self.history_path, e))
	}
}
impl Drop for QueueLock {
	fn drop(&mut self) {
		// Closing the descriptor releases the lock as well.
		let _ = self.file.unlock();
	}
}

fn ensure_parent_exists(path: &Path) -> Result<(), QueueError> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
	}

	Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> QueueError {
	QueueError::Io { path: path.display().to_string(), source }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::queue::tests::temp_queue_config;

	fn deadline(config: &QueueConfig) -> Instant {
		Instant::now() + config.lock_timeout.unsigned_abs()
	}

	#[tokio::test]
	async fn second_holder_times_out() {
		let config = temp_queue_config("lock_timeout").with_lock_timeout(Duration::milliseconds(80));
		let _held = QueueLock::acquire(&config, deadline(&config)).await.expect("First acquisition should succeed.");
		let started = std::time::Instant::now();
		let err = QueueLock::acquire(&config, deadline(&config))
			.await
			.expect_err("Second acquisition must time out while the lock is held.");

		assert!(matches!(err, QueueError::LockTimeout { ref name, .. } if name == &config.lock_name));
		assert!(started.elapsed() >= std::time::Duration::from_millis(80));
	}

	#[tokio::test]
	async fn lock_is_released_on_drop() {
		let config = temp_queue_config("lock_release").with_lock_timeout(Duration::milliseconds(200));
		let first = QueueLock::acquire(&config, deadline(&config)).await.expect("First acquisition should succeed.");

		drop(first);

		QueueLock::acquire(&config, deadline(&config)).await.expect("Lock should be free after the holder drops.");
	}

	#[tokio::test]
	async fn history_round_trips_and_tolerates_corruption() {
		let config = temp_queue_config("lock_history");
		let lock = QueueLock::acquire(&config, deadline(&config)).await.expect("Acquisition should succeed.");

		assert_eq!(lock.read_history(), CallHistory::default());

		lock.write_history(&CallHistory { calls: vec![1, 2, 3] })
			.expect("History should be writable while holding the lock.");

		assert_eq!(lock.read_history().calls, vec![1, 2, 3]);

		fs::write(config.history_path(), b"not json").expect("Corrupting history should work.");

		assert_eq!(lock.read_history(), CallHistory::default());
	}

	#[tokio::test]
	async fn history_is_replaced_through_a_temp_file() {
		let config = temp_queue_config("lock_history_tmp");
		let lock = QueueLock::acquire(&config, deadline(&config))
			.await
			.expect("Acquisition should succeed.");
		let tmp_path = config.history_path().with_extension("json.tmp");

		// Leftover from an interrupted write.
		fs::write(&tmp_path, b"{\"calls\":[").expect("Stale temp file should be writable.");
		lock.write_history(&CallHistory { calls: vec![1_000, 2_000] })
			.expect("History should be writable while holding the lock.");

		assert!(!tmp_path.exists(), "Temp file must be renamed away.");
		assert_eq!(lock.read_history().calls, vec![1_000, 2_000]);

		lock.write_history(&CallHistory { calls: vec![3_000] })
			.expect("History should be replaceable.");

		assert_eq!(
			fs::read(config.history_path()).expect("History file should exist."),
			b"{\"calls\":[3000]}"
		);
	}
}
