//! Request and queue settings with validation.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL every request path is joined onto.
pub const DEFAULT_ENDPOINT: &str = "https://app.dexi.io/api/";
/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("DEXIIO-RUST-CLIENT/", env!("CARGO_PKG_VERSION"));
/// Lock name shared by every queued client unless overridden.
pub const DEFAULT_QUEUE_LOCK_NAME: &str = "CLOUDSCRAPE_CLIENT_REQUEST_QUEUE_LOCK_NAME";

/// Settings applied to every outbound request.
#[derive(Clone, Debug)]
pub struct RequestConfig {
	/// Base URL; must end with `/`. [`RequestConfig::with_endpoint`] adds it when missing.
	pub endpoint: Url,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Per-request timeout. Long synchronous executions may need more than the default hour.
	pub timeout: Duration,
	/// Routes requests through the cross-process queue when set.
	pub use_queue: bool,
	/// Queue tuning; ignored unless `use_queue` is set.
	pub queue: QueueConfig,
}
impl RequestConfig {
	const DEFAULT_TIMEOUT: Duration = Duration::hours(1);

	/// Replaces the endpoint after parsing and normalizing it.
	pub fn with_endpoint(mut self, endpoint: impl AsRef<str>) -> Result<Self, ConfigError> {
		self.endpoint = parse_endpoint(endpoint.as_ref())?;

		Ok(self)
	}

	/// Overrides the user agent.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Enables the request queue with the provided settings.
	pub fn with_queue(mut self, queue: QueueConfig) -> Self {
		self.use_queue = true;
		self.queue = queue;

		self
	}

	/// Toggles the request queue, keeping the current queue settings.
	pub fn with_queue_enabled(mut self, enabled: bool) -> Self {
		self.use_queue = enabled;

		self
	}

	/// Checks every invariant; queue settings are only checked when queueing is enabled.
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_scheme(&self.endpoint)?;

		if !self.endpoint.path().ends_with('/') {
			return Err(ConfigError::EndpointWithoutTrailingSlash {
				endpoint: self.endpoint.to_string(),
			});
		}

		if !self.timeout.is_positive() {
			return Err(ConfigError::NonPositiveDuration { setting: "request timeout" });
		}
		if self.use_queue {
			self.queue.validate()?;
		}

		Ok(())
	}

	/// Joins a request path onto the endpoint. A leading `/` on `path` is ignored.
	pub fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim_start_matches('/');

		self.endpoint
			.join(relative)
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })
	}
}
impl Default for RequestConfig {
	fn default() -> Self {
		Self {
			endpoint: Url::parse(DEFAULT_ENDPOINT)
				.unwrap_or_else(|_| unreachable!("Default endpoint is a valid URL.")),
			user_agent: DEFAULT_USER_AGENT.into(),
			timeout: Self::DEFAULT_TIMEOUT,
			use_queue: false,
			queue: QueueConfig::default(),
		}
	}
}

/// Tuning for the cross-process request queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
	/// Name of the shared lock; clients using the same name share one budget.
	pub lock_name: String,
	/// How long to wait for the lock before failing.
	pub lock_timeout: Duration,
	/// Maximum calls admitted per window.
	pub limit_count: u32,
	/// Sliding window length.
	pub limit_window: Duration,
	/// Directory holding the lock and history files. Defaults to the OS temp dir.
	pub directory: PathBuf,
}
impl QueueConfig {
	const DEFAULT_LOCK_TIMEOUT: Duration = Duration::milliseconds(10_000);
	const DEFAULT_LIMIT_COUNT: u32 = 1;
	const DEFAULT_LIMIT_WINDOW: Duration = Duration::milliseconds(1_000);

	/// Overrides the lock name.
	pub fn with_lock_name(mut self, name: impl Into<String>) -> Self {
		self.lock_name = name.into();

		self
	}

	/// Overrides the lock acquisition timeout.
	pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
		self.lock_timeout = timeout;

		self
	}

	/// Overrides the number of calls admitted per window.
	pub fn with_limit_count(mut self, count: u32) -> Self {
		self.limit_count = count;

		self
	}

	/// Overrides the window length.
	pub fn with_limit_window(mut self, window: Duration) -> Self {
		self.limit_window = window;

		self
	}

	/// Overrides the directory holding the lock and history files.
	pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
		self.directory = directory.into();

		self
	}

	/// Path of the lock file.
	pub fn lock_path(&self) -> PathBuf {
		self.directory.join(format!("{}.lock", self.lock_name))
	}

	/// Path of the call history file.
	pub fn history_path(&self) -> PathBuf {
		self.directory.join(format!("{}.json", self.lock_name))
	}

	/// Checks the queue invariants.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.lock_name.is_empty()
			|| self.lock_name.contains(['/', '\\'])
			|| self.lock_name == "."
			|| self.lock_name == ".."
		{
			return Err(ConfigError::InvalidLockName { name: self.lock_name.clone() });
		}
		if !self.lock_timeout.is_positive() {
			return Err(ConfigError::NonPositiveDuration { setting: "queue lock timeout" });
		}
		if self.limit_count == 0 {
			return Err(ConfigError::ZeroQueueLimit);
		}
		if !self.limit_window.is_positive() {
			return Err(ConfigError::NonPositiveDuration { setting: "queue limit window" });
		}

		Ok(())
	}
}
impl Default for QueueConfig {
	fn default() -> Self {
		Self {
			lock_name: DEFAULT_QUEUE_LOCK_NAME.into(),
			lock_timeout: Self::DEFAULT_LOCK_TIMEOUT,
			limit_count: Self::DEFAULT_LIMIT_COUNT,
			limit_window: Self::DEFAULT_LIMIT_WINDOW,
			directory: std::env::temp_dir(),
		}
	}
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw)
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: raw.to_owned(), source })?;

	validate_scheme(&url)?;

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

fn validate_scheme(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: url.to_string() }),
	}
}
