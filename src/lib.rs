//! Async client for the dexi.io (CloudScrape) scraping API: signed requests, typed resource
//! facades, and an optional cross-process, rate-limited request queue.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "reqwest")] pub mod global;
pub mod http;
pub mod obs;
pub mod queue;
pub mod resources;
pub mod response;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AccountId, Credentials},
		client::DefaultClient,
		config::{QueueConfig, RequestConfig},
	};

	/// Account identifier used by test fixtures.
	pub const TEST_ACCOUNT_ID: &str = "test-account";
	/// API key used by test fixtures.
	pub const TEST_API_KEY: &str = "test-api-key";

	/// Builds the fixture credentials.
	pub fn test_credentials() -> Credentials {
		let account_id =
			AccountId::new(TEST_ACCOUNT_ID).expect("Fixture account identifier should be valid.");

		Credentials::new(TEST_API_KEY, account_id)
	}

	/// Builds request settings that point at a mock server's `/api/` prefix.
	pub fn test_config(base_url: &str) -> RequestConfig {
		RequestConfig::default()
			.with_endpoint(format!("{base_url}/api/"))
			.expect("Mock server URL should be a valid endpoint.")
			.with_timeout(Duration::seconds(10))
	}

	/// Builds a reqwest-backed client that talks to a mock server.
	pub fn build_reqwest_test_client(base_url: &str) -> DefaultClient {
		DefaultClient::with_config(test_credentials(), test_config(base_url))
			.expect("Test client should build.")
	}

	/// Builds a reqwest-backed client whose calls go through the provided queue settings.
	pub fn build_queued_test_client(base_url: &str, queue: QueueConfig) -> DefaultClient {
		DefaultClient::with_config(test_credentials(), test_config(base_url).with_queue(queue))
			.expect("Queued test client should build.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use global::{default_client, init};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
