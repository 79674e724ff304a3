//! Client-level error types shared across the transport, queue, and resource facades.

// self
use crate::{_prelude::*, response::Response};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The API answered with a status outside `100..=399`.
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request queue failure (lock timeout, lock file IO).
	#[error(transparent)]
	Queue(#[from] QueueError),
	/// Identifier passed to a resource facade is malformed.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),

	/// Response body could not be decoded into the requested type.
	#[error("Response body for `{path}` could not be decoded.")]
	Decode {
		/// Request path whose body failed to decode.
		path: String,
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The process-wide default client was used before [`crate::init`].
	#[error("You must call init first before using the API.")]
	NotInitialized,
}

/// Raised when the API answers with a non-success status.
#[derive(Debug, ThisError)]
#[error("CloudScrape request failed: {status} {reason}.")]
pub struct RequestError {
	/// Absolute request URL.
	pub url: String,
	/// HTTP status code parsed from the status line.
	pub status: u16,
	/// Reason phrase parsed from the status line.
	pub reason: String,
	/// Full parsed response, body included.
	pub response: Response,
}
impl RequestError {
	/// Builds the error from a parsed response.
	pub fn new(url: impl Into<String>, response: Response) -> Self {
		Self {
			url: url.into(),
			status: response.status,
			reason: response.reason.clone(),
			response,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint cannot be parsed as an absolute URL.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Endpoint string that failed validation.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path does not end with `/`, so joined paths would drop its last segment.
	#[error("Endpoint `{endpoint}` must end with `/`.")]
	EndpointWithoutTrailingSlash {
		/// Endpoint string that failed validation.
		endpoint: String,
	},
	/// Endpoint uses a scheme other than http or https.
	#[error("Endpoint `{endpoint}` must use http or https.")]
	UnsupportedScheme {
		/// Endpoint string that failed validation.
		endpoint: String,
	},
	/// Request path could not be joined onto the endpoint.
	#[error("Path `{path}` cannot be joined onto the endpoint.")]
	InvalidPath {
		/// Relative path supplied by the caller.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A duration setting was zero or negative.
	#[error("The {setting} setting must be a positive duration.")]
	NonPositiveDuration {
		/// Name of the offending setting.
		setting: &'static str,
	},
	/// Queue limit count was zero.
	#[error("The queue limit count must be at least 1.")]
	ZeroQueueLimit,
	/// Queue lock name cannot be used as a file name.
	#[error("Queue lock name `{name}` is invalid.")]
	InvalidLockName {
		/// Rejected lock name.
		name: String,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	BodyEncode(#[source] serde_json::Error),
	/// A header value contains bytes HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Request URL.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the configured timeout.
	#[error("Request to {url} timed out.")]
	Timeout {
		/// Request URL.
		url: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: impl Into<String>, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}

/// Failures raised while entering the request queue.
#[derive(Debug, ThisError)]
pub enum QueueError {
	/// The named lock could not be acquired before the timeout elapsed.
	#[error("Queue lock `{name}` was not acquired within {timeout}.")]
	LockTimeout {
		/// Lock name.
		name: String,
		/// Timeout that elapsed.
		timeout: Duration,
	},
	/// Lock or history file could not be opened, read, or written.
	#[error("Queue file {path} is not accessible.")]
	Io {
		/// File path involved in the failure.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// History could not be serialized.
	#[error("Queue history could not be serialized.")]
	History(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::response::ResponseHead;

	#[test]
	fn request_error_mirrors_response_status() {
		let head = ResponseHead::parse(["HTTP/1.1 404 Not Found", "Content-Type: application/json"]);
		let response = Response::new(head, b"{}".to_vec());
		let err: Error = RequestError::new("https://app.dexi.io/api/runs/x", response).into();

		match &err {
			Error::Request(inner) => {
				assert_eq!(inner.status, 404);
				assert_eq!(inner.reason, "Not Found");
				assert_eq!(inner.url, "https://app.dexi.io/api/runs/x");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert_eq!(err.to_string(), "CloudScrape request failed: 404 Not Found.");
	}

	#[test]
	fn not_initialized_message_is_stable() {
		assert_eq!(
			Error::NotInitialized.to_string(),
			"You must call init first before using the API."
		);
	}
}
