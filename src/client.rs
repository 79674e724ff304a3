//! The API client: signs requests, routes them through the optional queue, and interprets
//! responses.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{AccountId, Credentials},
	config::RequestConfig,
	error::{ConfigError, RequestError},
	http::{HttpTransport, Method, TransportRequest},
	obs::{self, RequestOutcome, RequestSpan},
	queue::RequestQueue,
	resources::{Executions, Robots, Runs},
	response::Response,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Header carrying the derived access key.
pub const ACCESS_HEADER: &str = "X-DexiIO-Access";
/// Header carrying the account identifier.
pub const ACCOUNT_HEADER: &str = "X-DexiIO-Account";

const JSON_MEDIA_TYPE: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type DefaultClient = Client<ReqwestTransport>;

/// Authenticated client for the dexi.io API.
///
/// The client owns the transport, credentials, settings, and (when enabled) the request
/// queue behind `Arc`s, so clones are cheap and share one queue. Every call goes through
/// [`Client::request`]; [`Client::request_json`] and [`Client::request_boolean`] are thin
/// conveniences on top of it.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	credentials: Arc<Credentials>,
	config: Arc<RequestConfig>,
	queue: Option<Arc<RequestQueue>>,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// The configuration is validated up front; the queue is only built when enabled.
	pub fn with_transport(
		credentials: Credentials,
		config: RequestConfig,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		config.validate()?;

		let queue = if config.use_queue {
			Some(Arc::new(RequestQueue::new(config.queue.clone())?))
		} else {
			None
		};

		Ok(Self {
			transport: transport.into(),
			credentials: Arc::new(credentials),
			config: Arc::new(config),
			queue,
		})
	}

	/// Credentials used to sign requests.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Request settings.
	pub fn config(&self) -> &RequestConfig {
		&self.config
	}

	/// Returns `true` when calls go through the request queue.
	pub fn uses_queue(&self) -> bool {
		self.queue.is_some()
	}

	/// Interact with executions.
	pub fn executions(&self) -> Executions<T> {
		Executions::new(self.clone())
	}

	/// Interact with runs.
	pub fn runs(&self) -> Runs<T> {
		Runs::new(self.clone())
	}

	/// Interact with robots.
	pub fn robots(&self) -> Robots<T> {
		Robots::new(self.clone())
	}

	/// Calls the API and returns the parsed response.
	///
	/// `body` is JSON-encoded; anything that serializes to `null` (such as `&()`) sends no
	/// body. Statuses outside `100..=399` fail with [`RequestError`].
	pub async fn request<B>(&self, method: Method, path: &str, body: &B) -> Result<Response>
	where
		B: ?Sized + Serialize,
	{
		let span = RequestSpan::new(method, path);

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let encoded = encode_body(body);
		let result = span
			.instrument(async move {
				let request = self.build_request(method, path, encoded?)?;

				match &self.queue {
					Some(queue) => queue.enter(|| self.dispatch(request)).await,
					None => self.dispatch(request).await,
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(method, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(method, RequestOutcome::Failure),
		}

		result
	}

	/// Calls the API and decodes the JSON response body into `R`.
	pub async fn request_json<R, B>(&self, method: Method, path: &str, body: &B) -> Result<R>
	where
		R: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let response = self.request(method, path, body).await?;

		decode_json(path, &response)
	}

	/// Calls the API and reports success as `true`; failures surface as errors.
	pub async fn request_boolean<B>(&self, method: Method, path: &str, body: &B) -> Result<bool>
	where
		B: ?Sized + Serialize,
	{
		self.request(method, path, body).await?;

		Ok(true)
	}

	fn build_request(
		&self,
		method: Method,
		path: &str,
		body: Option<Vec<u8>>,
	) -> Result<TransportRequest> {
		let url = self.config.url_for(path)?;
		let mut headers = vec![
			(ACCESS_HEADER.to_owned(), self.credentials.access_key().expose().to_owned()),
			(ACCOUNT_HEADER.to_owned(), self.credentials.account_id().to_string()),
			("User-Agent".to_owned(), self.config.user_agent.clone()),
			("Accept".to_owned(), JSON_MEDIA_TYPE.to_owned()),
			("Content-Type".to_owned(), JSON_MEDIA_TYPE.to_owned()),
		];

		if let Some(body) = &body {
			headers.push(("Content-Length".to_owned(), body.len().to_string()));
		}
		if let Some((name, _)) = headers.iter().find(|(_, value)| value.contains(['\r', '\n'])) {
			return Err(ConfigError::InvalidHeader { name: name.clone() }.into());
		}

		Ok(TransportRequest { method, url, headers, body, timeout: self.config.timeout })
	}

	async fn dispatch(&self, request: TransportRequest) -> Result<Response> {
		let url = request.url.to_string();
		let response = self.transport.execute(request).await?.into_response();

		if response.is_success() {
			Ok(response)
		} else {
			Err(RequestError::new(url, response).into())
		}
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client with default settings and the reqwest transport.
	///
	/// Mirrors the classic `(api_key, account_id, use_queue)` constructor; use
	/// [`Client::with_config`] to tune the endpoint, timeout, or queue.
	pub fn new(
		api_key: impl Into<String>,
		account_id: impl AsRef<str>,
		use_queue: bool,
	) -> Result<Self> {
		let account_id = AccountId::new(account_id)?;

		Self::with_config(
			Credentials::new(api_key, account_id),
			RequestConfig::default().with_queue_enabled(use_queue),
		)
	}

	/// Creates a client with the provided settings and the reqwest transport.
	pub fn with_config(credentials: Credentials, config: RequestConfig) -> Result<Self> {
		Self::with_transport(credentials, config, ReqwestTransport::default())
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			credentials: Arc::clone(&self.credentials),
			config: Arc::clone(&self.config),
			queue: self.queue.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("account_id", self.credentials.account_id())
			.field("endpoint", &self.config.endpoint.as_str())
			.field("uses_queue", &self.uses_queue())
			.finish()
	}
}

fn encode_body<B>(body: &B) -> Result<Option<Vec<u8>>>
where
	B: ?Sized + Serialize,
{
	let value = serde_json::to_value(body).map_err(ConfigError::BodyEncode)?;

	if value.is_null() {
		return Ok(None);
	}

	Ok(Some(serde_json::to_vec(&value).map_err(ConfigError::BodyEncode)?))
}

fn decode_json<R>(path: &str, response: &Response) -> Result<R>
where
	R: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { path: path.to_owned(), source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::RawResponse;

	#[test]
	fn null_bodies_are_not_sent() {
		assert_eq!(encode_body(&()).expect("Unit should encode."), None);
		assert_eq!(encode_body(&None::<u8>).expect("None should encode."), None);
		assert_eq!(
			encode_body(&serde_json::json!({ "a": 1 })).expect("Object should encode."),
			Some(b"{\"a\":1}".to_vec())
		);
	}

	#[test]
	fn decode_reports_the_failing_field() {
		#[derive(Debug, Deserialize)]
		struct Payload {
			#[allow(dead_code)]
			count: u32,
		}

		let response = RawResponse {
			status_line: "HTTP/1.1 200 OK".into(),
			header_lines: Vec::new(),
			body: b"{\"count\":\"many\"}".to_vec(),
		}
		.into_response();
		let err = decode_json::<Payload>("runs/abc", &response)
			.expect_err("String count should fail to decode.");

		match err {
			Error::Decode { path, source } => {
				assert_eq!(path, "runs/abc");
				assert_eq!(source.path().to_string(), "count");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
