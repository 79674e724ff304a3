//! Transport primitives for API calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. A transport receives a
//! fully built [`TransportRequest`] (absolute URL, signed headers, encoded body, timeout) and
//! returns the raw status line, header lines, and body as a [`RawResponse`]. Interpreting the
//! head is left to [`ResponseHead::parse`] so every transport is read the same way.

// std
use std::iter;
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	response::{Response, ResponseHead},
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// clone of a client.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends the request and collects the full response.
	///
	/// Non-success statuses are not errors at this layer; only failures to obtain a response
	/// (network, timeout, IO) are.
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully built request handed to a transport.
#[derive(Clone)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Header name/value pairs in send order.
	pub headers: Vec<(String, String)>,
	/// Encoded body, if any.
	pub body: Option<Vec<u8>>,
	/// Time allowed for the whole exchange.
	pub timeout: Duration,
}
impl TransportRequest {
	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}
impl Debug for TransportRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let header_names = self.headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();

		f.debug_struct("TransportRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &header_names)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Unparsed response as produced by a transport.
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
	/// Status line, e.g. `HTTP/1.1 200 OK`.
	pub status_line: String,
	/// Header lines, e.g. `Content-Type: application/json`.
	pub header_lines: Vec<String>,
	/// Body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Parses the head and pairs it with the body.
	pub fn into_response(self) -> Response {
		let head = ResponseHead::parse(iter::once(self.status_line).chain(self.header_lines));

		Response::new(head, self.body)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let url = request.url.to_string();
			let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
				.map_err(|e| TransportError::network(&url, e))?;
			let mut builder =
				client.request(method, request.url).timeout(request.timeout.unsigned_abs());

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(|e| map_reqwest_error(&url, e))?;
			let status = response.status();
			let status_line = format!(
				"{:?} {} {}",
				response.version(),
				status.as_u16(),
				status.canonical_reason().unwrap_or_default()
			);
			let header_lines = response
				.headers()
				.iter()
				.map(|(name, value)| format!("{name}: {}", String::from_utf8_lossy(value.as_bytes())))
				.collect();
			let body = response.bytes().await.map_err(|e| map_reqwest_error(&url, e))?.to_vec();

			Ok(RawResponse { status_line, header_lines, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(url: &str, e: ReqwestError) -> TransportError {
	if e.is_timeout() {
		TransportError::Timeout { url: url.to_owned() }
	} else {
		TransportError::network(url, e)
	}
}
