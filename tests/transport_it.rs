// std
use std::error::Error as StdError;
// crates.io
use parking_lot::Mutex;
// self
use cloudscrape::{
	_preludet::*,
	auth::derive_access_key,
	client::{ACCESS_HEADER, ACCOUNT_HEADER, Client},
	config::{DEFAULT_USER_AGENT, RequestConfig},
	error::{ConfigError, TransportError},
	http::{HttpTransport, Method, RawResponse, TransportFuture, TransportRequest},
};

#[derive(Debug)]
struct Unreachable;
impl Display for Unreachable {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Host unreachable.")
	}
}
impl StdError for Unreachable {}

enum Reply {
	Raw(&'static str, Vec<&'static str>, &'static [u8]),
	Offline,
}

struct ScriptedTransport {
	reply: Reply,
	seen: Mutex<Vec<TransportRequest>>,
}
impl ScriptedTransport {
	fn new(reply: Reply) -> Self {
		Self { reply, seen: Mutex::new(Vec::new()) }
	}
}
impl HttpTransport for ScriptedTransport {
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let url = request.url.to_string();

			self.seen.lock().push(request);

			match &self.reply {
				Reply::Raw(status_line, header_lines, body) => Ok(RawResponse {
					status_line: (*status_line).to_owned(),
					header_lines: header_lines.iter().map(|line| (*line).to_owned()).collect(),
					body: body.to_vec(),
				}),
				Reply::Offline => Err(TransportError::network(url, Unreachable)),
			}
		})
	}
}

fn client_with(reply: Reply) -> (Client<ScriptedTransport>, Arc<ScriptedTransport>) {
	let transport = Arc::new(ScriptedTransport::new(reply));
	let client: Client<ScriptedTransport> = Client::with_transport(
		test_credentials(),
		RequestConfig::default(),
		Arc::clone(&transport),
	)
	.expect("Scripted client should build.");

	(client, transport)
}

#[tokio::test]
async fn signed_headers_are_sent_in_order() {
	let (client, transport) = client_with(Reply::Raw("HTTP/1.1 200 OK", Vec::new(), b"{}"));

	client
		.request(Method::Put, "/runs/run-1/inputs", &serde_json::json!([{ "q": "rust" }]))
		.await
		.expect("Scripted call should succeed.");

	let seen = transport.seen.lock();
	let request = &seen[0];
	let names = request.headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();

	assert_eq!(request.method, Method::Put);
	assert_eq!(request.url.as_str(), "https://app.dexi.io/api/runs/run-1/inputs");
	assert_eq!(names, vec![
		ACCESS_HEADER,
		ACCOUNT_HEADER,
		"User-Agent",
		"Accept",
		"Content-Type",
		"Content-Length"
	]);
	assert_eq!(
		request.header(ACCESS_HEADER),
		Some(derive_access_key(TEST_ACCOUNT_ID, TEST_API_KEY).as_str())
	);
	assert_eq!(request.header(ACCOUNT_HEADER), Some(TEST_ACCOUNT_ID));
	assert_eq!(request.header("user-agent"), Some(DEFAULT_USER_AGENT));
	assert_eq!(request.body.as_deref(), Some(&b"[{\"q\":\"rust\"}]"[..]));
	assert_eq!(request.header("Content-Length"), Some("14"));
	assert_eq!(request.timeout, Duration::hours(1));
}

#[tokio::test]
async fn raw_heads_are_parsed_leniently() {
	let (client, _) = client_with(Reply::Raw(
		"HTTP/1.1 500 Internal Server Error",
		vec!["Content-Type:  application/json ", "garbage line", "X-Trace: a:b:c"],
		b"{\"error\":\"boom\"}",
	));
	let err = client
		.request(Method::Get, "robots", &())
		.await
		.expect_err("500 must fail.");

	match err {
		Error::Request(inner) => {
			assert_eq!(inner.status, 500);
			assert_eq!(inner.reason, "Internal Server Error");
			assert_eq!(inner.url, "https://app.dexi.io/api/robots");
			assert_eq!(inner.response.header("content-type"), Some("application/json"));
			assert_eq!(inner.response.header("x-trace"), Some("a:b:c"));
			assert_eq!(inner.response.headers.len(), 2);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn network_failures_keep_their_source() {
	let (client, transport) = client_with(Reply::Offline);
	let err = client.request(Method::Get, "runs/run-1", &()).await.expect_err("Offline must fail.");

	match &err {
		Error::Transport(TransportError::Network { url, source }) => {
			assert_eq!(url, "https://app.dexi.io/api/runs/run-1");
			assert_eq!(source.to_string(), "Host unreachable.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(transport.seen.lock().len(), 1);
}

#[tokio::test]
async fn header_injection_is_rejected_before_sending() {
	let transport = Arc::new(ScriptedTransport::new(Reply::Raw("HTTP/1.1 200 OK", Vec::new(), b"")));
	let client: Client<ScriptedTransport> = Client::with_transport(
		test_credentials(),
		RequestConfig::default().with_user_agent("agent\r\nX-Evil: 1"),
		Arc::clone(&transport),
	)
	.expect("Client should build.");
	let err = client.request(Method::Get, "robots", &()).await.expect_err("CRLF must be rejected.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::InvalidHeader { ref name }) if name == "User-Agent"
	));
	assert!(transport.seen.lock().is_empty());
}
