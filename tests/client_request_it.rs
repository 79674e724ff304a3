// crates.io
use httpmock::prelude::*;
// self
use cloudscrape::{
	_preludet::*,
	auth::derive_access_key,
	client::{ACCESS_HEADER, ACCOUNT_HEADER, DefaultClient},
	config::DEFAULT_USER_AGENT,
	error::{RequestError, TransportError},
	http::Method,
};

fn access_key() -> String {
	derive_access_key(TEST_ACCOUNT_ID, TEST_API_KEY)
}

#[tokio::test]
async fn request_signs_headers_without_body() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/runs/run-1")
				.header(ACCESS_HEADER, access_key())
				.header(ACCOUNT_HEADER, TEST_ACCOUNT_ID)
				.header("user-agent", DEFAULT_USER_AGENT)
				.header("accept", "application/json")
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").body("{\"_id\":\"run-1\"}");
		})
		.await;
	let response = client
		.request(Method::Get, "runs/run-1", &())
		.await
		.expect("Signed GET should succeed.");

	assert_eq!(response.status, 200);
	assert_eq!(response.reason, "OK");
	assert_eq!(response.header("Content-Type"), Some("application/json"));
	assert_eq!(response.text(), "{\"_id\":\"run-1\"}");

	mock.assert_async().await;
}

#[tokio::test]
async fn request_sends_json_body_with_length() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let body = serde_json::json!({ "name": "nightly", "robotId": "robot-9" });
	let encoded = serde_json::to_vec(&body).expect("Fixture body should encode.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/runs")
				.header("content-length", encoded.len().to_string())
				.json_body(body.clone());
			then.status(201).body("{}");
		})
		.await;
	let created = client
		.request_boolean(Method::Post, "/runs", &body)
		.await
		.expect("POST with body should succeed.");

	assert!(created);

	mock.assert_async().await;
}

#[tokio::test]
async fn statuses_up_to_399_succeed() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/executions/exe-1");
			then.status(399);
		})
		.await;
	let response = client
		.request(Method::Delete, "executions/exe-1", &())
		.await
		.expect("Status 399 should still count as success.");

	assert_eq!(response.status, 399);

	mock.assert_async().await;
}

#[tokio::test]
async fn error_statuses_raise_request_error() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/robots/missing");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"error\":\"not found\"}");
		})
		.await;
	let err = client
		.request(Method::Get, "robots/missing", &())
		.await
		.expect_err("404 responses must fail.");

	match err {
		Error::Request(RequestError { url, status, reason, response }) => {
			assert_eq!(url, format!("{}/api/robots/missing", server.base_url()));
			assert_eq!(status, 404);
			assert_eq!(reason, "Not Found");
			assert_eq!(response.text(), "{\"error\":\"not found\"}");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn request_json_decodes_and_reports_paths() {
	#[derive(Debug, Deserialize)]
	struct Counter {
		total: u64,
	}

	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/counter/good");
			then.status(200).body("{\"total\":12}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/counter/bad");
			then.status(200).body("{\"total\":\"twelve\"}");
		})
		.await;

	let counter: Counter = client
		.request_json(Method::Get, "counter/good", &())
		.await
		.expect("Well-formed JSON should decode.");

	assert_eq!(counter.total, 12);

	let err = client
		.request_json::<Counter, _>(Method::Get, "counter/bad", &())
		.await
		.expect_err("Mistyped JSON should fail to decode.");

	match err {
		Error::Decode { path, source } => {
			assert_eq!(path, "counter/bad");
			assert_eq!(source.path().to_string(), "total");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn slow_responses_hit_the_request_timeout() {
	let server = MockServer::start_async().await;
	let client = DefaultClient::with_config(
		test_credentials(),
		test_config(&server.base_url()).with_timeout(Duration::milliseconds(100)),
	)
	.expect("Client with a short timeout should build.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/slow");
			then.status(200).delay(std::time::Duration::from_millis(500));
		})
		.await;

	let err = client
		.request(Method::Get, "slow", &())
		.await
		.expect_err("Slow responses must time out.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })), "{err:?}");
}
