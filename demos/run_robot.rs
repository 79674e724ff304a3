//! Demonstrates executing a run, polling its execution, and reading the result rows against a
//! mock dexi.io endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use cloudscrape::{
	auth::{AccountId, Credentials, ExecutionId, RunId},
	client::DefaultClient,
	config::RequestConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let execute_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/runs/run-demo/execute").query_param("connect", "false");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"_id\":\"exe-demo\",\"state\":\"QUEUED\",\"runId\":\"run-demo\"}");
		})
		.await;
	let status_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/executions/exe-demo");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"_id\":\"exe-demo\",\"state\":\"OK\",\"finished\":1700000000000}");
		})
		.await;
	let result_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/executions/exe-demo/result");
			then.status(200).header("content-type", "application/json").body(
				"{\"headers\":[\"title\",\"price\"],\"rows\":[[\"Widget\",9.5],[\"Gadget\",12]],\"totalRows\":2}",
			);
		})
		.await;
	let config = RequestConfig::default().with_endpoint(server.url("/api/"))?;
	let client = DefaultClient::with_config(
		Credentials::new("demo-api-key", AccountId::new("demo-account")?),
		config,
	)?;
	let run_id = RunId::new("run-demo")?;
	let execution = client.runs().execute(&run_id, false).await?;
	let execution_id = ExecutionId::new(execution.id.as_deref().unwrap_or_default())?;

	println!("Started execution {execution_id} ({:?}).", execution.state);

	let execution = client.executions().get(&execution_id).await?;

	println!("Execution {execution_id} is now {:?}.", execution.state);

	let result = client.executions().get_result(&execution_id).await?;

	println!("Columns: {}.", result.headers.join(", "));

	for row in &result.rows {
		println!("Row: {row:?}.");
	}

	execute_mock.assert_async().await;
	status_mock.assert_async().await;
	result_mock.assert_async().await;

	Ok(())
}
