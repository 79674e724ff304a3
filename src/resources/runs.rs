//! Run endpoints, including synchronous and input-driven execution.

// self
use crate::{
	_prelude::*,
	auth::RunId,
	client::Client,
	http::{HttpTransport, Method},
	resources::{Execution, Page, ResultSet, Run},
};

/// Facade over `runs/{id}` endpoints.
pub struct Runs<T>
where
	T: ?Sized + HttpTransport,
{
	client: Client<T>,
}
impl<T> Runs<T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) fn new(client: Client<T>) -> Self {
		Self { client }
	}

	/// Fetches a run.
	pub async fn get(&self, run_id: &RunId) -> Result<Run> {
		self.client.request_json(Method::Get, &format!("runs/{run_id}"), &()).await
	}

	/// Creates a run.
	pub async fn create(&self, run: &Run) -> Result<Run> {
		self.client.request_json(Method::Post, "runs", run).await
	}

	/// Updates a run.
	pub async fn update(&self, run_id: &RunId, run: &Run) -> Result<Run> {
		self.client.request_json(Method::Post, &format!("runs/{run_id}"), run).await
	}

	/// Deletes a run.
	pub async fn remove(&self, run_id: &RunId) -> Result<bool> {
		self.client.request_boolean(Method::Delete, &format!("runs/{run_id}"), &()).await
	}

	/// Starts an execution and returns immediately; `connect` is sent as the `connect` query
	/// flag.
	pub async fn execute(&self, run_id: &RunId, connect: bool) -> Result<Execution> {
		self.client
			.request_json(Method::Post, &format!("runs/{run_id}/execute?connect={connect}"), &())
			.await
	}

	/// Starts an execution and waits for its result.
	///
	/// The call is held open until the execution finishes, so the request timeout must cover
	/// the whole execution.
	pub async fn execute_sync(&self, run_id: &RunId) -> Result<ResultSet> {
		self.client.request_json(Method::Post, &format!("runs/{run_id}/execute/wait"), &()).await
	}

	/// Starts an execution with a one-off input and returns immediately.
	pub async fn execute_with_input<I>(
		&self,
		run_id: &RunId,
		input: &I,
		connect: bool,
	) -> Result<Execution>
	where
		I: ?Sized + Serialize,
	{
		self.client
			.request_json(
				Method::Post,
				&format!("runs/{run_id}/execute/inputs?connect={connect}"),
				input,
			)
			.await
	}

	/// Starts an execution with a one-off input and waits for its result.
	pub async fn execute_with_input_sync<I>(&self, run_id: &RunId, input: &I) -> Result<ResultSet>
	where
		I: ?Sized + Serialize,
	{
		self.client
			.request_json(Method::Post, &format!("runs/{run_id}/execute/inputs/wait"), input)
			.await
	}

	/// Fetches the result of the latest execution.
	pub async fn get_latest_result(&self, run_id: &RunId) -> Result<ResultSet> {
		self.client.request_json(Method::Get, &format!("runs/{run_id}/latest/result"), &()).await
	}

	/// Lists executions of a run.
	pub async fn get_executions(
		&self,
		run_id: &RunId,
		offset: u64,
		limit: u64,
	) -> Result<Page<Execution>> {
		self.client
			.request_json(
				Method::Get,
				&format!("runs/{run_id}/executions?offset={offset}&limit={limit}"),
				&(),
			)
			.await
	}

	/// Replaces every input of a run.
	pub async fn set_inputs<I>(&self, run_id: &RunId, inputs: &I) -> Result<bool>
	where
		I: ?Sized + Serialize,
	{
		self.client.request_boolean(Method::Put, &format!("runs/{run_id}/inputs"), inputs).await
	}

	/// Appends an input to a run.
	pub async fn add_input<I>(&self, run_id: &RunId, input: &I) -> Result<bool>
	where
		I: ?Sized + Serialize,
	{
		self.client.request_boolean(Method::Post, &format!("runs/{run_id}/inputs"), input).await
	}

	/// Removes every input of a run.
	pub async fn clear_inputs(&self, run_id: &RunId) -> Result<bool> {
		self.client.request_boolean(Method::Delete, &format!("runs/{run_id}/inputs"), &()).await
	}
}
impl<T> Debug for Runs<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Runs").field("client", &self.client).finish()
	}
}
