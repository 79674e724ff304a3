//! Execution endpoints.

// self
use crate::{
	_prelude::*,
	auth::{ExecutionId, FileId},
	client::Client,
	http::{HttpTransport, Method},
	resources::{Execution, ResultFile, ResultSet},
};

/// Facade over `executions/{id}` endpoints.
pub struct Executions<T>
where
	T: ?Sized + HttpTransport,
{
	client: Client<T>,
}
impl<T> Executions<T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) fn new(client: Client<T>) -> Self {
		Self { client }
	}

	/// Fetches an execution.
	pub async fn get(&self, execution_id: &ExecutionId) -> Result<Execution> {
		self.client.request_json(Method::Get, &format!("executions/{execution_id}"), &()).await
	}

	/// Deletes an execution and its results.
	pub async fn remove(&self, execution_id: &ExecutionId) -> Result<bool> {
		self.client.request_boolean(Method::Delete, &format!("executions/{execution_id}"), &()).await
	}

	/// Fetches the result rows of an execution.
	pub async fn get_result(&self, execution_id: &ExecutionId) -> Result<ResultSet> {
		self.client
			.request_json(Method::Get, &format!("executions/{execution_id}/result"), &())
			.await
	}

	/// Fetches a file captured by an execution.
	pub async fn get_result_file(
		&self,
		execution_id: &ExecutionId,
		file_id: &FileId,
	) -> Result<ResultFile> {
		self.client
			.request_json(Method::Get, &format!("executions/{execution_id}/file/{file_id}"), &())
			.await
	}

	/// Stops a running execution.
	pub async fn stop(&self, execution_id: &ExecutionId) -> Result<bool> {
		self.client
			.request_boolean(Method::Post, &format!("executions/{execution_id}/stop"), &())
			.await
	}

	/// Resumes a paused execution.
	pub async fn resume(&self, execution_id: &ExecutionId) -> Result<bool> {
		self.client
			.request_boolean(Method::Post, &format!("executions/{execution_id}/continue"), &())
			.await
	}
}
impl<T> Debug for Executions<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Executions").field("client", &self.client).finish()
	}
}
