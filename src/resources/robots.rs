//! Robot endpoints.

// self
use crate::{
	_prelude::*,
	auth::RobotId,
	client::Client,
	http::{HttpTransport, Method},
	resources::{Robot, Run},
};

/// Facade over `robots/{id}` endpoints.
pub struct Robots<T>
where
	T: ?Sized + HttpTransport,
{
	client: Client<T>,
}
impl<T> Robots<T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) fn new(client: Client<T>) -> Self {
		Self { client }
	}

	/// Fetches a robot.
	pub async fn get(&self, robot_id: &RobotId) -> Result<Robot> {
		self.client.request_json(Method::Get, &format!("robots/{robot_id}"), &()).await
	}

	/// Creates a robot.
	pub async fn create(&self, robot: &Robot) -> Result<Robot> {
		self.client.request_json(Method::Post, "robots", robot).await
	}

	/// Updates a robot.
	pub async fn update(&self, robot_id: &RobotId, robot: &Robot) -> Result<Robot> {
		self.client.request_json(Method::Post, &format!("robots/{robot_id}"), robot).await
	}

	/// Deletes a robot.
	pub async fn remove(&self, robot_id: &RobotId) -> Result<bool> {
		self.client.request_boolean(Method::Delete, &format!("robots/{robot_id}"), &()).await
	}

	/// Lists the runs configured for a robot.
	pub async fn get_runs(&self, robot_id: &RobotId) -> Result<Vec<Run>> {
		self.client.request_json(Method::Get, &format!("robots/{robot_id}/runs"), &()).await
	}
}
impl<T> Debug for Robots<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Robots").field("client", &self.client).finish()
	}
}
