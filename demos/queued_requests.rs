//! Demonstrates the cross-process request queue: clones of one queued client share a budget of
//! two calls per half second, so the third and fourth calls wait for the window to slide.

// std
use std::{env, time::Instant};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use cloudscrape::{
	auth::{AccountId, Credentials, RobotId},
	client::DefaultClient,
	config::{QueueConfig, RequestConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let robot_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/robots/robot-demo/runs");
			then.status(200).header("content-type", "application/json").body("[{\"_id\":\"run-demo\"}]");
		})
		.await;
	let queue = QueueConfig::default()
		.with_lock_name("cloudscrape_demo_queue")
		.with_directory(env::temp_dir())
		.with_limit_count(2)
		.with_limit_window(time::Duration::milliseconds(500));
	let config = RequestConfig::default().with_endpoint(server.url("/api/"))?.with_queue(queue);
	let client = DefaultClient::with_config(
		Credentials::new("demo-api-key", AccountId::new("demo-account")?),
		config,
	)?;
	let robot_id = RobotId::new("robot-demo")?;
	let started = Instant::now();
	let handles = (0..4)
		.map(|i| {
			let robots = client.robots();
			let robot_id = robot_id.clone();

			tokio::spawn(async move {
				let runs = robots.get_runs(&robot_id).await?;

				println!("Call {i} returned {} run(s) after {:?}.", runs.len(), started.elapsed());

				Ok::<_, cloudscrape::error::Error>(())
			})
		})
		.collect::<Vec<_>>();

	for handle in handles {
		handle.await??;
	}

	robot_mock.assert_calls_async(4).await;

	Ok(())
}
