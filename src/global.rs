//! Process-wide default client for callers that prefer a single shared handle.

// self
use crate::{
	_prelude::*,
	client::DefaultClient,
	http::ReqwestTransport,
	resources::{Executions, Robots, Runs},
};

static DEFAULT_CLIENT: RwLock<Option<DefaultClient>> = parking_lot::const_rwlock(None);

/// Installs the default client, replacing any previous one.
pub fn init(
	api_key: impl Into<String>,
	account_id: impl AsRef<str>,
	use_queue: bool,
) -> Result<DefaultClient> {
	let client = DefaultClient::new(api_key, account_id, use_queue)?;

	install(client.clone());

	Ok(client)
}

/// Installs an already configured client as the default.
pub fn install(client: DefaultClient) {
	*DEFAULT_CLIENT.write() = Some(client);
}

/// Returns the default client, failing with [`Error::NotInitialized`] before [`init`].
pub fn default_client() -> Result<DefaultClient> {
	DEFAULT_CLIENT.read().clone().ok_or(Error::NotInitialized)
}

/// Executions facade of the default client.
pub fn executions() -> Result<Executions<ReqwestTransport>> {
	Ok(default_client()?.executions())
}

/// Runs facade of the default client.
pub fn runs() -> Result<Runs<ReqwestTransport>> {
	Ok(default_client()?.runs())
}

/// Robots facade of the default client.
pub fn robots() -> Result<Robots<ReqwestTransport>> {
	Ok(default_client()?.robots())
}
