//! API credentials and the derived access key sent with every request.

// crates.io
use md5::{Digest, Md5};
// self
use crate::{_prelude::*, auth::AccountId};

/// Redacted secret wrapper keeping API keys and access keys out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable account credentials.
///
/// The access key is derived once at construction as the lowercase hex MD5 digest of
/// `account_id ++ api_key`; the API key itself never leaves the process.
#[derive(Clone, Debug)]
pub struct Credentials {
	account_id: AccountId,
	api_key: Secret,
	access_key: Secret,
}
impl Credentials {
	/// Builds credentials and derives the access key.
	pub fn new(api_key: impl Into<String>, account_id: AccountId) -> Self {
		let api_key = Secret::new(api_key);
		let access_key = Secret::new(derive_access_key(&account_id, api_key.expose()));

		Self { account_id, api_key, access_key }
	}

	/// Account identifier sent in the `X-DexiIO-Account` header.
	pub fn account_id(&self) -> &AccountId {
		&self.account_id
	}

	/// Raw API key.
	pub fn api_key(&self) -> &Secret {
		&self.api_key
	}

	/// Derived access key sent in the `X-DexiIO-Access` header.
	pub fn access_key(&self) -> &Secret {
		&self.access_key
	}
}

/// Computes `hex(md5(account_id ++ api_key))`.
pub fn derive_access_key(account_id: &str, api_key: &str) -> String {
	let mut hasher = Md5::new();

	hasher.update(account_id.as_bytes());
	hasher.update(api_key.as_bytes());

	format!("{:x}", hasher.finalize())
}
