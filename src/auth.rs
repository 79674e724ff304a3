//! Account credentials, derived access keys, and validated resource identifiers.

pub mod credentials;
pub mod id;

pub use credentials::*;
pub use id::*;
