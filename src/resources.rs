//! Resource facades that map API operations onto fixed path templates.
//!
//! Each facade owns a cheap clone of the [`crate::client::Client`] it was created from and
//! forwards to [`crate::client::Client::request_json`] or
//! [`crate::client::Client::request_boolean`].

pub mod executions;
pub mod model;
pub mod robots;
pub mod runs;

pub use executions::*;
pub use model::*;
pub use robots::*;
pub use runs::*;
