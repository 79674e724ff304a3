//! Permissive API models.
//!
//! The service owns these shapes; known fields are optional and anything unrecognized is kept
//! in `extra` so callers never lose data across a round trip.

// self
use crate::_prelude::*;

/// Unrecognized JSON fields.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A single execution of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
	/// Execution identifier.
	#[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Lifecycle state as reported by the service (`QUEUED`, `RUNNING`, `OK`, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Start time in unix milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub starts: Option<i64>,
	/// Finish time in unix milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub finished: Option<i64>,
	/// Robot the execution belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub robot_id: Option<String>,
	/// Run the execution belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub run_id: Option<String>,
	/// Unrecognized fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Tabular result of an execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
	/// Column names.
	#[serde(default)]
	pub headers: Vec<String>,
	/// Row values in column order.
	#[serde(default)]
	pub rows: Vec<Vec<serde_json::Value>>,
	/// Total row count reported by the service.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_rows: Option<u64>,
	/// Unrecognized fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// File captured during an execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFile {
	/// MIME type of the file.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mime_type: Option<String>,
	/// File contents as delivered by the service (base64).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub contents: Option<String>,
	/// Unrecognized fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// A run: a robot plus its configuration and inputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
	/// Run identifier.
	#[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Robot executed by the run.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub robot_id: Option<String>,
	/// Unrecognized fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// A robot definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Robot {
	/// Robot identifier.
	#[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Unrecognized fields.
	#[serde(flatten)]
	pub extra: Extra,
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
	/// Offset of the first row.
	#[serde(default)]
	pub offset: u64,
	/// Total rows available.
	#[serde(default)]
	pub total_rows: u64,
	/// Rows on this page.
	#[serde(default = "Vec::new")]
	pub rows: Vec<T>,
}
