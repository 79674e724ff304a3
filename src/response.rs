//! Parsed HTTP responses.
//!
//! Transports hand back the raw status line and header block; [`ResponseHead::parse`] turns
//! them into a status code, reason phrase, and header map so every transport is interpreted
//! the same way.

// std
use std::borrow::Cow;
// self
use crate::_prelude::*;

/// Status line and headers of a response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseHead {
	/// Status code, or `0` when the status line could not be read.
	pub status: u16,
	/// Reason phrase following the status code (may be empty).
	pub reason: String,
	/// Header names and values, both trimmed. Later duplicates win.
	pub headers: BTreeMap<String, String>,
}
impl ResponseHead {
	/// Parses a raw header block whose first line is the status line.
	///
	/// Lines without a `:` are skipped. Header values may themselves contain `:`.
	pub fn parse<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut lines = lines.into_iter();
		let mut head = Self::default();
		let Some(status_line) = lines.next() else {
			return head;
		};

		if let Some((status, reason)) = parse_status_line(status_line.as_ref()) {
			head.status = status;
			head.reason = reason.to_owned();
		}

		for line in lines {
			let Some((name, value)) = line.as_ref().split_once(':') else {
				continue;
			};
			let name = name.trim();

			if name.is_empty() {
				continue;
			}

			head.headers.insert(name.to_owned(), value.trim().to_owned());
		}

		head
	}
}

/// Immutable response value: head plus raw body.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
	/// Status code.
	pub status: u16,
	/// Reason phrase.
	pub reason: String,
	/// Header map.
	pub headers: BTreeMap<String, String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl Response {
	/// Combines a parsed head with the body bytes.
	pub fn new(head: ResponseHead, body: Vec<u8>) -> Self {
		Self { status: head.status, reason: head.reason, headers: head.headers, body }
	}

	/// Returns `true` for statuses in `100..=399`.
	pub fn is_success(&self) -> bool {
		(100..=399).contains(&self.status)
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}
impl Debug for Response {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Response")
			.field("status", &self.status)
			.field("reason", &self.reason)
			.field("headers", &self.headers)
			.field("body_len", &self.body.len())
			.finish()
	}
}

fn parse_status_line(line: &str) -> Option<(u16, &str)> {
	let mut rest = line.trim();

	while !rest.is_empty() {
		let (token, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

		if token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()) {
			return Some((token.parse().ok()?, tail.trim()));
		}

		rest = tail.trim_start();
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_recovers_status_reason_and_headers() {
		let head = ResponseHead::parse([
			"HTTP/1.1 201 Created",
			"Content-Type: application/json",
			"Location: https://app.dexi.io/api/runs/abc",
			"X-Empty:",
		]);

		assert_eq!(head.status, 201);
		assert_eq!(head.reason, "Created");
		assert_eq!(head.headers.get("Content-Type").map(String::as_str), Some("application/json"));
		assert_eq!(
			head.headers.get("Location").map(String::as_str),
			Some("https://app.dexi.io/api/runs/abc")
		);
		assert_eq!(head.headers.get("X-Empty").map(String::as_str), Some(""));
	}

	#[test]
	fn parse_keeps_multi_word_reasons_and_missing_reasons() {
		assert_eq!(ResponseHead::parse(["HTTP/1.0 404 Not Found"]).reason, "Not Found");
		assert_eq!(
			ResponseHead::parse(["HTTP/1.1 500 INTERNAL_SERVER_ERROR"]).reason,
			"INTERNAL_SERVER_ERROR"
		);

		let head = ResponseHead::parse(["HTTP/2 204"]);

		assert_eq!(head.status, 204);
		assert_eq!(head.reason, "");
	}

	#[test]
	fn parse_skips_malformed_lines() {
		let head = ResponseHead::parse(["garbage", "no-colon-here", ": nameless", "A: b"]);

		assert_eq!(head.status, 0);
		assert_eq!(head.reason, "");
		assert_eq!(head.headers.len(), 1);
		assert_eq!(head.headers.get("A").map(String::as_str), Some("b"));
	}

	#[test]
	fn parse_of_empty_block_is_default() {
		assert_eq!(ResponseHead::parse(Vec::<String>::new()), ResponseHead::default());
	}

	#[test]
	fn response_success_range_and_header_lookup() {
		let response = |status: u16| {
			Response::new(
				ResponseHead::parse([format!("HTTP/1.1 {status} X"), "Content-Type: text/plain".into()]),
				b"ok".to_vec(),
			)
		};

		assert!(response(100).is_success());
		assert!(response(200).is_success());
		assert!(response(399).is_success());
		assert!(!response(400).is_success());
		assert!(!response(503).is_success());
		assert_eq!(response(200).header("content-type"), Some("text/plain"));
		assert_eq!(response(200).text(), "ok");
	}
}
