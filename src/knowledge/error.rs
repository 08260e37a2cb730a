//! Startup failures.

use thiserror::Error;

/// Anything that stops the dataset from loading. Every variant is fatal to
/// the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// The request never completed.
	#[error("could not fetch {url}: {message}")]
	Network {
		/// Requested location.
		url: String,
		/// Transport error text.
		message: String,
	},

	/// The server answered with a non-success status.
	#[error("fetching {url} returned HTTP {status}")]
	Status {
		/// Requested location.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The response arrived but its body could not be read as text.
	#[error("could not read response body from {url}: {message}")]
	Body {
		/// Requested location.
		url: String,
		/// Read error text.
		message: String,
	},

	/// The body was not a JSON array.
	#[error("dataset is not a JSON array of papers: {0}")]
	Parse(String),
}

impl From<serde_json::Error> for LoadError {
	fn from(err: serde_json::Error) -> Self {
		LoadError::Parse(err.to_string())
	}
}
