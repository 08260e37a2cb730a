//! The one startup fetch of the paper document.

use gloo_net::http::Request;
use log::info;

use crate::knowledge::{LoadError, Session};

/// Fetch `url`, decode it and build the session. Failures are not retried.
pub async fn fetch_session(url: &str) -> Result<Session, LoadError> {
	let response = Request::get(url)
		.send()
		.await
		.map_err(|err| LoadError::Network {
			url: url.to_owned(),
			message: err.to_string(),
		})?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	let text = response.text().await.map_err(|err| LoadError::Body {
		url: url.to_owned(),
		message: err.to_string(),
	})?;

	let session = Session::from_json(&text)?;
	info!(
		"loaded {} papers from {url}: {} nodes, {} links",
		session.papers().len(),
		session.graph().nodes.len(),
		session.graph().links.len()
	);
	Ok(session)
}
