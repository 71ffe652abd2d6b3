use crate::{pagination::PAGE_SIZE, CLIENT};
use anyhow::Context;
use iced::widget::image::Handle;
use log::info;
use serde::Deserialize;
use thiserror::Error;

const BASE_URL: &str = "https://pixabay.com/api/";
const API_KEY: &str = "30193176-963107e0b52f3e6b90e541e40";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Normalized request descriptor for one search call.
/// Build a fresh one per call, so nothing leaks between searches.
pub struct SearchRequest {
	query: String,
	page: u32
}

impl SearchRequest {
	/// Trims the raw input. Returns [`None`] if nothing is left,
	/// in which case the caller must not fetch or touch any state.
	pub fn new(raw: &str, page: u32) -> Option<Self> {
		let query = raw.trim();
		if query.is_empty() {
			return None;
		}
		Some(Self {
			query: query.to_owned(),
			page
		})
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	fn params(&self) -> [(&'static str, String); 8] {
		[
			("key", API_KEY.to_owned()),
			("q", self.query.clone()),
			("lang", "en".to_owned()),
			("image_type", "photo".to_owned()),
			("orientation", "horizontal".to_owned()),
			("safesearch", "true".to_owned()),
			("page", self.page.to_string()),
			("per_page", PAGE_SIZE.to_string())
		]
	}
}

#[derive(Debug, Error)]
pub enum FetchError {
	#[error("search request failed: {0}")]
	Network(#[source] reqwest::Error),
	#[error("malformed search response: {0}")]
	Parse(#[source] reqwest::Error)
}

#[derive(Debug, Clone, Deserialize)]
/// One record of the api response, kept only until its card is built.
pub struct ResultItem {
	#[serde(rename = "webformatURL")]
	pub preview_url: String,
	#[serde(rename = "largeImageURL")]
	pub full_url: String,
	pub tags: String,
	pub likes: u64,
	pub views: u64,
	pub comments: u64,
	pub downloads: u64
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultPage {
	pub hits: Vec<ResultItem>,
	#[serde(rename = "totalHits")]
	pub total_hits: u32
}

/// perform a single GET for one result page.
/// No retry and no caching, identical queries fetch again.
pub async fn fetch_page(request: SearchRequest) -> Result<ResultPage, FetchError> {
	info!("search for {:?} (page {})", request.query, request.page);
	let response = CLIENT
		.get(BASE_URL)
		.query(&request.params())
		.send()
		.await
		.map_err(FetchError::Network)?
		.error_for_status()
		.map_err(FetchError::Network)?;
	response.json().await.map_err(FetchError::Parse)
}

/// download an image and wrap the bytes for the iced image widget
pub async fn fetch_image(url: String) -> anyhow::Result<Handle> {
	info!("download {url:?}");
	let bytes = CLIENT
		.get(&url)
		.send()
		.await?
		.error_for_status()?
		.bytes()
		.await
		.with_context(|| format!("failed to download {url:?}"))?;
	Ok(Handle::from_memory(bytes.to_vec()))
}

/// Strip control characters and collapse whitespace in untrusted tag
/// text before it is shown or reused as a caption.
pub fn clean_tags(raw: &str) -> String {
	raw.chars()
		.map(|char| if char.is_control() { ' ' } else { char })
		.collect::<String>()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
/// a real builder error, to exercise failure paths without a network
pub fn fetch_error_for_tests() -> FetchError {
	let err = CLIENT.get("http://[invalid").build().unwrap_err();
	FetchError::Network(err)
}
