use crate::{api::clean_tags, Card};
use iced::widget::image::Handle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub full_url: String,
	pub caption: String
}

#[derive(Debug, Default)]
/// Overlay over the rendered cards. Starts out empty and only tracks
/// entries that [`refresh`] collected from the gallery surface.
///
/// [`refresh`]: Self::refresh
pub struct Viewer {
	entries: Vec<Entry>,
	open: Option<usize>,
	image: Option<Handle>
}

impl Viewer {
	/// Rebuild the zoomable entries from the current cards.
	/// Must run once after every append, otherwise new cards are not
	/// reachable from the overlay.
	pub fn refresh(&mut self, cards: &[Card]) {
		self.entries = cards
			.iter()
			.map(|card| Entry {
				full_url: card.item.full_url.clone(),
				caption: clean_tags(&card.item.tags)
			})
			.collect();
		if self.open.is_some_and(|index| index >= self.entries.len()) {
			self.close();
		}
	}

	/// Open the overlay on one entry. Returns the full-size url the
	/// caller has to fetch, the overlay shows a placeholder until
	/// [`image_ready`] delivers the bytes.
	///
	/// [`image_ready`]: Self::image_ready
	pub fn open(&mut self, index: usize) -> Option<String> {
		let entry = self.entries.get(index)?;
		self.open = Some(index);
		self.image = None;
		Some(entry.full_url.clone())
	}

	pub fn close(&mut self) {
		self.open = None;
		self.image = None;
	}

	/// store a fetched full-size image, unless the overlay moved on
	pub fn image_ready(&mut self, url: &str, handle: Handle) {
		if self.current().map(|entry| entry.full_url.as_str()) == Some(url) {
			self.image = Some(handle);
		}
	}

	pub fn current(&self) -> Option<&Entry> {
		self.open.and_then(|index| self.entries.get(index))
	}

	pub fn image(&self) -> Option<&Handle> {
		self.image.as_ref()
	}

	pub fn is_open(&self) -> bool {
		self.open.is_some()
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::ResultItem;

	fn card(n: usize) -> Card {
		Card {
			item: ResultItem {
				preview_url: format!("https://example.com/small{n}.jpg"),
				full_url: format!("https://example.com/big{n}.jpg"),
				tags: format!("tag{n},\tother"),
				likes: 1,
				views: 2,
				comments: 3,
				downloads: 4
			},
			thumb: None
		}
	}

	fn cards(count: usize) -> Vec<Card> {
		(0..count).map(card).collect()
	}

	#[test]
	fn refresh_tracks_appends_and_replacements() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(40));
		assert_eq!(viewer.entries().len(), 40);

		// load more appends
		viewer.refresh(&cards(80));
		assert_eq!(viewer.entries().len(), 80);

		// a fresh submit replaces
		viewer.refresh(&cards(3));
		assert_eq!(viewer.entries().len(), 3);
	}

	#[test]
	fn caption_comes_from_sanitized_tags() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(1));
		assert_eq!(viewer.entries()[0].caption, "tag0, other");
	}

	#[test]
	fn open_hands_out_the_full_url() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(2));
		let url = viewer.open(1).unwrap();
		assert_eq!(url, "https://example.com/big1.jpg");
		assert!(viewer.is_open());
		assert!(viewer.image().is_none());

		viewer.close();
		assert!(!viewer.is_open());
	}

	#[test]
	fn open_out_of_range_is_refused() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(1));
		assert!(viewer.open(5).is_none());
		assert!(!viewer.is_open());
	}

	#[test]
	fn stale_image_is_dropped() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(2));
		let first = viewer.open(0).unwrap();
		// the user moved on before the download finished
		viewer.open(1).unwrap();
		viewer.image_ready(&first, Handle::from_memory(vec![0u8]));
		assert!(viewer.image().is_none());

		viewer.image_ready("https://example.com/big1.jpg", Handle::from_memory(vec![0u8]));
		assert!(viewer.image().is_some());
	}

	#[test]
	fn shrinking_refresh_closes_a_dangling_overlay() {
		let mut viewer = Viewer::default();
		viewer.refresh(&cards(10));
		viewer.open(7).unwrap();
		viewer.refresh(&cards(3));
		assert!(!viewer.is_open());
	}
}
