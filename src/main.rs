mod api;
mod components;
mod notify;
mod pagination;
mod viewer;

use std::sync::Arc;

use api::{FetchError, ResultItem, ResultPage, SearchRequest};
use iced::{
	executor,
	widget::{column, image::Handle, scrollable, scrollable::RelativeOffset},
	Application, Command, Settings, Theme
};
use log::error;
use notify::Notifications;
use once_cell::sync::Lazy;
use pagination::{Pagination, Phase, PAGE_SIZE};
use tokio::time::sleep;
use viewer::Viewer;

const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");

const NO_MATCHES: &str =
	"Sorry, there are no images matching your search query. Please try again.";
const END_OF_RESULTS: &str = "We are sorry, but you have reached the end of search results.";
const SEARCH_FAILED: &str = "Something went wrong while searching. Please try again.";

pub static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);
pub static SCROLLABLE_ID: Lazy<scrollable::Id> = Lazy::new(scrollable::Id::unique);

pub type Element<'a> = iced::Element<'a, Message, iced::Renderer<Theme>>;

#[derive(Debug, Clone)]
pub struct Card {
	pub item: ResultItem,
	pub thumb: Option<Handle>
}

pub struct App {
	pub search_input: String,
	pub cards: Vec<Card>,
	pub pagination: Pagination,
	pub notices: Notifications,
	pub viewer: Viewer,
	pub fetching: bool,
	/// stamp for in-flight work, a new submit invalidates older responses
	generation: u64,
	pub em: u16
}

#[derive(Debug, Clone)]
pub enum Message {
	None,
	SearchInput(String),
	SubmitSearch,
	LoadMore,
	PageFetched {
		generation: u64,
		result: Result<ResultPage, Arc<FetchError>>
	},
	ThumbLoaded {
		generation: u64,
		index: usize,
		handle: Handle
	},
	OpenViewer(usize),
	CloseViewer,
	ViewerImage { url: String, handle: Handle },
	ScrollToTop,
	DismissNotice(u64)
}

impl App {
	fn submit(&mut self) -> Command<Message> {
		let Some(request) = SearchRequest::new(&self.search_input, 1) else {
			// empty input, nothing happens
			return Command::none();
		};
		self.generation += 1;
		self.fetching = true;
		self.pagination.start(request.query().to_owned());
		fetch_page(request, self.generation)
	}

	fn load_more(&mut self) -> Command<Message> {
		if self.fetching || !self.pagination.can_load_more() {
			return Command::none();
		}
		self.pagination.advance();
		let Some(request) =
			SearchRequest::new(self.pagination.query(), self.pagination.page())
		else {
			return Command::none();
		};
		self.fetching = true;
		fetch_page(request, self.generation)
	}

	fn page_fetched(
		&mut self,
		generation: u64,
		result: Result<ResultPage, Arc<FetchError>>
	) -> Command<Message> {
		if generation != self.generation {
			// a newer submit superseded this response
			return Command::none();
		}
		self.fetching = false;
		match result {
			Ok(page) => self.render_page(page),
			Err(err) => {
				error!("{err}");
				let id = self.notices.failure(SEARCH_FAILED.to_owned());
				dismiss_later(id)
			}
		}
	}

	fn render_page(&mut self, page: ResultPage) -> Command<Message> {
		let first_page = self.pagination.page() == 1;
		if page.hits.is_empty() && first_page {
			self.cards.clear();
			self.viewer.refresh(&self.cards);
			self.pagination.record_page(page.total_hits, 0);
			let id = self.notices.failure(NO_MATCHES.to_owned());
			return dismiss_later(id);
		}

		if first_page {
			self.cards.clear();
		}
		let appended_at = self.cards.len();
		self.cards.extend(page.hits.into_iter().map(|item| Card {
			item,
			thumb: None
		}));
		self.viewer.refresh(&self.cards);
		let item_count = self.cards.len() - appended_at;
		let phase = self.pagination.record_page(page.total_hits, item_count);

		let mut commands = vec![self.fetch_thumbs(appended_at)];
		if first_page {
			let id = self
				.notices
				.success(format!("Hooray! We found {} images.", page.total_hits));
			commands.push(dismiss_later(id));
		} else if !self.cards.is_empty() {
			// bring the start of the new page into view
			let y = appended_at as f32 / self.cards.len() as f32;
			commands.push(scrollable::snap_to(
				SCROLLABLE_ID.clone(),
				RelativeOffset { x: 0.0, y }
			));
		}
		if phase == Phase::Exhausted {
			let id = self.notices.info(END_OF_RESULTS.to_owned());
			commands.push(dismiss_later(id));
		}
		Command::batch(commands)
	}

	fn fetch_thumbs(&self, from: usize) -> Command<Message> {
		let generation = self.generation;
		Command::batch(self.cards[from..].iter().enumerate().map(|(offset, card)| {
			let index = from + offset;
			let url = card.item.preview_url.clone();
			Command::perform(api::fetch_image(url), move |res| match res {
				Ok(handle) => Message::ThumbLoaded {
					generation,
					index,
					handle
				},
				Err(err) => {
					error!("{err:#}");
					Message::None
				}
			})
		}))
	}
}

fn fetch_page(request: SearchRequest, generation: u64) -> Command<Message> {
	Command::perform(api::fetch_page(request), move |result| {
		Message::PageFetched {
			generation,
			result: result.map_err(Arc::new)
		}
	})
}

fn fetch_viewer_image(url: String) -> Command<Message> {
	Command::perform(api::fetch_image(url.clone()), move |res| match res {
		Ok(handle) => Message::ViewerImage { url, handle },
		Err(err) => {
			error!("{err:#}");
			Message::None
		}
	})
}

fn dismiss_later(id: u64) -> Command<Message> {
	Command::perform(async move { sleep(notify::DISMISS_AFTER).await }, move |()| {
		Message::DismissNotice(id)
	})
}

impl Application for App {
	type Executor = executor::Default;
	type Flags = ();
	type Message = Message;
	type Theme = Theme;

	fn new(_flags: Self::Flags) -> (Self, Command<Self::Message>) {
		(
			App {
				search_input: String::new(),
				cards: Vec::new(),
				pagination: Pagination::new(PAGE_SIZE),
				notices: Notifications::default(),
				viewer: Viewer::default(),
				fetching: false,
				generation: 0,
				em: 16
			},
			Command::none()
		)
	}

	fn title(&self) -> String {
		CARGO_PKG_NAME.to_owned()
	}

	fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
		match message {
			Message::None => Command::none(),
			Message::SearchInput(value) => {
				self.search_input = value;
				Command::none()
			},
			Message::SubmitSearch => self.submit(),
			Message::LoadMore => self.load_more(),
			Message::PageFetched { generation, result } => {
				self.page_fetched(generation, result)
			},
			Message::ThumbLoaded {
				generation,
				index,
				handle
			} => {
				if generation == self.generation {
					if let Some(card) = self.cards.get_mut(index) {
						card.thumb = Some(handle);
					}
				}
				Command::none()
			},
			Message::OpenViewer(index) => match self.viewer.open(index) {
				Some(url) => fetch_viewer_image(url),
				None => Command::none()
			},
			Message::CloseViewer => {
				self.viewer.close();
				Command::none()
			},
			Message::ViewerImage { url, handle } => {
				self.viewer.image_ready(&url, handle);
				Command::none()
			},
			Message::ScrollToTop => {
				scrollable::snap_to(SCROLLABLE_ID.clone(), RelativeOffset::START)
			},
			Message::DismissNotice(id) => {
				self.notices.dismiss(id);
				Command::none()
			}
		}
	}

	fn view(&self) -> iced::Element<'_, Self::Message, iced::Renderer<Self::Theme>> {
		if self.viewer.is_open() {
			return components::viewer::view(self);
		}
		column!(
			components::top_bar::view(self),
			components::notices::view(self),
			components::gallery::view(self)
		)
		.into()
	}

	fn theme(&self) -> Self::Theme {
		Theme::Dark
	}
}

fn main() -> iced::Result {
	my_env_logger_style::builder()
		.filter(Some("wgpu_core"), log::LevelFilter::Warn)
		.filter(Some("wgpu_hal"), log::LevelFilter::Warn)
		.filter(Some("iced_wgpu"), log::LevelFilter::Warn)
		.init();
	App::run(Settings::default())
}

#[cfg(test)]
mod tests {
	use super::*;
	use notify::Kind;

	fn item(n: usize) -> ResultItem {
		ResultItem {
			preview_url: format!("https://example.com/small{n}.jpg"),
			full_url: format!("https://example.com/big{n}.jpg"),
			tags: format!("tag{n}"),
			likes: 1,
			views: 2,
			comments: 3,
			downloads: 4
		}
	}

	fn page(count: usize, total_hits: u32) -> ResultPage {
		ResultPage {
			hits: (0..count).map(item).collect(),
			total_hits
		}
	}

	fn app() -> App {
		App::new(()).0
	}

	fn submit(app: &mut App, query: &str) {
		app.search_input = query.to_owned();
		let _ = app.update(Message::SubmitSearch);
	}

	fn deliver(app: &mut App, page: ResultPage) {
		let generation = app.generation;
		let _ = app.update(Message::PageFetched {
			generation,
			result: Ok(page)
		});
	}

	fn has_notice(app: &App, kind: Kind) -> bool {
		app.notices.iter().any(|notice| notice.kind == kind)
	}

	#[test]
	fn empty_submit_is_a_noop() {
		let mut app = app();
		app.search_input = "   \t".to_owned();
		let _ = app.update(Message::SubmitSearch);
		assert!(!app.fetching);
		assert_eq!(app.generation, 0);
		assert_eq!(app.pagination.query(), "");
	}

	#[test]
	fn submit_resets_to_the_first_page() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 120));
		let _ = app.update(Message::LoadMore);
		deliver(&mut app, page(40, 120));
		assert_eq!(app.pagination.page(), 2);

		submit(&mut app, "dogs");
		assert!(app.fetching);
		assert_eq!(app.pagination.page(), 1);
		assert_eq!(app.pagination.query(), "dogs");
	}

	#[test]
	fn load_more_appends_below_existing_cards() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 200));
		assert_eq!(app.cards.len(), 40);

		let _ = app.update(Message::LoadMore);
		deliver(&mut app, page(40, 200));
		let _ = app.update(Message::LoadMore);
		deliver(&mut app, page(40, 200));
		assert_eq!(app.cards.len(), 120);
		// still the first query's cards in front
		assert_eq!(app.cards[0].item.tags, "tag0");
	}

	#[test]
	fn load_more_is_refused_while_a_fetch_is_pending() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 200));
		let _ = app.update(Message::LoadMore);
		assert!(app.fetching);
		assert_eq!(app.pagination.page(), 2);
		// second click before the response arrives
		let _ = app.update(Message::LoadMore);
		assert_eq!(app.pagination.page(), 2);
	}

	#[test]
	fn zero_results_clear_the_surface() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 100));
		assert_eq!(app.cards.len(), 40);

		submit(&mut app, "qwertzuiop");
		deliver(&mut app, page(0, 0));
		assert!(app.cards.is_empty());
		assert!(app.viewer.entries().is_empty());
		assert_eq!(app.pagination.page(), 1);
		assert!(!app.pagination.can_load_more());
		assert!(has_notice(&app, Kind::Failure));
	}

	#[test]
	fn partial_last_page_ends_the_search() {
		let mut app = app();
		submit(&mut app, "flowers");
		deliver(&mut app, page(40, 86));
		assert!(app.pagination.can_load_more());
		assert!(has_notice(&app, Kind::Success));

		let _ = app.update(Message::LoadMore);
		deliver(&mut app, page(40, 86));
		assert!(app.pagination.can_load_more());
		assert!(!has_notice(&app, Kind::Info));

		let _ = app.update(Message::LoadMore);
		deliver(&mut app, page(6, 86));
		assert_eq!(app.cards.len(), 86);
		assert!(!app.pagination.can_load_more());
		assert!(has_notice(&app, Kind::Info));
	}

	#[test]
	fn a_new_submit_replaces_the_old_results() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 100));

		submit(&mut app, "dogs");
		deliver(&mut app, page(10, 10));
		assert_eq!(app.cards.len(), 10);
		assert_eq!(app.viewer.entries().len(), 10);
	}

	#[test]
	fn superseded_responses_are_dropped() {
		let mut app = app();
		submit(&mut app, "cats");
		let stale = app.generation;
		submit(&mut app, "dogs");
		let _ = app.update(Message::PageFetched {
			generation: stale,
			result: Ok(page(40, 100))
		});
		assert!(app.cards.is_empty());
		// still waiting for the "dogs" response
		assert!(app.fetching);
	}

	#[test]
	fn fetch_failure_surfaces_a_notice() {
		let mut app = app();
		submit(&mut app, "cats");
		let generation = app.generation;
		let error = api::fetch_error_for_tests();
		let _ = app.update(Message::PageFetched {
			generation,
			result: Err(Arc::new(error))
		});
		assert!(!app.fetching);
		assert!(app.cards.is_empty());
		assert!(has_notice(&app, Kind::Failure));
	}

	#[test]
	fn stale_thumbs_are_dropped() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(2, 2));
		let stale = app.generation;
		submit(&mut app, "dogs");
		let _ = app.update(Message::ThumbLoaded {
			generation: stale,
			index: 0,
			handle: Handle::from_memory(vec![0u8])
		});
		assert!(app.cards.is_empty());
	}

	#[test]
	fn viewer_opens_on_rendered_cards() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(3, 3));
		let _ = app.update(Message::OpenViewer(1));
		assert!(app.viewer.is_open());
		let _ = app.update(Message::ViewerImage {
			url: "https://example.com/big1.jpg".to_owned(),
			handle: Handle::from_memory(vec![0u8])
		});
		assert!(app.viewer.image().is_some());
		let _ = app.update(Message::CloseViewer);
		assert!(!app.viewer.is_open());
	}

	#[test]
	fn notices_are_dismissed_by_id() {
		let mut app = app();
		submit(&mut app, "cats");
		deliver(&mut app, page(40, 100));
		let id = app.notices.iter().next().map(|notice| notice.id).unwrap();
		let _ = app.update(Message::DismissNotice(id));
		assert_eq!(app.notices.iter().count(), 0);
	}
}
