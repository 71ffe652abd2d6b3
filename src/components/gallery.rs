use crate::{api::clean_tags, App, Card, Element, Message, SCROLLABLE_ID};
use iced::{
	theme,
	widget::{button, container, row, scrollable, text, Column, Image, Row},
	Alignment, Length
};

const COLUMNS: usize = 4;
const THUMB_WIDTH: f32 = 240.0;
const THUMB_HEIGHT: f32 = 160.0;

pub fn view(app: &App) -> Element {
	let mut content = Column::new()
		.align_items(Alignment::Center)
		.padding(app.em)
		.spacing(app.em);
	for (row_index, chunk) in app.cards.chunks(COLUMNS).enumerate() {
		let mut cards = Row::new().spacing(app.em);
		for (offset, card) in chunk.iter().enumerate() {
			cards = cards.push(card_view(row_index * COLUMNS + offset, card));
		}
		content = content.push(cards);
	}
	if app.pagination.can_load_more() {
		let mut bt_more = button("Load more");
		if !app.fetching {
			bt_more = bt_more.on_press(Message::LoadMore);
		}
		let bt_top = button("To top").on_press(Message::ScrollToTop);
		content = content.push(row!(bt_more, bt_top).spacing(app.em));
	}
	scrollable(content)
		.id(SCROLLABLE_ID.clone())
		.into()
}

fn card_view(index: usize, card: &Card) -> Element {
	let thumb: Element = match &card.thumb {
		Some(handle) => Image::new(handle.clone())
			.width(Length::Fixed(THUMB_WIDTH))
			.into(),
		None => container(text("loading"))
			.width(Length::Fixed(THUMB_WIDTH))
			.height(Length::Fixed(THUMB_HEIGHT))
			.center_x()
			.center_y()
			.into()
	};
	let stats = row!(
		stat("Likes", card.item.likes),
		stat("Views", card.item.views),
		stat("Comments", card.item.comments),
		stat("Downloads", card.item.downloads)
	)
	.spacing(8);
	Column::new()
		.push(
			button(thumb)
				.style(theme::Button::Text)
				.on_press(Message::OpenViewer(index))
		)
		.push(text(clean_tags(&card.item.tags)).size(14))
		.push(stats)
		.align_items(Alignment::Center)
		.spacing(4)
		.into()
}

fn stat(label: &str, count: u64) -> Element<'static> {
	text(format!("{label} {count}")).size(14).into()
}
