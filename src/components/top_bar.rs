use crate::{App, Element, Message};
use iced::{
	widget::{button, row, text_input},
	Alignment, Length
};

pub fn view(app: &App) -> Element {
	let input = text_input("Search images", &app.search_input)
		.on_input(Message::SearchInput)
		.on_submit(Message::SubmitSearch)
		.width(Length::Fill);
	let bt_search = button("Search").on_press(Message::SubmitSearch);
	row!(input, bt_search)
		.align_items(Alignment::Center)
		.padding(app.em / 4)
		.spacing(app.em / 2)
		.into()
}
