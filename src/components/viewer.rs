use crate::{App, Element, Message};
use iced::{
	widget::{button, container, text, Column, Image},
	Alignment, Length
};

/// full-size takeover shown while the overlay is open
pub fn view(app: &App) -> Element {
	let Some(entry) = app.viewer.current() else {
		return Column::new().into();
	};
	let image: Element = match app.viewer.image() {
		Some(handle) => Image::new(handle.clone()).width(Length::Fill).into(),
		None => text("loading image").into()
	};
	container(
		Column::new()
			.push(button("Close").on_press(Message::CloseViewer))
			.push(image)
			.push(text(&entry.caption))
			.align_items(Alignment::Center)
			.padding(app.em)
			.spacing(app.em / 2)
	)
	.width(Length::Fill)
	.height(Length::Fill)
	.center_x()
	.center_y()
	.into()
}
