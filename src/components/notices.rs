use crate::{notify::Kind, App, Element};
use iced::{
	theme,
	widget::{text, Column},
	Color
};

fn color(kind: Kind) -> Color {
	match kind {
		Kind::Success => Color::from_rgb(0.4, 0.8, 0.4),
		Kind::Failure => Color::from_rgb(0.9, 0.4, 0.4),
		Kind::Info => Color::from_rgb(0.5, 0.7, 0.9)
	}
}

pub fn view(app: &App) -> Element {
	let mut list = Column::new().padding(app.em / 4).spacing(app.em / 4);
	for notice in app.notices.iter() {
		list = list.push(text(&notice.text).style(theme::Text::Color(color(notice.kind))));
	}
	list.into()
}
