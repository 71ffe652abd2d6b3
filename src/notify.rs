use std::time::Duration;

pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	Success,
	Failure,
	Info
}

#[derive(Debug, Clone)]
pub struct Notice {
	pub id: u64,
	pub kind: Kind,
	pub text: String
}

#[derive(Debug, Default)]
/// Fire-and-forget toast state. Every push hands back an id, the caller
/// schedules the matching dismiss.
pub struct Notifications {
	next_id: u64,
	notices: Vec<Notice>
}

impl Notifications {
	pub fn success(&mut self, text: String) -> u64 {
		self.push(Kind::Success, text)
	}

	pub fn failure(&mut self, text: String) -> u64 {
		self.push(Kind::Failure, text)
	}

	pub fn info(&mut self, text: String) -> u64 {
		self.push(Kind::Info, text)
	}

	fn push(&mut self, kind: Kind, text: String) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.notices.push(Notice { id, kind, text });
		id
	}

	/// dropping an already dismissed id is fine
	pub fn dismiss(&mut self, id: u64) {
		self.notices.retain(|notice| notice.id != id);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Notice> {
		self.notices.iter()
	}
}
