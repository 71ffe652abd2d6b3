pub const PAGE_SIZE: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// no active query
	Idle,
	/// at least one page rendered, more may exist
	HasResults,
	/// last page rendered, only a new submit leaves this state
	Exhausted
}

#[derive(Debug)]
/// Owns the active query, the page counter and the total hit count.
/// `total_hits` is only meaningful after [`record_page`] ran for the
/// active query; before that it is a stale placeholder.
///
/// [`record_page`]: Self::record_page
pub struct Pagination {
	query: String,
	page: u32,
	total_hits: u32,
	page_size: u32,
	phase: Phase
}

impl Pagination {
	pub fn new(page_size: u32) -> Self {
		assert!(page_size > 0);
		Self {
			query: String::new(),
			page: 1,
			total_hits: 0,
			page_size,
			phase: Phase::Idle
		}
	}

	/// begin a new search: back to page 1, stale totals discarded
	pub fn start(&mut self, query: String) {
		self.query = query;
		self.page = 1;
		self.total_hits = 0;
		self.phase = Phase::Idle;
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn total_hits(&self) -> u32 {
		self.total_hits
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// whether the load-more and to-top affordances should be shown
	pub fn can_load_more(&self) -> bool {
		self.phase == Phase::HasResults
	}

	/// step to the next page, before the load-more fetch goes out
	pub fn advance(&mut self) {
		debug_assert!(self.can_load_more());
		self.page += 1;
	}

	/// Account for a rendered page and decide whether more pages exist.
	/// An empty first page means the query matched nothing and the
	/// counter must not advance.
	pub fn record_page(&mut self, total_hits: u32, item_count: usize) -> Phase {
		if item_count == 0 {
			self.phase = if self.page == 1 {
				Phase::Idle
			} else {
				Phase::Exhausted
			};
			return self.phase;
		}
		self.total_hits = total_hits;
		self.phase = if self.page >= self.final_page() {
			Phase::Exhausted
		} else {
			Phase::HasResults
		};
		self.phase
	}

	/// last page index, a partial page still counts as the end
	fn final_page(&self) -> u32 {
		self.total_hits.div_ceil(self.page_size).max(1)
	}
}
