pub mod gallery;
pub mod notices;
pub mod top_bar;
pub mod viewer;
