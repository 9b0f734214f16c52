pub mod catalog;
pub mod display;
pub mod history;

pub use catalog::CatalogItem;
pub use display::DisplayVideo;
pub use history::HistoryEntry;
