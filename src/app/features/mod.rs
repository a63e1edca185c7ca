pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod navigation;
pub mod output;
pub mod params;
pub mod ui;
