pub mod clipboard;
pub mod console;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod models;
pub mod params;
pub mod template;
