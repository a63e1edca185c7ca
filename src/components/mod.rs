pub mod catalog_list;
pub mod detail_panel;
pub mod footer;
pub mod header;
pub mod modals;
pub mod output_bar;
