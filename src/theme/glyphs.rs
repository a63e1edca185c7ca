pub const LOGO: &str = "󰥔";
pub const SEP_RIGHT: &str = "";
pub const CLIPBOARD: &str = "󰅌";
pub const STAR: &str = "★";
pub const SELECTED: &str = "▸ ";
pub const SWATCH: &str = "██████";
