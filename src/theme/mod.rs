use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod glyphs;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, parse_hex, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub tab_active: Style,
    pub tab_inactive: Style,

    pub entry_id: Style,
    pub field_label: Style,
    pub field_value: Style,
    pub field_focus: Style,
    pub field_hint: Style,

    pub command: Style,
    pub command_bg: Style,
    pub command_error: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub header_logo: Style,
    pub header_stats: Style,
    pub header_active: Style,
    pub header_warn: Style,
    pub header_item: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer_group_name: Style,
    pub footer: Style,

    pub list_selected: Style,
    pub list_item: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    CatppuccinMocha,
    CatppuccinLatte,
    Nord,
    Gruvbox,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::CatppuccinLatte => "Catppuccin (Latte, light)",
            PaletteType::Nord => "Nord",
            PaletteType::Gruvbox => "Gruvbox",
        }
    }

    #[must_use]
    pub fn all() -> &'static [PaletteType] {
        &[
            PaletteType::CatppuccinMocha,
            PaletteType::CatppuccinLatte,
            PaletteType::Nord,
            PaletteType::Gruvbox,
        ]
    }
}

impl Default for PaletteType {
    fn default() -> Self {
        PaletteType::CatppuccinMocha
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::CatppuccinLatte => Self::from_palette(&catppuccin::CATPPUCCIN_LATTE),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
            PaletteType::Gruvbox => Self::from_palette(&gruvbox::GRUVBOX),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            tab_active: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().bg(p.surface0).fg(p.subtext1),

            entry_id: Style::default().fg(p.mauve).add_modifier(Modifier::BOLD),
            field_label: Style::default().fg(p.subtext0),
            field_value: Style::default().fg(p.text),
            field_focus: Style::default()
                .bg(p.surface1)
                .fg(p.peach)
                .add_modifier(Modifier::BOLD),
            field_hint: Style::default().fg(p.overlay0).add_modifier(Modifier::ITALIC),

            command: Style::default().fg(p.green).add_modifier(Modifier::BOLD),
            command_bg: Style::default().bg(dim_color(p.green, 0.18)),
            command_error: Style::default().fg(p.red).add_modifier(Modifier::BOLD),

            status_ready: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            header_logo: Style::default()
                .bg(p.teal)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_stats: Style::default().bg(p.mantle).fg(p.subtext1),
            header_active: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header: Style::default().bg(p.base).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.base).fg(p.text),
            footer_group_name: Style::default().fg(p.subtext0).add_modifier(Modifier::DIM),
            footer: Style::default().bg(p.crust).fg(p.subtext0),

            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.text),
            dimmed: Style::default().fg(p.overlay1).add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::default())
    }
}
