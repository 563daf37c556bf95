use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::table::Category;

/// Accent color used for prompts, highlights, and status badges.
pub const ACCENT: Color = Color::Indexed(208);

/// Cell color for a classified value; `Unclassified` keeps the terminal default.
pub fn category_color(category: Category) -> Option<Color> {
    match category {
        Category::Positive => Some(Color::Green),
        Category::Negative => Some(Color::Red),
        Category::Neutral => Some(Color::Gray),
        Category::Unclassified => None,
    }
}

pub fn category_style(category: Category) -> Style {
    match category_color(category) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

/// Produce a dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

/// Dimmed text chunk for inline usage.
pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

/// Apply the accent and bold modifiers for list selections.
pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}
