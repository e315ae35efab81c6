use console::Style;
use std::fmt::Write;

use crate::view::{AgentCard, DirectoryView, StatusBadge, Tone};
use crate::{EMPTY_LABEL, INTRO, TITLE, WELCOME};

/// Writes a [`DirectoryView`] as terminal text.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    colors: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(console::colors_enabled())
    }
}

impl TextRenderer {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn style(&self) -> Style {
        Style::new().force_styling(self.colors)
    }

    /// Header, intro and the view body.
    pub fn render_page(&self, view: &DirectoryView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.style().bold().apply_to(TITLE));
        let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.style().bold().apply_to(WELCOME));
        let _ = writeln!(out, "{}", self.style().dim().apply_to(INTRO));
        let _ = writeln!(out);
        out.push_str(&self.render_view(view));
        out
    }

    pub fn render_view(&self, view: &DirectoryView) -> String {
        match view {
            DirectoryView::Blank => String::new(),
            DirectoryView::Progress { label } => {
                format!("{}\n", self.style().dim().apply_to(label))
            }
            DirectoryView::Alert { message } => {
                format!("{}\n", self.style().red().apply_to(format!("! {message}")))
            }
            DirectoryView::Cards { cards } if cards.is_empty() => {
                format!("{}\n", self.style().dim().apply_to(EMPTY_LABEL))
            }
            DirectoryView::Cards { cards } => cards
                .iter()
                .map(|card| self.render_card(card))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn render_card(&self, card: &AgentCard) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  {}",
            self.style().bold().apply_to(&card.title),
            self.badge(&card.badge)
        );
        if !card.description.is_empty() {
            let _ = writeln!(out, "  {}", card.description);
        }
        if let Some(last_active) = &card.last_active {
            let _ = writeln!(out, "  {}", self.style().dim().apply_to(last_active));
        }
        out
    }

    fn badge(&self, badge: &StatusBadge) -> String {
        let style = match badge.tone {
            Tone::Neutral => self.style().white(),
            Tone::Info => self.style().blue(),
            Tone::Success => self.style().green(),
            Tone::Danger => self.style().red(),
        };
        style.apply_to(format!("[{}]", badge.label)).to_string()
    }
}
