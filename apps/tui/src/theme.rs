//! Color theme for the trainbench panel.

use ratatui::style::{Color, Modifier, Style};

/// Panel color theme.
#[derive(Debug, Clone)]
pub struct PanelTheme {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,

    pub text: Color,
    pub text_muted: Color,

    pub border: Color,
    pub border_active: Color,
}

impl Default for PanelTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl PanelTheme {
    /// Creates the default dark theme.
    pub fn dark() -> Self {
        Self {
            // Cyan (#00D9FF)
            primary: Color::Rgb(0, 217, 255),
            // Green (#10B981)
            success: Color::Rgb(16, 185, 129),
            // Yellow (#F59E0B)
            warning: Color::Rgb(245, 158, 11),
            text: Color::Rgb(238, 238, 238),
            text_muted: Color::Rgb(128, 128, 128),
            border: Color::Rgb(72, 72, 72),
            border_active: Color::Rgb(0, 217, 255),
        }
    }

    /// Border style for a block, highlighted when it holds the focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for the focused line inside a block.
    pub fn selection(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

/// Returns the active theme.
pub fn get_theme() -> PanelTheme {
    PanelTheme::dark()
}
