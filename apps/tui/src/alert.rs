//! Modal alert for workflow notices.

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Holds at most one alert message.
#[derive(Debug, Default)]
pub struct AlertManager {
    current: Option<String>,
}

impl AlertManager {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Shows an alert, replacing any open one.
    pub fn show(&mut self, message: impl Into<String>) {
        self.current = Some(message.into());
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Handles a key while the alert is open. `Enter` and `Esc` dismiss it;
    /// every other key is swallowed. Returns whether the alert was dismissed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter | KeyCode::Esc if self.is_open() => {
                self.close();
                true
            }
            _ => false,
        }
    }
}

/// Renders the alert centered over `area`.
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let theme = crate::theme::get_theme();

    let width = 56.min(area.width);
    let height = 7.min(area.height);
    let alert_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, alert_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning))
        .title(" Notice ");

    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled("Enter/Esc to dismiss", theme.muted())),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, alert_area);
}
