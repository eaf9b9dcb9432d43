//! Compact panel rendering.

use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use trainbench_training::{CompactResultView, Density, ModelChoice, SubmitControl};

use crate::alert::render_alert;
use crate::app::{App, Focus};
use crate::theme::{PanelTheme, get_theme};

const HELP: &str = "Tab/↑↓ focus · ←→/1-5 model · Enter select/train · Esc quit";

/// Rows taken by the header, the target/model row, the train control and the help line.
const FIXED_ROWS: u16 = 1 + 3 + 3 + 1;
/// Rows the results block keeps before the parameter list may grow.
const MIN_RESULTS_ROWS: u16 = 8;

/// Draws the whole panel, with the alert on top when one is open.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = get_theme();
    let area = frame.area();

    let wanted = app.workflow.hyperparams().len().max(1) as u16 + 2;
    let room = area.height.saturating_sub(FIXED_ROWS + MIN_RESULTS_ROWS).max(3);
    let params_height = wanted.min(room);

    let [header_area, form_area, params_area, train_area, results_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(params_height),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);
    let [target_area, model_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(form_area);

    render_header(frame, header_area, app, &theme);
    render_target(frame, target_area, app, &theme);
    render_models(frame, model_area, app, &theme);
    render_params(frame, params_area, app, &theme);
    render_train(frame, train_area, app, &theme);
    render_results(frame, results_area, app, &theme);
    frame.render_widget(Paragraph::new(HELP).style(theme.muted()), help_area);

    if let Some(message) = app.alerts.message() {
        render_alert(frame, area, message);
    }
}

/// Rows of a `len`-row list shown in `visible` rows, scrolled so `focused` stays in view.
pub fn visible_window(len: usize, visible: usize, focused: Option<usize>) -> Range<usize> {
    let visible = visible.max(1);
    if len <= visible {
        return 0..len;
    }
    let start = match focused {
        Some(i) if i >= visible => (i + 1 - visible).min(len - visible),
        _ => 0,
    };
    start..start + visible
}

fn block<'a>(title: impl Into<Line<'a>>, focused: bool, theme: &PanelTheme) -> Block<'a> {
    Block::default().borders(Borders::ALL).border_style(theme.border_style(focused)).title(title)
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let session = match app.workflow.session_id() {
        Some(id) => Span::styled(id, Style::default().fg(theme.success)),
        None => Span::styled("none", Style::default().fg(theme.warning)),
    };
    let model = match app.workflow.model() {
        Some(model) => Span::styled(model.as_str(), Style::default().fg(theme.primary)),
        None => Span::styled("none", Style::default().fg(theme.warning)),
    };
    let line = Line::from(vec![
        Span::styled("trainbench", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled("  session: ", theme.muted()),
        session,
        Span::styled("  model: ", theme.muted()),
        model,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_target(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let focused = app.focus == Focus::Target;
    let target = app.workflow.target();
    let text = if target.is_empty() && !focused {
        Span::styled("empty: last column", theme.muted())
    } else if focused {
        Span::styled(format!("{target}▏"), Style::default().fg(theme.text))
    } else {
        Span::styled(target.to_string(), Style::default().fg(theme.text))
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(block(" Target column ", focused, theme)), area);
}

/// One model at a time: the highlighted entry between ‹ › with its position.
fn render_models(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let focused = app.focus == Focus::Model;
    let count = ModelChoice::ALL.len();
    let highlighted = ModelChoice::ALL[app.model_cursor.min(count - 1)];
    let is_selected = app.workflow.model() == Some(highlighted);

    let marker = if is_selected { "●" } else { "○" };
    let style = if focused {
        theme.selection()
    } else if is_selected {
        Style::default().fg(theme.primary)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled("‹ ", theme.muted()),
        Span::styled(format!("{marker} {}", highlighted.as_str()), style),
        Span::styled(" ›", theme.muted()),
        Span::styled(format!("  {}/{count}", app.model_cursor + 1), theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block(" Model ", focused, theme)), area);
}

fn render_params(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let focused_index = match app.focus {
        Focus::Param(i) => Some(i),
        _ => None,
    };
    let focused = focused_index.is_some();

    let params = app.workflow.hyperparams();
    if params.is_empty() {
        let paragraph = Paragraph::new(Span::styled("No hyperparameters", theme.muted()))
            .block(block(" Hyperparameters ", focused, theme));
        frame.render_widget(paragraph, area);
        return;
    }

    let window = visible_window(params.len(), area.height.saturating_sub(2) as usize, focused_index);
    let title = if window.len() < params.len() {
        format!(" Hyperparameters {}-{}/{} ", window.start + 1, window.end, params.len())
    } else {
        " Hyperparameters ".to_string()
    };

    let lines: Vec<Line> = params
        .iter()
        .enumerate()
        .skip(window.start)
        .take(window.len())
        .map(|(i, (key, value))| {
            let style = if focused_index == Some(i) { theme.selection() } else { Style::default().fg(theme.text) };
            Line::from(vec![
                Span::styled(format!("{key} = "), theme.muted()),
                Span::styled(value.field_text(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block(title, focused, theme)), area);
}

fn render_train(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let focused = app.focus == Focus::Train;
    let control = SubmitControl::new(Density::Compact, app.workflow.is_loading());
    let style = if !control.enabled {
        theme.muted()
    } else if focused {
        theme.selection()
    } else {
        Style::default().fg(theme.primary)
    };
    let paragraph = Paragraph::new(Span::styled(control.label, style))
        .alignment(Alignment::Center)
        .block(block("", focused, theme));
    frame.render_widget(paragraph, area);
}

/// Report details on the left, scalar metrics on the right.
fn render_results(frame: &mut Frame, area: Rect, app: &App, theme: &PanelTheme) {
    let results = block(" Results ", false, theme);

    let Some(report) = app.workflow.report() else {
        let paragraph = Paragraph::new(Span::styled(CompactResultView::NO_RESULTS, theme.muted())).block(results);
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = results.inner(area);
    frame.render_widget(results, area);
    let [info_area, metrics_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

    let view = CompactResultView::new(report);
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label}: "), theme.muted()),
            Span::styled(value.to_string(), Style::default().fg(theme.text)),
        ])
    };

    let mut info = vec![
        field("Model", &view.model_name),
        field("Problem type", &view.problem_type),
        field("Target", &view.target_label),
        field("Model path", &view.model_path),
    ];
    if let Some(file) = &view.artifact_file {
        info.push(field("Artifact", file));
    }
    if view.download_url.is_some() {
        let style = if app.focus == Focus::Download { theme.selection() } else { Style::default().fg(theme.success) };
        info.push(Line::from(Span::styled("[ 📥 Download model ]", style)));
    }
    frame.render_widget(Paragraph::new(info), info_area);

    let mut metrics =
        vec![Line::from(Span::styled("Metrics", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)))];
    metrics.extend(
        view.metric_lines()
            .into_iter()
            .map(|metric| Line::from(Span::styled(metric, Style::default().fg(theme.text)))),
    );
    frame.render_widget(Paragraph::new(metrics), metrics_area);
}
