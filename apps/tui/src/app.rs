//! Panel state and key handling.
//!
//! Network calls run on spawned tasks and come back as [`AppEvent`]s over an
//! unbounded channel; the draw loop drains it with [`App::drain_events`].

use std::io;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, warn};
use trainbench_training::{
    BackendResult, FetchTicket, HyperparameterMap, ModelChoice, Notice, SessionSource, TrainingBackend,
    TrainingReport, TrainingWorkflow,
};

use crate::alert::AlertManager;

/// Opens a download link. Replaced in tests.
pub type Launcher = Box<dyn Fn(&str) -> io::Result<()> + Send>;

/// Results delivered by background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Defaults {
        ticket: FetchTicket,
        outcome: BackendResult<HyperparameterMap>,
    },
    Trained(BackendResult<TrainingReport>),
}

/// The control holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Target,
    Model,
    Param(usize),
    Train,
    Download,
}

pub struct App {
    pub should_quit: bool,
    pub workflow: TrainingWorkflow,
    pub focus: Focus,
    /// Highlighted entry in the model selector.
    pub model_cursor: usize,
    pub alerts: AlertManager,
    backend: Arc<dyn TrainingBackend>,
    launcher: Launcher,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(session: Arc<dyn SessionSource>, backend: Arc<dyn TrainingBackend>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            workflow: TrainingWorkflow::new(session),
            focus: Focus::Model,
            model_cursor: 0,
            alerts: AlertManager::new(),
            backend,
            launcher: Box::new(|url: &str| open::that(url)),
            events_tx,
            events_rx,
        }
    }

    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Focusable controls in display order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Target, Focus::Model];
        order.extend((0..self.workflow.hyperparams().len()).map(Focus::Param));
        order.push(Focus::Train);
        if self.download_url().is_some() {
            order.push(Focus::Download);
        }
        order
    }

    pub fn download_url(&self) -> Option<&str> {
        self.workflow.report().and_then(TrainingReport::download_url)
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.alerts.is_open() {
            self.alerts.handle_key(key);
            return;
        }

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
            KeyCode::Enter => self.activate(),
            _ => match self.focus {
                Focus::Model => self.handle_model_key(key),
                Focus::Target => {
                    edit_text(self.workflow.target_mut(), key);
                }
                Focus::Param(index) => self.handle_param_key(index, key),
                Focus::Train | Focus::Download => {}
            },
        }
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.focus = order[next];
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Model => self.select_model(ModelChoice::ALL[self.model_cursor]),
            Focus::Train => self.submit(),
            Focus::Download => self.open_download(),
            Focus::Target | Focus::Param(_) => self.move_focus(1),
        }
    }

    fn handle_model_key(&mut self, key: KeyCode) {
        let count = ModelChoice::ALL.len();
        match key {
            KeyCode::Left => self.model_cursor = (self.model_cursor + count - 1) % count,
            KeyCode::Right => self.model_cursor = (self.model_cursor + 1) % count,
            KeyCode::Char(c) => {
                if let Some(index) = c.to_digit(10).map(|d| d as usize).filter(|d| (1..=count).contains(d)) {
                    self.model_cursor = index - 1;
                    self.select_model(ModelChoice::ALL[index - 1]);
                }
            }
            _ => {}
        }
    }

    fn handle_param_key(&mut self, index: usize, key: KeyCode) {
        let Some(name) = self.workflow.hyperparams().key_at(index).map(str::to_string) else {
            return;
        };
        let mut text = self
            .workflow
            .hyperparams()
            .get(&name)
            .map(|value| value.field_text())
            .unwrap_or_default();
        if edit_text(&mut text, key) {
            self.workflow.edit_param(&name, text);
        }
    }

    /// Selects a model and fetches its defaults in the background.
    pub fn select_model(&mut self, model: ModelChoice) {
        self.model_cursor = model.index();
        let Some(ticket) = self.workflow.select_model(model) else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.default_hyperparameters(ticket.model()).await;
            let _ = tx.send(AppEvent::Defaults { ticket, outcome });
        });
    }

    /// Starts a training submission in the background, or shows the notice
    /// explaining why it cannot start.
    pub fn submit(&mut self) {
        let request = match self.workflow.begin_submit() {
            Ok(request) => request,
            Err(Notice::InProgress) => {
                debug!("Train ignored while a submission is in flight");
                return;
            }
            Err(notice) => {
                self.alerts.show(notice.to_string());
                return;
            }
        };

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.train(&request).await;
            let _ = tx.send(AppEvent::Trained(outcome));
        });
    }

    fn open_download(&mut self) {
        let Some(url) = self.download_url().map(str::to_string) else {
            return;
        };
        if let Err(e) = (self.launcher)(&url) {
            warn!(url = %url, error = %e, "Failed to open download link");
            self.alerts.show(format!("Could not open {url}: {e}"));
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Defaults { ticket, outcome } => {
                self.workflow.apply_defaults(ticket, outcome);
            }
            AppEvent::Trained(outcome) => {
                if let Err(notice) = self.workflow.finish_submit(outcome) {
                    self.alerts.show(notice.to_string());
                }
            }
        }
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Train;
        }
    }

    /// Applies every event that has already arrived.
    pub fn drain_events(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Waits for the next background result and applies it.
    pub async fn next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }
}

/// Applies an editing key to a text field. Returns whether the text changed.
fn edit_text(text: &mut String, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            text.push(c);
            true
        }
        KeyCode::Backspace => text.pop().is_some(),
        _ => false,
    }
}
