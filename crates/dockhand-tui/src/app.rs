//! Main TUI application state and logic

use crate::event::{CommandReport, Event, EventHandler};
use crate::ui;
use crate::view_model::ViewModel;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use dockhand_config::GlobalConfig;
use dockhand_core::{
    progress_message, result_message, CommandDispatcher, Intent, RefreshCoordinator,
    RefreshOutcome, RefreshTrigger, LOADING_STATUS,
};
use dockhand_engine::{EngineClient, EngineInfo};
use ratatui::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// What keyboard focus is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    RestartStart,
    Stop,
    Exit,
}

impl Focus {
    pub fn buttons() -> &'static [Focus] {
        &[Focus::RestartStart, Focus::Stop, Focus::Exit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Focus::List => "List",
            Focus::RestartStart => "Restart/Start",
            Focus::Stop => "Stop",
            Focus::Exit => "Exit",
        }
    }

    fn next(self) -> Self {
        match self {
            Focus::List => Focus::RestartStart,
            Focus::RestartStart => Focus::Stop,
            Focus::Stop => Focus::Exit,
            Focus::Exit => Focus::List,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::List => Focus::Exit,
            Focus::RestartStart => Focus::List,
            Focus::Stop => Focus::RestartStart,
            Focus::Exit => Focus::Stop,
        }
    }
}

/// Application state, owned by the UI loop
pub struct App {
    /// Projects, rows and selection
    pub view: ViewModel,
    /// Status line
    pub status: String,
    /// Keyboard focus
    pub focus: Focus,
    /// Should quit
    pub should_quit: bool,
    /// Engine the dashboard is connected to
    pub engine_info: EngineInfo,
    /// When a refresh result was last applied
    pub last_refresh: Option<DateTime<Local>>,
    refresh: RefreshCoordinator,
    dispatcher: CommandDispatcher,
    events: EventHandler,
    /// In-flight lifecycle command, if any
    command: Option<JoinHandle<()>>,
    /// In-flight refresh fetch, if any
    refresh_task: Option<JoinHandle<()>>,
    /// A user refresh was asked for while a cycle was in flight
    pending_refresh: bool,
    /// Finished command still waiting for its follow-up refresh to apply
    after_command: Option<AfterCommand>,
}

/// State carried from a finished command to the refresh that follows it
#[derive(Debug, Clone, Copy)]
struct AfterCommand {
    /// Row to put the cursor back on
    selection: Option<usize>,
    /// The follow-up cycle has been spawned; cycles applied before that
    /// fetched stale data and must not consume this
    started: bool,
}

impl App {
    /// Create a new application reading terminal input
    pub fn new(engine: Arc<dyn EngineClient>, config: &GlobalConfig) -> Self {
        let events = EventHandler::new(config.tick_rate(), config.refresh_interval());
        Self::with_events(engine, config, events)
    }

    /// Create an application without terminal input or timer (for tests)
    pub fn new_for_testing(engine: Arc<dyn EngineClient>) -> Self {
        Self::with_events(engine, &GlobalConfig::default(), EventHandler::detached())
    }

    fn with_events(
        engine: Arc<dyn EngineClient>,
        config: &GlobalConfig,
        events: EventHandler,
    ) -> Self {
        let view = ViewModel::new(config.refresh_interval());
        Self {
            status: view.describe_selection(),
            view,
            focus: Focus::List,
            should_quit: false,
            engine_info: engine.info(),
            last_refresh: None,
            refresh: RefreshCoordinator::new(Arc::clone(&engine)),
            dispatcher: CommandDispatcher::new(engine),
            events,
            command: None,
            refresh_task: None,
            pending_refresh: false,
            after_command: None,
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        self.request_refresh(RefreshTrigger::User);

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            match self.events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    self.send_key(key.code, key.modifiers);
                }
            }
            Event::AutoRefresh => self.request_refresh(RefreshTrigger::Auto),
            Event::Refreshed(outcome) => {
                self.apply_refresh(outcome);
                if self.pending_refresh {
                    self.pending_refresh = false;
                    self.request_refresh(RefreshTrigger::User);
                }
            }
            Event::CommandFinished(report) => self.finish_command(report),
            Event::Tick | Event::Resize(_, _) | Event::Mouse(_) => {}
        }
    }

    /// Handle key press
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match code {
            KeyCode::Char('r') => self.start_command(Intent::Start),
            KeyCode::Char('s') => self.start_command(Intent::Stop),
            KeyCode::Char('e') | KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::F(5) => self.request_refresh(RefreshTrigger::User),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => self.activate(self.focus),
            KeyCode::Char('j') | KeyCode::Down => self.navigate(ViewModel::select_next),
            KeyCode::Char('k') | KeyCode::Up => self.navigate(ViewModel::select_prev),
            KeyCode::Char('g') | KeyCode::Home => self.navigate(ViewModel::select_first),
            KeyCode::Char('G') | KeyCode::End => self.navigate(ViewModel::select_last),
            _ => {}
        }
    }

    /// Trigger the action behind a button
    pub fn activate(&mut self, focus: Focus) {
        match focus {
            Focus::List => {}
            Focus::RestartStart => self.start_command(Intent::Start),
            Focus::Stop => self.start_command(Intent::Stop),
            Focus::Exit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, step: fn(&mut ViewModel)) {
        let before = self.view.selected_index();
        step(&mut self.view);
        if self.view.selected_index() != before {
            self.status = self.view.describe_selection();
        }
    }

    /// Start a refresh cycle unless one is already in flight.
    ///
    /// A refused user request is remembered and retried once the current
    /// cycle has been applied; a refused timer tick is dropped.
    pub fn request_refresh(&mut self, trigger: RefreshTrigger) {
        let tx = self.events.sender();
        let spawned = self.refresh.spawn(trigger, move |outcome| {
            let _ = tx.send(Event::Refreshed(outcome));
        });

        match spawned {
            Some(handle) => {
                self.refresh_task = Some(handle);
                if let Some(after) = self.after_command.as_mut() {
                    after.started = true;
                } else if trigger == RefreshTrigger::User {
                    self.status = LOADING_STATUS.to_string();
                }
            }
            None if trigger == RefreshTrigger::User => self.pending_refresh = true,
            None => tracing::debug!("Auto-refresh skipped, refresh already in flight"),
        }
    }

    fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        self.refresh_task = None;
        if !self.refresh.accept(&outcome) {
            return;
        }

        let message = outcome.status_message();
        let follow_up = match self.after_command.take() {
            Some(after) if after.started => Some(after),
            waiting => {
                self.after_command = waiting;
                None
            }
        };
        // The command result stays up until its own follow-up applies
        let waiting = self.after_command.is_some();

        // A failed fetch leaves the list as it was
        match outcome.result {
            Ok(projects) => {
                self.view.rebuild(projects);
                if let Some(after) = follow_up {
                    self.view.restore_selection(after.selection);
                }
                self.last_refresh = Some(Local::now());
                if !waiting && follow_up.is_none() {
                    self.status = message;
                }
            }
            Err(_) if !waiting => self.status = message,
            Err(_) => {}
        }
    }

    /// Whether a lifecycle command is running
    pub fn command_in_flight(&self) -> bool {
        self.command.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether a refresh cycle or a command is still outstanding
    pub fn is_busy(&self) -> bool {
        self.command.is_some() || self.refresh.is_busy() || self.pending_refresh
    }

    fn start_command(&mut self, intent: Intent) {
        let Some(target) = self.view.current_selection().map(|s| s.to_target()) else {
            return;
        };
        if self.command_in_flight() {
            self.status = "Another command is still running".to_string();
            return;
        }

        self.status = progress_message(intent, &target);
        let selection = self.view.selected_index();
        let dispatcher = self.dispatcher.clone();
        let tx = self.events.sender();

        self.command = Some(tokio::spawn(async move {
            let success = dispatcher.execute(intent, &target).await;
            let _ = tx.send(Event::CommandFinished(CommandReport {
                intent,
                target,
                success,
                selection,
            }));
        }));
    }

    fn finish_command(&mut self, report: CommandReport) {
        self.command = None;
        self.status = result_message(report.intent, &report.target, report.success);
        self.after_command = Some(AfterCommand {
            selection: report.selection,
            started: false,
        });
        self.request_refresh(RefreshTrigger::User);
    }

    /// Wait for the next event and handle it
    pub async fn step(&mut self) -> bool {
        match self.events.next().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Handle posted events until no refresh or command is outstanding
    pub async fn settle(&mut self) {
        while self.is_busy() {
            if !self.step().await {
                break;
            }
        }
    }

    /// Abort outstanding background work
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.command.take() {
            handle.abort();
        }
        if let Some(handle) = self.refresh_task.take() {
            handle.abort();
        }
    }
}
