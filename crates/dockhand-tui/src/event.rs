//! Terminal and background event handling
//!
//! Everything that changes what is on screen arrives here as an [`Event`]:
//! terminal input, the auto-refresh timer, and results posted by background
//! refresh and command tasks. The UI loop is the only consumer.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use dockhand_core::{Intent, RefreshOutcome, Target};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A finished lifecycle command
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub intent: Intent,
    pub target: Target,
    pub success: bool,
    /// Row selected when the command was issued
    pub selection: Option<usize>,
}

/// Events consumed by the UI loop
#[derive(Debug)]
pub enum Event {
    /// Terminal tick (no input within the tick rate)
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Auto-refresh timer fired
    AutoRefresh,
    /// A refresh fetch finished and is ready to apply
    Refreshed(RefreshOutcome),
    /// A lifecycle command finished
    CommandFinished(CommandReport),
}

/// Owns the event channel and the tasks feeding it.
///
/// Dropping the handler stops the input reader and the auto-refresh timer.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventHandler {
    /// Start reading terminal input and firing the auto-refresh timer
    pub fn new(tick_rate: Duration, refresh_interval: Duration) -> Self {
        let mut handler = Self::detached();

        let tx = handler.tx.clone();
        let stop = Arc::clone(&handler.stop);
        handler.tasks.push(tokio::task::spawn_blocking(move || {
            read_input(tx, stop, tick_rate)
        }));

        let tx = handler.tx.clone();
        handler.tasks.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; startup loads on its own
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Event::AutoRefresh).is_err() {
                    break;
                }
            }
        }));

        handler
    }

    /// Channel only, with no input reader or timer
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rx,
            tx,
            stop: Arc::new(AtomicBool::new(false)),
            tasks: Vec::new(),
        }
    }

    /// Sender for background tasks posting results to the UI loop
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn read_input(tx: mpsc::UnboundedSender<Event>, stop: Arc<AtomicBool>, tick_rate: Duration) {
    while !stop.load(Ordering::SeqCst) {
        let event = if event::poll(tick_rate).unwrap_or(false) {
            match event::read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(CrosstermEvent::Mouse(mouse)) => Event::Mouse(mouse),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("Terminal input error: {}", e);
                    continue;
                }
            }
        } else {
            Event::Tick
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
