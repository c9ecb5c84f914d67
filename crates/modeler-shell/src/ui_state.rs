use chrono::{DateTime, Local};
use modeler_bridge::EventKind;
use std::collections::VecDeque;

use crate::status_manager::StatusManager;

/// One line of the event log pane.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogEntry {
    pub at: DateTime<Local>,
    pub kind: EventKind,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct UIState {
    pub status_manager: StatusManager,
    pub show_help: bool,
    pub should_quit: bool,
    pub save_in_flight: bool,
    /// Last width reported by the properties panel this session.
    pub panel_width: Option<u32>,
    event_log: VecDeque<EventLogEntry>,
    event_log_capacity: usize,
    inner_event_count: usize,
    redraw_requested: bool,
}

impl UIState {
    pub fn new(event_log_capacity: usize) -> Self {
        Self {
            status_manager: StatusManager::new(),
            show_help: false,
            should_quit: false,
            save_in_flight: false,
            panel_width: None,
            event_log: VecDeque::with_capacity(event_log_capacity),
            event_log_capacity: event_log_capacity.max(1),
            inner_event_count: 0,
            redraw_requested: false,
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_help_shown(&self) -> bool {
        self.show_help
    }

    pub fn hide_help(&mut self) {
        self.show_help = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Append to the event log, dropping the oldest entry once full.
    pub fn log_event(&mut self, kind: EventKind, summary: impl Into<String>) {
        if self.event_log.len() == self.event_log_capacity {
            self.event_log.pop_front();
        }
        self.event_log.push_back(EventLogEntry {
            at: Local::now(),
            kind,
            summary: summary.into(),
        });
    }

    /// Change the log bound, dropping the oldest entries that no longer fit.
    pub fn set_event_log_capacity(&mut self, capacity: usize) {
        self.event_log_capacity = capacity.max(1);
        while self.event_log.len() > self.event_log_capacity {
            self.event_log.pop_front();
        }
    }

    pub fn event_log(&self) -> impl DoubleEndedIterator<Item = &EventLogEntry> {
        self.event_log.iter()
    }

    pub fn event_log_len(&self) -> usize {
        self.event_log.len()
    }

    /// Diagram library events are too chatty for the log; they are counted.
    pub fn count_inner_event(&mut self) {
        self.inner_event_count += 1;
    }

    pub fn inner_event_count(&self) -> usize {
        self.inner_event_count
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn update_status(&mut self) {
        self.status_manager.update();
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(100)
    }
}
