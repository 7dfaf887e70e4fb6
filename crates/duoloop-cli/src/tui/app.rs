//! Desk application state for the TUI.
//!
//! Holds what the renderer needs beyond the session itself: the two
//! editor buffers, the explicitly focused slot, the log buffer and the
//! transient error banner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use duoloop_core::Slot;
use log::Level;

use super::editor::EditorBuffer;

const MAX_LOG_ENTRIES: usize = 100;

/// How long the error banner stays on screen.
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(5);

/// One line in the log panel.
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

struct ErrorBanner {
    message: String,
    shown_at: Instant,
}

/// TUI-side state of the desk.
pub struct DeskApp {
    editors: [EditorBuffer; 2],
    pub focused: Slot,
    pub log_buffer: VecDeque<LogEntry>,
    banner: Option<ErrorBanner>,
    pub should_quit: bool,
}

impl DeskApp {
    /// Create the app with both panes seeded from the session's source
    /// texts.
    pub fn new(text_a: &str, text_b: &str) -> Self {
        Self {
            editors: [EditorBuffer::from_text(text_a), EditorBuffer::from_text(text_b)],
            focused: Slot::A,
            log_buffer: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            banner: None,
            should_quit: false,
        }
    }

    pub fn editor(&self, slot: Slot) -> &EditorBuffer {
        &self.editors[slot.index()]
    }

    pub fn editor_mut(&mut self, slot: Slot) -> &mut EditorBuffer {
        &mut self.editors[slot.index()]
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.other();
    }

    /// Show a desk-level error in the banner. Replaces any current
    /// banner and restarts the display interval.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.banner = Some(ErrorBanner {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.message.as_str())
    }

    /// Advance time-based state: the banner auto-dismisses after its
    /// fixed display interval.
    pub fn tick(&mut self) {
        self.expire_banner(Instant::now());
    }

    fn expire_banner(&mut self, now: Instant) {
        if let Some(banner) = &self.banner {
            if now.duration_since(banner.shown_at) >= ERROR_BANNER_TTL {
                self.banner = None;
            }
        }
    }

    /// Append a log line, dropping the oldest past the cap.
    pub fn push_log(&mut self, level: Level, message: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.log_buffer.push_back(LogEntry {
            timestamp,
            level,
            message,
        });
        if self.log_buffer.len() > MAX_LOG_ENTRIES {
            self.log_buffer.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggles_between_slots() {
        let mut app = DeskApp::new("", "");
        assert_eq!(app.focused, Slot::A);
        app.focus_next();
        assert_eq!(app.focused, Slot::B);
        app.focus_next();
        assert_eq!(app.focused, Slot::A);
    }

    #[test]
    fn test_banner_expires_after_its_interval() {
        let mut app = DeskApp::new("", "");
        app.show_error("no audio permission");
        let shown = Instant::now();

        app.expire_banner(shown + ERROR_BANNER_TTL - Duration::from_secs(1));
        assert_eq!(app.banner(), Some("no audio permission"));

        app.expire_banner(shown + ERROR_BANNER_TTL + Duration::from_secs(1));
        assert_eq!(app.banner(), None);
    }

    #[test]
    fn test_new_error_restarts_the_banner() {
        let mut app = DeskApp::new("", "");
        app.show_error("first");
        app.show_error("second");
        assert_eq!(app.banner(), Some("second"));
    }

    #[test]
    fn test_log_buffer_is_capped() {
        let mut app = DeskApp::new("", "");
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            app.push_log(Level::Info, format!("line {i}"));
        }
        assert_eq!(app.log_buffer.len(), MAX_LOG_ENTRIES);
        assert_eq!(app.log_buffer.front().unwrap().message, "line 10");
    }
}
