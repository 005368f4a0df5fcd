use std::fmt;
#[cfg(test)]
use std::sync::Mutex;

/// A transient message shown to the user after an action settles.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn success(message: &str) -> Notification {
        Notification::Success(String::from(message))
    }

    pub fn error(message: &str) -> Notification {
        Notification::Error(String::from(message))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notification::Success(m) => write!(f, "[ok] {m}"),
            Notification::Error(m) => write!(f, "[error] {m}"),
        }
    }
}

pub trait Notifier {
    fn notify(&self, note: Notification);
}

/// Prints notifications to standard out.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, note: Notification) {
        match &note {
            Notification::Success(m) => log::debug!("notify success: {m}"),
            Notification::Error(m) => log::debug!("notify error: {m}"),
        }
        println!("{note}");
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier::default()
    }

    pub fn notes(&self) -> Vec<Notification> {
        self.notes.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notes.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, note: Notification) {
        self.notes.lock().unwrap().push(note);
    }
}
