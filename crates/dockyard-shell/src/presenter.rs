//! User-facing collaborators of the shell.

use std::sync::Mutex;

use dockyard_gateway::AlertChoice;
use tracing::info;

/// Shows modal alert panels.
pub trait AlertPresenter: Send {
    fn run_alert(
        &self,
        title: &str,
        message: &str,
        buttons: &[&str],
    ) -> AlertChoice;
}

/// Answers every alert with a fixed choice.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessAlerts {
    answer: AlertChoice,
}

impl HeadlessAlerts {
    pub fn new(answer: AlertChoice) -> Self {
        Self { answer }
    }
}

impl Default for HeadlessAlerts {
    /// Picks the alternate button.
    fn default() -> Self {
        Self::new(AlertChoice::Alternate)
    }
}

impl AlertPresenter for HeadlessAlerts {
    fn run_alert(&self, title: &str, message: &str, buttons: &[&str]) -> AlertChoice {
        info!(title, message, ?buttons, answer = ?self.answer, "alert answered without a display");
        self.answer
    }
}

/// Brings a running application forward on the shell's behalf.
pub trait AppActivator: Send {
    fn activate(&self, name: &str) -> bool;
}

/// Records activation requests.
#[derive(Debug, Default)]
pub struct LoggingActivator {
    activated: Mutex<Vec<String>>,
}

impl LoggingActivator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activated(&self) -> Vec<String> {
        self.activated
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

impl AppActivator for LoggingActivator {
    fn activate(&self, name: &str) -> bool {
        info!(name, "activate application");
        match self.activated.lock() {
            Ok(mut names) => {
                names.push(name.to_string());
                true
            }
            Err(_) => false,
        }
    }
}

impl<T: AppActivator + Sync> AppActivator for std::sync::Arc<T> {
    fn activate(&self, name: &str) -> bool {
        (**self).activate(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_alerts_default_to_cancel() {
        let alerts = HeadlessAlerts::default();
        assert_eq!(
            alerts.run_alert("Kill Application", "sure?", &["Kill", "Cancel"]),
            AlertChoice::Alternate
        );
        let alerts = HeadlessAlerts::new(AlertChoice::Default);
        assert_eq!(alerts.run_alert("t", "m", &["OK"]), AlertChoice::Default);
    }

    #[test]
    fn logging_activator_records_names() {
        let activator = LoggingActivator::new();
        assert!(activator.activate("Ink"));
        assert!(activator.activate("TextEdit"));
        assert_eq!(activator.activated(), vec!["Ink", "TextEdit"]);
    }
}
