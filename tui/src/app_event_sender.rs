use std::sync::mpsc::Sender;

use crate::app_event::AppEvent;

#[derive(Clone, Debug)]
pub struct AppEventSender {
    app_event_tx: Sender<AppEvent>,
}

impl AppEventSender {
    pub fn new(app_event_tx: Sender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event to the app event channel. If it fails, we swallow the
    /// error and log it.
    pub fn send(&self, event: AppEvent) -> bool {
        match self.app_event_tx.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("failed to send event: {e}");
                false
            }
        }
    }
}
