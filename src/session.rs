use std::rc::Rc;

use tracing::error;

use crate::error::Result;
use crate::selection::{CustomRoutine, Favorites, SubmissionLog};
use crate::storage::KeyValueStore;
use crate::visits::VisitTracker;

/// Persisted user state shared by every page, plus the queue of alert
/// messages waiting to be shown.
pub struct Session {
    pub favorites: Favorites,
    pub routine: CustomRoutine,
    pub submissions: SubmissionLog,
    pub visits: VisitTracker,
    notices: Vec<String>,
}

impl Session {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        Session {
            favorites: Favorites::load(store.clone()),
            routine: CustomRoutine::load(store.clone()),
            submissions: SubmissionLog::load(store.clone()),
            visits: VisitTracker::new(store),
            notices: Vec::new(),
        }
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Alerts with the outcome of a store mutation. Write failures are
    /// logged and shown in place of the success message.
    pub fn report(&mut self, outcome: Result<String>) {
        match outcome {
            Ok(message) => self.alert(message),
            Err(e) => {
                error!("could not save changes: {}", e);
                self.alert(format!("Could not save your changes: {}", e));
            }
        }
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }
}
