use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::storage::{KeyValueStore, Repository};

pub const LAST_VISIT_KEY: &str = "discover-last-visit";

/// Remembers when the discover view was last opened.
pub struct VisitTracker {
    repo: Repository<Option<i64>>,
}

impl VisitTracker {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        VisitTracker {
            repo: Repository::new(store, LAST_VISIT_KEY),
        }
    }

    /// Returns the greeting for this visit and stores `now` as the last one.
    pub fn record_visit(&self, now: DateTime<Utc>) -> Result<String> {
        let message = visit_message(self.last_visit(), now);
        self.repo.save(&Some(now.timestamp_millis()))?;
        Ok(message)
    }

    pub fn last_visit(&self) -> Option<DateTime<Utc>> {
        self.repo
            .load()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

pub fn visit_message(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last else {
        return "Welcome! Let us know if you have any questions.".to_string();
    };

    let elapsed = (now - last).abs();
    if elapsed < Duration::days(1) {
        return "Back so soon! Awesome!".to_string();
    }
    let days = elapsed.num_days();
    format!(
        "You last visited {} {} ago.",
        days,
        if days == 1 { "day" } else { "days" }
    )
}
