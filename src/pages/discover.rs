use chrono::{DateTime, Utc};
use eframe::egui;
use egui::{RichText, Ui};

use crate::models::{default_places, Place};
use crate::session::Session;
use crate::ui;

/// Places to visit, plus a greeting based on the previous visit.
pub struct DiscoverPage {
    places: Vec<Place>,
    greeting: Option<String>,
}

impl Default for DiscoverPage {
    fn default() -> Self {
        DiscoverPage {
            places: default_places(),
            greeting: None,
        }
    }
}

impl DiscoverPage {
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Records the visit the first time the page is shown and keeps the
    /// greeting for the rest of the session.
    pub fn greet(&mut self, session: &mut Session, now: DateTime<Utc>) -> &str {
        if self.greeting.is_none() {
            let outcome = session.visits.record_visit(now);
            let message = match outcome {
                Ok(message) => message,
                Err(e) => {
                    let message = crate::visits::visit_message(session.visits.last_visit(), now);
                    session.report(Err(e));
                    message
                }
            };
            self.greeting = Some(message);
        }
        self.greeting.as_deref().unwrap_or_default()
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Discover");
        let greeting = self.greet(session, Utc::now()).to_string();
        ui.label(RichText::new(greeting).italics());
        ui.add_space(10.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for place in &self.places {
                    ui::card(ui, 260.0, |ui| {
                        ui.label(RichText::new(&place.title).strong().size(18.0));
                        ui.label(RichText::new(&place.address).small());
                        ui.label(&place.description);
                    });
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Duration;
    use std::rc::Rc;

    #[test]
    fn greeting_is_recorded_once_per_session() {
        let store = Rc::new(MemoryStore::new());
        let now = Utc::now();

        let mut session = Session::load(store.clone());
        let mut page = DiscoverPage::default();
        assert_eq!(
            page.greet(&mut session, now),
            "Welcome! Let us know if you have any questions."
        );
        assert_eq!(
            page.greet(&mut session, now + Duration::hours(1)),
            "Welcome! Let us know if you have any questions."
        );

        let mut next = Session::load(store);
        let mut page = DiscoverPage::default();
        assert_eq!(
            page.greet(&mut next, now + Duration::days(3)),
            "You last visited 3 days ago."
        );
    }

    #[test]
    fn ships_eight_places() {
        assert_eq!(DiscoverPage::default().places().len(), 8);
    }
}
