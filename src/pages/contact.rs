use chrono::{DateTime, Local};
use eframe::egui;
use egui::{RichText, Ui};
use tracing::info;

use crate::error::ValidationError;
use crate::forms::{ContactForm, ContactSubmission, Subject};
use crate::modal::Modal;
use crate::session::Session;
use crate::ui;

pub const THANKS: &str = "Thank you for contacting us! We'll get back to you soon.";

#[derive(Default)]
pub struct ContactPage {
    pub form: ContactForm,
    confirmation: Modal<ContactSubmission>,
}

impl ContactPage {
    /// Validates the form; on success logs the snapshot and opens the
    /// confirmation. Validation failures leave the form untouched.
    pub fn submit(
        &mut self,
        session: &mut Session,
        now: DateTime<Local>,
    ) -> Result<(), ValidationError> {
        let submission = self.form.submit(now)?;
        info!(subject = submission.subject.label(), "contact form submitted");
        if let Err(e) = session.submissions.append(submission.clone()) {
            session.report(Err(e));
        }
        self.confirmation.show(submission);
        Ok(())
    }

    pub fn confirmation(&self) -> Option<&ContactSubmission> {
        self.confirmation.content()
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Contact Us");
        ui.add_space(10.0);

        egui::Grid::new("contact-form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Full Name *");
                ui.text_edit_singleline(&mut self.form.full_name);
                ui.end_row();

                ui.label("Email *");
                ui.text_edit_singleline(&mut self.form.email);
                ui.end_row();

                ui.label("Phone");
                ui.text_edit_singleline(&mut self.form.phone);
                ui.end_row();

                ui.label("Subject *");
                let shown = self.form.subject.map_or("Select a subject", Subject::label);
                egui::ComboBox::from_id_salt("contact-subject")
                    .selected_text(shown)
                    .show_ui(ui, |ui| {
                        for subject in Subject::ALL {
                            ui.selectable_value(&mut self.form.subject, Some(subject), subject.label());
                        }
                    });
                ui.end_row();

                ui.label("Message *");
                ui.text_edit_multiline(&mut self.form.message);
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut self.form.newsletter, "Subscribe to our newsletter");
                ui.end_row();
            });

        ui.add_space(10.0);
        if ui.button("Send Message").clicked() {
            if let Err(e) = self.submit(session, Local::now()) {
                session.alert(e.to_string());
            }
        }

        self.show_confirmation(ui.ctx());
    }

    fn show_confirmation(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.confirmation.content().cloned() else {
            return;
        };

        let mut open = true;
        let mut close = false;
        egui::Window::new("Message Sent")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(THANKS).color(ui::ACCENT_GREEN));
                ui.add_space(6.0);
                egui::Grid::new("contact-summary").show(ui, |ui| {
                    ui.label("Name");
                    ui.label(&submission.full_name);
                    ui.end_row();
                    ui.label("Email");
                    ui.label(&submission.email);
                    ui.end_row();
                    ui.label("Subject");
                    ui.label(submission.subject.label());
                    ui.end_row();
                    ui.label("Sent");
                    ui.label(&submission.submitted_at);
                    ui.end_row();
                });
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

        if !open || close {
            self.confirmation.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use std::rc::Rc;

    fn filled() -> ContactForm {
        ContactForm {
            full_name: "Ana Torres".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
            subject: Some(Subject::Feedback),
            message: "Love the routines".into(),
            newsletter: true,
        }
    }

    #[test]
    fn invalid_form_keeps_input_and_logs_nothing() {
        let mut session = Session::load(Rc::new(MemoryStore::new()));
        let mut page = ContactPage::default();
        page.form = ContactForm {
            email: "ana-at-example".into(),
            ..filled()
        };

        let result = page.submit(&mut session, Local::now());
        assert_eq!(result, Err(ValidationError::InvalidEmail));
        assert_eq!(page.form.email, "ana-at-example");
        assert!(session.submissions.entries().is_empty());
        assert!(page.confirmation().is_none());
    }

    #[test]
    fn valid_form_is_logged_and_confirmed() {
        let mut session = Session::load(Rc::new(MemoryStore::new()));
        let mut page = ContactPage::default();
        page.form = filled();
        let now = Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();

        page.submit(&mut session, now).unwrap();

        assert_eq!(page.form, ContactForm::default());
        assert_eq!(session.submissions.entries().len(), 1);
        let shown = page.confirmation().unwrap();
        assert_eq!(shown.full_name, "Ana Torres");
        assert_eq!(shown.submitted_at, "3/9/2026, 2:05:07 PM");
    }
}
