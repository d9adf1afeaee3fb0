use chrono::{DateTime, Utc};
use eframe::egui;
use egui::{RichText, Ui};
use tracing::info;

use crate::error::ValidationError;
use crate::forms::{JoinApplication, JoinForm};
use crate::modal::Modal;
use crate::models::MembershipTier;
use crate::session::Session;
use crate::ui;

/// Membership level descriptions shown beside the level picker.
pub const LEVEL_BENEFITS: [(MembershipTier, &str); 3] = [
    (MembershipTier::Member, "Directory listing and the monthly newsletter."),
    (MembershipTier::Silver, "Adds event discounts and spotlight eligibility."),
    (MembershipTier::Gold, "Adds featured advertising and priority spotlights."),
];

/// Chamber membership application.
pub struct JoinPage {
    pub form: JoinForm,
    thanks: Modal<JoinApplication>,
}

impl JoinPage {
    pub fn new(opened_at: DateTime<Utc>) -> Self {
        JoinPage {
            form: JoinForm::new(opened_at),
            thanks: Modal::default(),
        }
    }

    /// Validates and, on success, shows the thank-you window and starts a
    /// fresh form stamped with `now`.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let application = self.form.validate()?;
        info!(
            organization = %application.organization,
            level = application.membership.label(),
            "membership application received"
        );
        self.thanks.show(application);
        self.form = JoinForm::new(now);
        Ok(())
    }

    pub fn thanks(&self) -> Option<&JoinApplication> {
        self.thanks.content()
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Join the Chamber");
        ui.add_space(10.0);

        egui::Grid::new("join-form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let form = &mut self.form;
                for (label, value) in [
                    ("First Name *", &mut form.first_name),
                    ("Last Name *", &mut form.last_name),
                    ("Organizational Title", &mut form.title),
                    ("Email *", &mut form.email),
                    ("Mobile Phone *", &mut form.phone),
                    ("Business Name *", &mut form.organization),
                ] {
                    ui.label(label);
                    ui.text_edit_singleline(value);
                    ui.end_row();
                }

                ui.label("Membership Level *");
                ui.vertical(|ui| {
                    for (tier, benefits) in LEVEL_BENEFITS {
                        ui.radio_value(&mut form.membership, Some(tier), tier.label())
                            .on_hover_text(benefits);
                    }
                });
                ui.end_row();

                ui.label("Business Description");
                ui.text_edit_multiline(&mut form.description);
                ui.end_row();
            });

        ui.add_space(10.0);
        if ui.button("Join").clicked() {
            if let Err(e) = self.submit(Utc::now()) {
                session.alert(e.to_string());
            }
        }

        self.show_thanks(ui.ctx());
    }

    fn show_thanks(&mut self, ctx: &egui::Context) {
        let Some(application) = self.thanks.content().cloned() else {
            return;
        };

        let mut open = true;
        let mut close = false;
        egui::Window::new("Thank You!")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!(
                        "Welcome, {} {}! Your application has been received.",
                        application.first_name, application.last_name
                    ))
                    .color(ui::ACCENT_GREEN),
                );
                egui::Grid::new("join-summary").show(ui, |ui| {
                    ui.label("Business");
                    ui.label(&application.organization);
                    ui.end_row();
                    ui.label("Email");
                    ui.label(&application.email);
                    ui.end_row();
                    ui.label("Phone");
                    ui.label(&application.phone);
                    ui.end_row();
                    ui.label("Membership");
                    ui.label(application.membership.label());
                    ui.end_row();
                    ui.label("Submitted");
                    ui.label(application.timestamp.format("%Y-%m-%d %H:%M UTC").to_string());
                    ui.end_row();
                });
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

        if !open || close {
            self.thanks.close();
        }
    }
}
