use eframe::egui;
use egui::{RichText, Ui};

use std::sync::Arc;

use crate::background::Waker;
use crate::catalog::{CatalogLoad, LoadState, ResourceSource, SPOTLIGHTS, WORKOUTS};
use crate::forms::newsletter_accepts;
use crate::models::{Member, MembershipTier, Workout};
use crate::pages::directory::tier_color;
use crate::pages::weather::WeatherWidget;
use crate::render::{render, rotate_pick, Rendered};
use crate::ui;

pub const FEATURED_COUNT: usize = 3;
pub const SPOTLIGHT_COUNT: usize = 3;
pub const NEWSLETTER_THANKS: &str =
    "Thank you for subscribing! We'll keep you updated with the latest news.";
pub const NEWSLETTER_INVALID: &str = "Please enter a valid email address.";

/// Landing view: featured workouts, member spotlights, the weather widget
/// and the newsletter box.
pub struct HomePage {
    workouts: CatalogLoad<Workout>,
    members: CatalogLoad<Member>,
    weather: WeatherWidget,
    /// Rotation seed; the day number, so picks change once a day.
    day: u64,
    pub newsletter_email: String,
}

impl HomePage {
    pub fn load(
        source: Arc<dyn ResourceSource>,
        waker: Waker,
        weather: WeatherWidget,
        day: u64,
    ) -> Self {
        HomePage {
            workouts: CatalogLoad::spawn(source.clone(), &WORKOUTS, waker.clone(), |w: Workout| w),
            members: CatalogLoad::spawn(source, &SPOTLIGHTS, waker, |m: Member| m),
            weather,
            day,
            newsletter_email: String::new(),
        }
    }

    pub fn with_catalogs(
        workouts: LoadState<Workout>,
        members: LoadState<Member>,
        weather: WeatherWidget,
        day: u64,
    ) -> Self {
        HomePage {
            workouts: workouts.into(),
            members: members.into(),
            weather,
            day,
            newsletter_email: String::new(),
        }
    }

    pub fn poll(&mut self) {
        self.workouts.poll();
        self.members.poll();
        self.weather.poll();
    }

    /// Number of fetches on this page still in flight.
    pub fn pending(&self) -> usize {
        [
            self.workouts.is_pending(),
            self.members.is_pending(),
            self.weather.is_pending(),
        ]
        .into_iter()
        .filter(|&p| p)
        .count()
    }

    pub fn featured(&self) -> Rendered<&Workout> {
        let picks = rotate_pick(self.workouts.items(), FEATURED_COUNT, self.day);
        render(self.workouts.state(), &picks, "No workouts found.", |w| w)
    }

    /// Silver and Gold members only.
    pub fn spotlights(&self) -> Rendered<&Member> {
        let eligible: Vec<&Member> = self
            .members
            .items()
            .iter()
            .filter(|m| m.membership >= MembershipTier::Silver)
            .collect();
        let picks: Vec<&Member> = rotate_pick(&eligible, SPOTLIGHT_COUNT, self.day)
            .into_iter()
            .copied()
            .collect();
        render(self.members.state(), &picks, "No members found.", |m| m)
    }

    /// Handles the newsletter button and returns the alert text. The field
    /// clears only on success.
    pub fn subscribe(&mut self) -> &'static str {
        if newsletter_accepts(&self.newsletter_email) {
            self.newsletter_email.clear();
            NEWSLETTER_THANKS
        } else {
            NEWSLETTER_INVALID
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<&'static str> {
        let mut alert = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Featured Workouts");
            ui::show_rendered(ui, &self.featured(), |ui, workout| {
                ui::card(ui, 240.0, |ui| {
                    ui.label(RichText::new(&workout.name).strong().size(18.0));
                    ui.horizontal(|ui| {
                        ui::tag(ui, &workout.muscle_group);
                        ui::colored_tag(ui, &workout.difficulty, ui::difficulty_color(&workout.difficulty));
                    });
                    ui.label(RichText::new(&workout.description).weak());
                });
            });

            ui.add_space(16.0);
            ui.columns(2, |columns| {
                columns[0].heading("Member Spotlights");
                ui::show_rendered(&mut columns[0], &self.spotlights(), |ui, member| {
                    ui::card(ui, 220.0, |ui| {
                        ui.label(RichText::new(&member.name).strong());
                        ui::colored_tag(ui, member.membership.label(), tier_color(member.membership));
                        ui.label(&member.phone);
                        ui.label(&member.address);
                        ui.hyperlink(&member.website);
                    });
                });

                columns[1].heading("Weather");
                self.weather.show(&mut columns[1]);
            });

            ui.add_space(16.0);
            ui.heading("Newsletter");
            ui.horizontal(|ui| {
                ui.label("Email:");
                ui.text_edit_singleline(&mut self.newsletter_email);
                if ui.button("Subscribe").clicked() {
                    alert = Some(self.subscribe());
                }
            });
        });

        alert
    }
}
