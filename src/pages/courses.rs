use eframe::egui;
use egui::{RichText, Ui};

use crate::catalog::{Facet, LoadState};
use crate::filter::Filter;
use crate::models::{default_courses, Course};
use crate::render::{render, Rendered};
use crate::ui;

pub const NO_COURSES: &str = "No courses found.";
pub const SUBJECTS: [&str; 2] = ["WDD", "CSE"];

pub struct CoursesPage {
    catalog: LoadState<Course>,
    pub filter: Filter,
}

impl Default for CoursesPage {
    fn default() -> Self {
        Self::with_catalog(LoadState::Ready(default_courses()))
    }
}

impl CoursesPage {
    pub fn with_catalog(catalog: LoadState<Course>) -> Self {
        CoursesPage {
            catalog,
            filter: Filter::new().with_selector(Facet::Subject, ""),
        }
    }

    pub fn displayed(&self) -> Rendered<&Course> {
        render(
            &self.catalog,
            &self.filter.apply(self.catalog.items()),
            NO_COURSES,
            |c| c,
        )
    }

    /// Credits of the courses currently displayed.
    pub fn total_credits(&self) -> u32 {
        self.displayed().cards().iter().map(|c| c.credits).sum()
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.heading("Web and Computer Programming Certificate");
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let subject = self.filter.selector_mut(Facet::Subject);
            ui.selectable_value(subject, String::new(), "All");
            for code in SUBJECTS {
                ui.selectable_value(subject, code.to_string(), code);
            }
        });
        ui.add_space(10.0);

        let rendered = self.displayed();
        ui::show_rendered(ui, &rendered, |ui, course| {
            let text = if course.completed {
                RichText::new(format!("✓ {}", course.code)).color(ui::ACCENT_GREEN)
            } else {
                RichText::new(&course.code)
            };
            ui::card(ui, 120.0, |ui| {
                ui.label(text.strong());
                ui.label(RichText::new(&course.name).small());
            });
        });

        ui.add_space(10.0);
        ui.label(format!(
            "The total credits for course listed above is {}",
            self.total_credits()
        ));
    }
}
