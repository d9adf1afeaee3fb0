use eframe::egui;
use egui::{RichText, Ui};

use std::sync::Arc;

use crate::background::Waker;
use crate::catalog::{find_by_id, CatalogLoad, LoadState, ResourceSource, ROUTINES};
use crate::error::Result;
use crate::modal::Modal;
use crate::models::Routine;
use crate::render::{render, Rendered};
use crate::selection::CustomRoutine;
use crate::session::Session;
use crate::ui;

pub const NO_ROUTINES: &str = "No routines found.";

/// Ready-made routine templates.
pub struct RoutinesPage {
    catalog: CatalogLoad<Routine>,
    details: Modal<Routine>,
}

enum Action {
    View(String),
    Use(String),
}

impl RoutinesPage {
    pub fn load(source: Arc<dyn ResourceSource>, waker: Waker) -> Self {
        Self::with_load(CatalogLoad::spawn(source, &ROUTINES, waker, |r: Routine| r))
    }

    pub fn with_catalog(catalog: LoadState<Routine>) -> Self {
        Self::with_load(catalog.into())
    }

    fn with_load(catalog: CatalogLoad<Routine>) -> Self {
        RoutinesPage {
            catalog,
            details: Modal::default(),
        }
    }

    pub fn poll(&mut self) {
        self.catalog.poll();
    }

    pub fn is_pending(&self) -> bool {
        self.catalog.is_pending()
    }

    pub fn cards(&self) -> Rendered<&Routine> {
        let all: Vec<&Routine> = self.catalog.items().iter().collect();
        render(self.catalog.state(), &all, NO_ROUTINES, |r| r)
    }

    /// Copies every exercise of `routine` into the custom routine and
    /// returns the alert text.
    pub fn use_routine(routine_store: &mut CustomRoutine, routine: &Routine) -> Result<String> {
        let added = routine_store.add_routine(routine)?;
        Ok(if added > 0 {
            format!(
                "✓ {} added to your routine! Added {} exercise(s).",
                routine.name, added
            )
        } else {
            format!(
                "All exercises from \"{}\" are already in your routine.",
                routine.name
            )
        })
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Workout Routines");
        ui.add_space(10.0);

        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            let rendered = self.cards();
            ui::show_rendered(ui, &rendered, |ui, routine| {
                ui::card(ui, 320.0, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&routine.name).strong().size(20.0));
                        ui::colored_tag(ui, &routine.difficulty, ui::difficulty_color(&routine.difficulty));
                    });
                    ui.label(&routine.description);
                    ui.label(format!("Duration: {}", routine.duration));
                    ui.label(format!("Frequency: {}", routine.frequency));
                    ui.horizontal_wrapped(|ui| {
                        for benefit in &routine.benefits {
                            ui::tag(ui, benefit);
                        }
                    });
                    ui.horizontal(|ui| {
                        if ui.button("View Details").clicked() {
                            action = Some(Action::View(routine.id.clone()));
                        }
                        if ui.button("Use Routine").clicked() {
                            action = Some(Action::Use(routine.id.clone()));
                        }
                    });
                });
            });
        });

        match action {
            Some(Action::View(id)) => {
                if let Some(routine) = find_by_id(self.catalog.items(), &id) {
                    self.details.show(routine.clone());
                }
            }
            Some(Action::Use(id)) => {
                if let Some(routine) = find_by_id(self.catalog.items(), &id) {
                    let outcome = Self::use_routine(&mut session.routine, routine);
                    session.report(outcome);
                }
            }
            None => {}
        }

        self.show_modal(ui.ctx(), session);
    }

    fn show_modal(&mut self, ctx: &egui::Context, session: &mut Session) {
        let Some(routine) = self.details.content().cloned() else {
            return;
        };

        let mut open = true;
        let mut close = false;
        egui::Window::new(routine.name.as_str())
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                    ui.label(RichText::new(&routine.description).weak());
                    egui::Grid::new("routine-info").show(ui, |ui| {
                        for (label, value) in [
                            ("Duration", routine.duration.clone()),
                            ("Difficulty", routine.difficulty.clone()),
                            ("Frequency", routine.frequency.clone()),
                            ("Calories", routine.calories_burned.to_string()),
                        ] {
                            ui.label(label);
                            ui.label(value);
                            ui.end_row();
                        }
                    });

                    ui.add_space(8.0);
                    ui.label(RichText::new("About This Routine").color(ui::ACCENT_GREEN).strong());
                    ui.label(&routine.details);

                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("Exercises ({})", routine.exercises.len()))
                            .strong(),
                    );
                    for exercise in &routine.exercises {
                        ui.label(RichText::new(&exercise.name).strong());
                        ui.label(format!(
                            "Sets: {}   Reps: {}   Rest: {}",
                            exercise.sets, exercise.reps, exercise.rest
                        ));
                    }

                    ui.add_space(8.0);
                    ui.label(RichText::new("Benefits").color(ui::ACCENT_GREEN).strong());
                    for benefit in &routine.benefits {
                        ui.label(format!("• {}", benefit));
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Add All Exercises to My Routine").clicked() {
                        let outcome = Self::use_routine(&mut session.routine, &routine);
                        session.report(outcome);
                        close = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if !open || close {
            self.details.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoutineExercise;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn routine() -> Routine {
        Routine {
            id: "hiit".into(),
            name: "HIIT Blast".into(),
            description: "Short and sharp".into(),
            details: "Intervals".into(),
            difficulty: "advanced".into(),
            duration: "20 min".into(),
            frequency: "2x/week".into(),
            calories_burned: 300,
            image: String::new(),
            benefits: vec![],
            exercises: vec![
                RoutineExercise {
                    name: "Burpees".into(),
                    sets: 4,
                    reps: "15".into(),
                    rest: "30s".into(),
                },
                RoutineExercise {
                    name: "Sprints".into(),
                    sets: 6,
                    reps: "20s".into(),
                    rest: "40s".into(),
                },
            ],
        }
    }

    #[test]
    fn use_routine_reports_added_count_then_nothing() {
        let mut store = CustomRoutine::load(Rc::new(MemoryStore::new()));
        assert_eq!(
            RoutinesPage::use_routine(&mut store, &routine()).unwrap(),
            "✓ HIIT Blast added to your routine! Added 2 exercise(s)."
        );
        assert_eq!(
            RoutinesPage::use_routine(&mut store, &routine()).unwrap(),
            "All exercises from \"HIIT Blast\" are already in your routine."
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_and_failed_catalogs() {
        let empty = RoutinesPage::with_catalog(LoadState::Ready(vec![]));
        assert_eq!(empty.cards().message(), Some(NO_ROUTINES));

        let failed = RoutinesPage::with_catalog(LoadState::Failed(ROUTINES.error_message));
        assert_eq!(
            failed.cards().message(),
            Some("Error loading routines. Please try again later.")
        );
    }
}
