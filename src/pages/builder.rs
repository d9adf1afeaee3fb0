use chrono::Local;
use eframe::egui;
use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use std::sync::Arc;

use crate::background::Waker;
use crate::catalog::{find_by_id, CatalogLoad, Facet, LoadState, ResourceSource, WORKOUTS};
use crate::error::Result;
use crate::filter::{distinct_tags, Filter};
use crate::modal::ModalState;
use crate::models::{RoutineEntry, Workout};
use crate::render::{render, render_list, Rendered};
use crate::selection::CustomRoutine;
use crate::session::Session;
use crate::ui;

pub const NO_AVAILABLE: &str = "No workouts found.";
pub const EMPTY_ROUTINE: &str =
    "No workouts in your routine yet. Add exercises from the available workouts list.";
pub const CLEAR_PROMPT: &str =
    "Are you sure you want to clear your entire routine? This action cannot be undone.";
pub const EMPTY_EXPORT: &str = "Your routine is empty. Add some workouts first!";

#[derive(Clone, Debug, PartialEq)]
pub struct AvailableItem {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub calories: u32,
    pub added: bool,
}

/// The routine builder: the workout catalog on one side, the user's
/// custom routine on the other.
pub struct RoutineBuilderPage {
    catalog: CatalogLoad<Workout>,
    pub filter: Filter,
    confirm_clear: ModalState,
    export: ModalState,
    copied: bool,
}

impl RoutineBuilderPage {
    pub fn load(source: Arc<dyn ResourceSource>, waker: Waker) -> Self {
        Self::with_load(CatalogLoad::spawn(source, &WORKOUTS, waker, |w: Workout| w))
    }

    pub fn with_catalog(catalog: LoadState<Workout>) -> Self {
        Self::with_load(catalog.into())
    }

    fn with_load(catalog: CatalogLoad<Workout>) -> Self {
        RoutineBuilderPage {
            catalog,
            filter: Filter::new().with_selector(Facet::MuscleGroup, ""),
            confirm_clear: ModalState::default(),
            export: ModalState::default(),
            copied: false,
        }
    }

    pub fn poll(&mut self) {
        self.catalog.poll();
    }

    pub fn is_pending(&self) -> bool {
        self.catalog.is_pending()
    }

    pub fn available(&self, routine: &CustomRoutine) -> Rendered<AvailableItem> {
        render(
            self.catalog.state(),
            &self.filter.apply(self.catalog.items()),
            NO_AVAILABLE,
            |w| AvailableItem {
                id: w.id.clone(),
                name: w.name.clone(),
                muscle_group: w.muscle_group.clone(),
                difficulty: w.difficulty.clone(),
                calories: w.calories_burned,
                added: routine.contains(&w.id),
            },
        )
    }

    pub fn routine_items(routine: &CustomRoutine) -> Rendered<RoutineEntry> {
        let entries: Vec<&RoutineEntry> = routine.entries().iter().collect();
        render_list(&entries, EMPTY_ROUTINE, |e| e.clone())
    }

    pub fn add(&self, routine: &mut CustomRoutine, id: &str) -> Result<bool> {
        match find_by_id(self.catalog.items(), id) {
            Some(workout) => routine.add_workout(workout),
            None => Ok(false),
        }
    }

    /// Opens the export dialog, or returns the alert for an empty routine.
    pub fn open_export(&mut self, routine: &CustomRoutine) -> Option<&'static str> {
        if routine.is_empty() {
            return Some(EMPTY_EXPORT);
        }
        self.copied = false;
        self.export.open();
        None
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Routine Builder");
        ui.add_space(10.0);

        ui.columns(2, |columns| {
            self.show_available(&mut columns[0], session);
            self.show_routine(&mut columns[1], session);
        });

        self.show_dialogs(ui.ctx(), session);
    }

    fn show_available(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.label(RichText::new("Available Workouts").strong().size(22.0));
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.filter.query);
        });
        let muscles = distinct_tags(self.catalog.items(), Facet::MuscleGroup);
        ui::select(
            ui,
            "Muscle group",
            self.filter.selector_mut(Facet::MuscleGroup),
            &muscles,
        );
        ui.separator();

        let mut picked = None;
        let rendered = self.available(&session.routine);
        egui::ScrollArea::vertical()
            .id_salt("available")
            .show(ui, |ui| match &rendered {
                Rendered::Cards(items) => {
                    for item in items {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&item.name).strong());
                                ui.horizontal(|ui| {
                                    ui::tag(ui, &item.muscle_group);
                                    ui::tag(ui, &item.difficulty);
                                    ui::tag(ui, &format!("{} cal", item.calories));
                                });
                            });
                            let label = if item.added { "✓ Added" } else { "+ Add" };
                            if ui.add_enabled(!item.added, egui::Button::new(label)).clicked() {
                                picked = Some(item.id.clone());
                            }
                        });
                        ui.separator();
                    }
                }
                other => ui::show_rendered(ui, other, |_, _: &AvailableItem| {}),
            });

        if let Some(id) = picked {
            if let Err(e) = self.add(&mut session.routine, &id) {
                session.report(Err(e));
            }
        }
    }

    fn show_routine(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.label(
            RichText::new(format!("My Routine ({})", session.routine.len()))
                .strong()
                .size(22.0),
        );
        ui.horizontal(|ui| {
            if ui.button("Clear Routine").clicked() {
                self.confirm_clear.open();
            }
            if ui.button("Export").clicked() {
                if let Some(message) = self.open_export(&session.routine) {
                    session.alert(message);
                }
            }
        });
        ui.separator();

        let mut removed = None;
        match Self::routine_items(&session.routine) {
            Rendered::Cards(entries) => {
                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::remainder())
                    .columns(Column::auto(), 4)
                    .header(22.0, |mut header| {
                        for title in ["Exercise", "Muscle Group", "Difficulty", "Calories", ""] {
                            header.col(|ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|mut body| {
                        for entry in &entries {
                            let w = &entry.workout;
                            body.row(24.0, |mut row| {
                                row.col(|ui| {
                                    ui.label(&w.name);
                                });
                                row.col(|ui| {
                                    ui.label(&w.muscle_group);
                                });
                                row.col(|ui| {
                                    ui.label(&w.difficulty);
                                });
                                row.col(|ui| {
                                    ui.label(format!("{} cal", w.calories_burned));
                                });
                                row.col(|ui| {
                                    if ui.button("Remove").clicked() {
                                        removed = Some(w.id.clone());
                                    }
                                });
                            });
                        }
                    });

                let stats = session.routine.stats();
                ui.add_space(10.0);
                egui::Grid::new("routine-stats").show(ui, |ui| {
                    ui.label("Total Exercises");
                    ui.label(stats.total_exercises.to_string());
                    ui.end_row();
                    ui.label("Total Calories");
                    ui.label(stats.total_calories.to_string());
                    ui.end_row();
                    ui.label("Avg. Difficulty");
                    ui.label(stats.average_difficulty);
                    ui.end_row();
                });
            }
            other => ui::show_rendered(ui, &other, |_, _| {}),
        }

        if let Some(id) = removed {
            if let Err(e) = session.routine.remove(&id) {
                session.report(Err(e));
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context, session: &mut Session) {
        if self.confirm_clear.is_open() {
            let mut answer = None;
            egui::Window::new("Clear Routine")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(CLEAR_PROMPT);
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            answer = Some(true);
                        }
                        if ui.button("Cancel").clicked() {
                            answer = Some(false);
                        }
                    });
                });
            if let Some(confirmed) = answer {
                self.confirm_clear.close();
                if let Err(e) = session.routine.clear(|| confirmed) {
                    session.report(Err(e));
                }
            }
        }

        if self.export.is_open() {
            let mut open = true;
            let mut close = false;
            let created = Local::now().format("%-m/%-d/%Y").to_string();
            egui::Window::new("Export Routine")
                .open(&mut open)
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label("Your custom routine is ready to export:");
                    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                        ui.monospace(session.routine.export_text(&created));
                    });
                    ui.horizontal(|ui| {
                        let label = if self.copied { "✓ Copied!" } else { "📋 Copy to Clipboard" };
                        if ui.button(label).clicked() {
                            ui.ctx().copy_text(session.routine.clipboard_text());
                            self.copied = true;
                        }
                        if ui.button("Close").clicked() {
                            close = true;
                        }
                    });
                });
            if !open || close {
                self.export.close();
            }
        }
    }
}
