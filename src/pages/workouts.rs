use eframe::egui;
use egui::{RichText, Ui};

use std::sync::Arc;

use crate::background::Waker;
use crate::catalog::{find_by_id, CatalogLoad, Facet, LoadState, ResourceSource, WORKOUTS};
use crate::error::Result;
use crate::filter::{distinct_tags, Filter};
use crate::modal::Modal;
use crate::models::Workout;
use crate::render::{plural, render, Rendered};
use crate::selection::{CustomRoutine, Favorites};
use crate::session::Session;
use crate::ui;

pub const NO_WORKOUTS: &str = "No workouts found. Try adjusting your filters.";

#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutCard {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub equipment: String,
    pub calories: u32,
    pub favorite: bool,
}

pub struct WorkoutsPage {
    catalog: CatalogLoad<Workout>,
    pub filter: Filter,
    favorites_only: bool,
    details: Modal<Workout>,
}

enum Action {
    ToggleFavorite(String),
    ShowDetails(String),
}

impl WorkoutsPage {
    pub fn load(source: Arc<dyn ResourceSource>, waker: Waker) -> Self {
        Self::with_load(CatalogLoad::spawn(source, &WORKOUTS, waker, |w: Workout| w))
    }

    pub fn with_catalog(catalog: LoadState<Workout>) -> Self {
        Self::with_load(catalog.into())
    }

    fn with_load(catalog: CatalogLoad<Workout>) -> Self {
        WorkoutsPage {
            catalog,
            filter: Filter::new()
                .with_selector(Facet::MuscleGroup, "")
                .with_selector(Facet::Difficulty, ""),
            favorites_only: false,
            details: Modal::default(),
        }
    }

    pub fn poll(&mut self) {
        self.catalog.poll();
    }

    pub fn is_pending(&self) -> bool {
        self.catalog.is_pending()
    }

    /// The records the grid shows right now. Favorites mode ignores the
    /// filters.
    pub fn visible(&self, favorites: &Favorites) -> Vec<&Workout> {
        let all = self.catalog.items();
        if self.favorites_only {
            all.iter().filter(|w| favorites.contains(&w.id)).collect()
        } else {
            self.filter.apply(all)
        }
    }

    pub fn cards(&self, favorites: &Favorites) -> Rendered<WorkoutCard> {
        render(
            self.catalog.state(),
            &self.visible(favorites),
            NO_WORKOUTS,
            |w| WorkoutCard {
                id: w.id.clone(),
                name: w.name.clone(),
                muscle_group: w.muscle_group.clone(),
                difficulty: w.difficulty.clone(),
                equipment: w.equipment.clone(),
                calories: w.calories_burned,
                favorite: favorites.contains(&w.id),
            },
        )
    }

    pub fn results_label(&self, favorites: &Favorites) -> String {
        format!("Showing {}", plural(self.visible(favorites).len(), "workout"))
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn toggle_favorites_view(&mut self) {
        self.favorites_only = !self.favorites_only;
    }

    pub fn favorites_button_label(&self, favorites: &Favorites) -> String {
        if self.favorites_only {
            format!("☆ View All ({})", self.catalog.items().len())
        } else {
            format!("★ View Favorites ({})", favorites.len())
        }
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        find_by_id(self.catalog.items(), id)
    }

    pub fn show_details(&mut self, id: &str) {
        if let Some(workout) = self.find(id).cloned() {
            self.details.show(workout);
        }
    }

    pub fn toggle_favorite(favorites: &mut Favorites, id: &str) -> Result<String> {
        let now = favorites.toggle(id)?;
        Ok(if now {
            "★ Remove from Favorites".to_string()
        } else {
            "☆ Add to Favorites".to_string()
        })
    }

    /// Adds `workout` to the custom routine and returns the alert text.
    pub fn add_to_routine(routine: &mut CustomRoutine, workout: &Workout) -> Result<String> {
        Ok(if routine.add_workout(workout)? {
            format!("✓ \"{}\" added to your routine!", workout.name)
        } else {
            format!("\"{}\" is already in your routine.", workout.name)
        })
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut Session) {
        ui.heading("Workout Library");
        ui.add_space(10.0);

        ui.add_enabled_ui(!self.favorites_only, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                ui.text_edit_singleline(&mut self.filter.query);

                let muscles = distinct_tags(self.catalog.items(), Facet::MuscleGroup);
                ui::select(
                    ui,
                    "Muscle group",
                    self.filter.selector_mut(Facet::MuscleGroup),
                    &muscles,
                );
                let levels = distinct_tags(self.catalog.items(), Facet::Difficulty);
                ui::select(
                    ui,
                    "Difficulty",
                    self.filter.selector_mut(Facet::Difficulty),
                    &levels,
                );
                if ui.button("Reset").clicked() {
                    self.reset_filters();
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label(self.results_label(&session.favorites));
            if ui
                .button(self.favorites_button_label(&session.favorites))
                .clicked()
            {
                self.toggle_favorites_view();
            }
        });
        ui.add_space(10.0);

        let mut action = None;
        let rendered = self.cards(&session.favorites);
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui::show_rendered(ui, &rendered, |ui, card| {
                ui::card(ui, 260.0, |ui| {
                    ui.label(RichText::new(&card.name).strong().size(20.0));
                    ui.horizontal(|ui| {
                        ui::tag(ui, &card.muscle_group);
                        ui::colored_tag(ui, &card.difficulty, ui::difficulty_color(&card.difficulty));
                    });
                    ui.label(format!("Equipment: {}", card.equipment));
                    ui.label(format!("Calories: {}", card.calories));
                    ui.horizontal(|ui| {
                        if ui.button("Details").clicked() {
                            action = Some(Action::ShowDetails(card.id.clone()));
                        }
                        let star = RichText::new("★").color(if card.favorite {
                            ui::ACCENT_GREEN
                        } else {
                            ui.visuals().weak_text_color()
                        });
                        if ui.button(star).on_hover_text("Add to favorites").clicked() {
                            action = Some(Action::ToggleFavorite(card.id.clone()));
                        }
                    });
                });
            });
        });

        match action {
            Some(Action::ToggleFavorite(id)) => {
                if let Err(e) = Self::toggle_favorite(&mut session.favorites, &id) {
                    session.report(Err(e));
                }
            }
            Some(Action::ShowDetails(id)) => self.show_details(&id),
            None => {}
        }

        self.show_modal(ui.ctx(), session);
    }

    fn show_modal(&mut self, ctx: &egui::Context, session: &mut Session) {
        let Some(workout) = self.details.content().cloned() else {
            return;
        };

        let mut open = true;
        let mut close = false;
        egui::Window::new(workout.name.as_str())
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("Description");
                ui.label(&workout.description);
                ui.add_space(8.0);
                ui.heading("Exercise Details");
                egui::Grid::new("workout-details").striped(true).show(ui, |ui| {
                    ui.label("Muscle Group");
                    ui.label(&workout.muscle_group);
                    ui.end_row();
                    ui.label("Difficulty");
                    ui.label(&workout.difficulty);
                    ui.end_row();
                    ui.label("Equipment");
                    ui.label(&workout.equipment);
                    ui.end_row();
                    ui.label("Calories Burned");
                    ui.label(format!("{} kcal", workout.calories_burned));
                    ui.end_row();
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Add to Routine").clicked() {
                        let outcome = Self::add_to_routine(&mut session.routine, &workout);
                        session.report(outcome);
                        close = true;
                    }
                    let label = if session.favorites.contains(&workout.id) {
                        "★ Remove from Favorites"
                    } else {
                        "☆ Add to Favorites"
                    };
                    if ui.button(label).clicked() {
                        if let Err(e) = Self::toggle_favorite(&mut session.favorites, &workout.id) {
                            session.report(Err(e));
                        }
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
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn workout(id: &str, name: &str, muscle: &str) -> Workout {
        Workout {
            id: id.into(),
            name: name.into(),
            muscle_group: muscle.into(),
            difficulty: "beginner".into(),
            equipment: "none".into(),
            calories_burned: 60,
            description: String::new(),
            image: String::new(),
        }
    }

    fn page() -> WorkoutsPage {
        WorkoutsPage::with_catalog(LoadState::Ready(vec![
            workout("a", "Push Up", "chest"),
            workout("b", "Squat", "legs"),
        ]))
    }

    #[test]
    fn cards_reflect_filters_and_favorites() {
        let mut favorites = Favorites::load(Rc::new(MemoryStore::new()));
        favorites.toggle("b").unwrap();
        let mut page = page();

        let cards = page.cards(&favorites);
        assert_eq!(cards.cards().len(), 2);
        assert!(cards.cards()[1].favorite);
        assert_eq!(page.results_label(&favorites), "Showing 2 workouts");

        page.filter.query = "push".into();
        assert_eq!(page.results_label(&favorites), "Showing 1 workout");

        page.filter.query = "deadlift".into();
        assert_eq!(page.cards(&favorites), Rendered::Empty(NO_WORKOUTS));
    }

    #[test]
    fn favorites_view_ignores_filters() {
        let mut favorites = Favorites::load(Rc::new(MemoryStore::new()));
        favorites.toggle("b").unwrap();
        let mut page = page();
        page.filter.query = "push".into();

        assert_eq!(page.favorites_button_label(&favorites), "★ View Favorites (1)");
        page.toggle_favorites_view();
        let ids: Vec<_> = page.visible(&favorites).iter().map(|w| w.id.clone()).collect();
        assert_eq!(ids, ["b"]);
        assert_eq!(page.favorites_button_label(&favorites), "☆ View All (2)");
    }

    #[test]
    fn failed_catalog_renders_fixed_error() {
        let favorites = Favorites::load(Rc::new(MemoryStore::new()));
        let page = WorkoutsPage::with_catalog(LoadState::Failed(WORKOUTS.error_message));
        assert_eq!(
            page.cards(&favorites).message(),
            Some("Error loading workouts. Please try again later.")
        );
    }

    #[test]
    fn add_to_routine_messages() {
        let mut routine = CustomRoutine::load(Rc::new(MemoryStore::new()));
        let push = workout("a", "Push Up", "chest");
        assert_eq!(
            WorkoutsPage::add_to_routine(&mut routine, &push).unwrap(),
            "✓ \"Push Up\" added to your routine!"
        );
        assert_eq!(
            WorkoutsPage::add_to_routine(&mut routine, &push).unwrap(),
            "\"Push Up\" is already in your routine."
        );
    }

    #[test]
    fn details_modal_opens_for_known_ids_only() {
        let mut page = page();
        page.show_details("nope");
        assert!(page.details.content().is_none());
        page.show_details("a");
        assert_eq!(page.details.content().map(|w| w.name.as_str()), Some("Push Up"));
    }
}
