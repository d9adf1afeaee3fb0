//! User selections that outlive the session: favorites, the custom
//! routine and the contact submission log. Every mutation is persisted
//! before it returns.

use std::rc::Rc;

use tracing::info;

use crate::error::Result;
use crate::forms::ContactSubmission;
use crate::models::{Routine, RoutineEntry, Workout};
use crate::storage::{KeyValueStore, Repository};

pub const FAVORITES_KEY: &str = "favorites";
pub const ROUTINE_KEY: &str = "customRoutine";
pub const SUBMISSIONS_KEY: &str = "submissions";

/// Favorite workout ids in the order they were added.
pub struct Favorites {
    ids: Vec<String>,
    repo: Repository<Vec<String>>,
}

impl Favorites {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let repo = Repository::new(store, FAVORITES_KEY);
        let mut ids: Vec<String> = repo.load();
        let mut seen = Vec::with_capacity(ids.len());
        ids.retain(|id| {
            let fresh = !seen.contains(id);
            if fresh {
                seen.push(id.clone());
            }
            fresh
        });
        Favorites { ids, repo }
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let now_favorite = match self.ids.iter().position(|f| f == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        };
        self.repo.save(&self.ids)?;
        Ok(now_favorite)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

pub struct CustomRoutine {
    entries: Vec<RoutineEntry>,
    repo: Repository<Vec<RoutineEntry>>,
}

impl CustomRoutine {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let repo = Repository::new(store, ROUTINE_KEY);
        CustomRoutine {
            entries: repo.load(),
            repo,
        }
    }

    pub fn entries(&self) -> &[RoutineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Appends `entry` unless one with the same id is already present.
    /// Returns whether it was added.
    pub fn add(&mut self, entry: RoutineEntry) -> Result<bool> {
        if self.contains(entry.id()) {
            return Ok(false);
        }
        info!(id = entry.id(), "added to routine");
        self.entries.push(entry);
        self.repo.save(&self.entries)?;
        Ok(true)
    }

    pub fn add_workout(&mut self, workout: &Workout) -> Result<bool> {
        self.add(RoutineEntry::from(workout.clone()))
    }

    /// Adds every exercise of a routine template and returns how many were
    /// not already present.
    pub fn add_routine(&mut self, routine: &Routine) -> Result<usize> {
        let mut added = 0;
        for entry in template_entries(routine) {
            if !self.contains(entry.id()) {
                self.entries.push(entry);
                added += 1;
            }
        }
        self.repo.save(&self.entries)?;
        info!(routine = %routine.id, added, "routine template applied");
        Ok(added)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.repo.save(&self.entries)?;
        Ok(self.entries.len() != before)
    }

    /// Empties the routine if `confirm` agrees. Returns whether it cleared.
    pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool> {
        if !confirm() {
            return Ok(false);
        }
        self.entries.clear();
        self.repo.save(&self.entries)?;
        info!("routine cleared");
        Ok(true)
    }

    pub fn stats(&self) -> RoutineStats {
        RoutineStats::of(&self.entries)
    }

    pub fn export_text(&self, created: &str) -> String {
        let rule = "─────────────────────────";
        let mut text = format!(
            "FitTrack Custom Routine\nCreated: {}\nTotal Exercises: {}\n\n{}\n\n",
            created,
            self.entries.len(),
            rule
        );
        let lines: Vec<String> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let w = &e.workout;
                format!(
                    "{}. {}\n   • Muscle Group: {}\n   • Difficulty: {}\n   • Equipment: {}\n   • Calories: {} kcal",
                    i + 1,
                    w.name,
                    w.muscle_group,
                    w.difficulty,
                    w.equipment,
                    w.calories_burned
                )
            })
            .collect();
        text.push_str(&lines.join("\n\n"));
        text.push_str(&format!(
            "\n\n{}\nTotal Calories: {} kcal",
            rule,
            self.stats().total_calories
        ));
        text
    }

    /// One line per entry, for the clipboard.
    pub fn clipboard_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} - {} ({})",
                    e.workout.name, e.workout.muscle_group, e.workout.difficulty
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn template_entries(routine: &Routine) -> Vec<RoutineEntry> {
    let count = routine.exercises.len().max(1) as f64;
    let calories = (routine.calories_burned as f64 / count).round() as u32;

    routine
        .exercises
        .iter()
        .map(|exercise| RoutineEntry {
            workout: Workout {
                id: format!("routine-{}-{}", routine.id, exercise.name),
                name: exercise.name.clone(),
                muscle_group: routine.name.clone(),
                difficulty: routine.difficulty.clone(),
                equipment: "varies".to_string(),
                calories_burned: calories,
                description: routine.details.clone(),
                image: routine.image.clone(),
            },
            sets: Some(exercise.sets),
            reps: Some(exercise.reps.clone()),
            rest: Some(exercise.rest.clone()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoutineStats {
    pub total_exercises: usize,
    pub total_calories: u32,
    pub average_difficulty: &'static str,
}

impl RoutineStats {
    pub fn of(entries: &[RoutineEntry]) -> Self {
        let total_calories = entries.iter().map(|e| e.workout.calories_burned).sum();
        let average_difficulty = if entries.is_empty() {
            "Mixed"
        } else {
            let sum: u32 = entries
                .iter()
                .map(|e| difficulty_rank(&e.workout.difficulty))
                .sum();
            let mean = (sum as f64 / entries.len() as f64).round() as u32;
            match mean {
                1 => "Beginner",
                2 => "Intermediate",
                3 => "Advanced",
                _ => "Mixed",
            }
        };

        RoutineStats {
            total_exercises: entries.len(),
            total_calories,
            average_difficulty,
        }
    }
}

pub fn difficulty_rank(difficulty: &str) -> u32 {
    match difficulty {
        "intermediate" => 2,
        "advanced" => 3,
        _ => 1,
    }
}

pub struct SubmissionLog {
    submissions: Vec<ContactSubmission>,
    repo: Repository<Vec<ContactSubmission>>,
}

impl SubmissionLog {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let repo = Repository::new(store, SUBMISSIONS_KEY);
        SubmissionLog {
            submissions: repo.load(),
            repo,
        }
    }

    pub fn append(&mut self, submission: ContactSubmission) -> Result<()> {
        self.submissions.push(submission);
        self.repo.save(&self.submissions)
    }

    pub fn entries(&self) -> &[ContactSubmission] {
        &self.submissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoutineExercise;
    use crate::storage::MemoryStore;
    use serde_json::Value;

    fn store() -> Rc<dyn KeyValueStore> {
        Rc::new(MemoryStore::new())
    }

    fn stored(store: &Rc<dyn KeyValueStore>, key: &str) -> Value {
        let raw: Value = serde_json::from_str(&store.get(key).unwrap().unwrap()).unwrap();
        raw["data"].clone()
    }

    fn workout(id: &str, difficulty: &str, calories: u32) -> Workout {
        Workout {
            id: id.into(),
            name: format!("Workout {id}"),
            muscle_group: "chest".into(),
            difficulty: difficulty.into(),
            equipment: "none".into(),
            calories_burned: calories,
            description: String::new(),
            image: String::new(),
        }
    }

    fn template() -> Routine {
        Routine {
            id: "r1".into(),
            name: "Full Body".into(),
            description: "All of it".into(),
            details: "Details".into(),
            difficulty: "intermediate".into(),
            duration: "45 min".into(),
            frequency: "3x/week".into(),
            calories_burned: 400,
            image: "fb.jpg".into(),
            benefits: vec!["Strength".into()],
            exercises: ["Squat", "Row", "Press"]
                .into_iter()
                .map(|name| RoutineExercise {
                    name: name.into(),
                    sets: 3,
                    reps: "8-10".into(),
                    rest: "90s".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let store = store();
        let mut favorites = Favorites::load(store.clone());

        assert!(favorites.toggle("a").unwrap());
        assert!(favorites.contains("a"));
        assert_eq!(stored(&store, FAVORITES_KEY), serde_json::json!(["a"]));

        assert!(!favorites.toggle("a").unwrap());
        assert!(favorites.is_empty());
        assert_eq!(stored(&store, FAVORITES_KEY), serde_json::json!([]));
    }

    #[test]
    fn favorites_reload_from_store() {
        let store = store();
        let mut favorites = Favorites::load(store.clone());
        favorites.toggle("b").unwrap();
        favorites.toggle("a").unwrap();

        favorites.toggle("c").unwrap();
        favorites.toggle("b").unwrap();
        favorites.toggle("b").unwrap();

        let reloaded = Favorites::load(store);
        assert_eq!(reloaded.iter().collect::<Vec<_>>(), ["a", "c", "b"]);
    }

    #[test]
    fn duplicate_stored_favorites_collapse_in_order() {
        let store = store();
        Repository::new(store.clone(), FAVORITES_KEY)
            .save(&vec!["b".to_string(), "a".to_string(), "b".to_string()])
            .unwrap();

        let favorites = Favorites::load(store);
        assert_eq!(favorites.iter().collect::<Vec<_>>(), ["b", "a"]);
        assert!(favorites.contains("a"));
    }

    #[test]
    fn adding_same_id_twice_keeps_one_entry() {
        let mut routine = CustomRoutine::load(store());
        assert!(routine.add_workout(&workout("a", "beginner", 80)).unwrap());
        assert!(!routine.add_workout(&workout("a", "beginner", 80)).unwrap());
        assert_eq!(routine.len(), 1);
    }

    #[test]
    fn remove_filters_by_id() {
        let store = store();
        let mut routine = CustomRoutine::load(store.clone());
        routine.add_workout(&workout("a", "beginner", 80)).unwrap();
        routine.add_workout(&workout("b", "beginner", 80)).unwrap();

        assert!(routine.remove("a").unwrap());
        assert!(!routine.remove("zzz").unwrap());
        assert_eq!(routine.entries()[0].id(), "b");
        assert_eq!(CustomRoutine::load(store).len(), 1);
    }

    #[test]
    fn clear_requires_confirmation() {
        let store = store();
        let mut routine = CustomRoutine::load(store.clone());
        routine.add_workout(&workout("a", "beginner", 80)).unwrap();

        assert!(!routine.clear(|| false).unwrap());
        assert_eq!(routine.len(), 1);

        assert!(routine.clear(|| true).unwrap());
        assert!(routine.is_empty());
        assert_eq!(stored(&store, ROUTINE_KEY), serde_json::json!([]));
        assert!(CustomRoutine::load(store).is_empty());
    }

    #[test]
    fn routine_template_expands_and_is_idempotent() {
        let mut routine = CustomRoutine::load(store());
        assert_eq!(routine.add_routine(&template()).unwrap(), 3);
        assert_eq!(routine.add_routine(&template()).unwrap(), 0);

        let first = &routine.entries()[0];
        assert_eq!(first.id(), "routine-r1-Squat");
        assert_eq!(first.workout.muscle_group, "Full Body");
        assert_eq!(first.workout.equipment, "varies");
        assert_eq!(first.workout.calories_burned, 133);
        assert_eq!(first.reps.as_deref(), Some("8-10"));
    }

    #[test]
    fn stats_average_difficulty() {
        let entries: Vec<RoutineEntry> = vec![
            workout("a", "beginner", 100).into(),
            workout("b", "advanced", 200).into(),
            workout("c", "advanced", 50).into(),
        ];
        let stats = RoutineStats::of(&entries);
        assert_eq!(stats.total_exercises, 3);
        assert_eq!(stats.total_calories, 350);
        // (1 + 3 + 3) / 3 = 2.33
        assert_eq!(stats.average_difficulty, "Intermediate");

        let unknown: Vec<RoutineEntry> = vec![workout("x", "elite", 10).into()];
        assert_eq!(RoutineStats::of(&unknown).average_difficulty, "Beginner");
    }

    #[test]
    fn export_lists_every_entry() {
        let mut routine = CustomRoutine::load(store());
        routine.add_workout(&workout("a", "beginner", 80)).unwrap();
        routine.add_workout(&workout("b", "advanced", 120)).unwrap();

        let text = routine.export_text("10/16/2026");
        assert!(text.starts_with("FitTrack Custom Routine\nCreated: 10/16/2026\nTotal Exercises: 2"));
        assert!(text.contains("1. Workout a\n   • Muscle Group: chest"));
        assert!(text.contains("2. Workout b"));
        assert!(text.ends_with("Total Calories: 200 kcal"));

        assert_eq!(
            routine.clipboard_text(),
            "Workout a - chest (beginner)\nWorkout b - chest (advanced)"
        );
    }

    #[test]
    fn legacy_routine_without_envelope_loads() {
        let store = store();
        store
            .set(
                ROUTINE_KEY,
                r#"[{"id":"a","name":"Push Up","muscleGroup":"chest","difficulty":"beginner",
                     "equipment":"none","caloriesBurned":80,"description":"","image":""}]"#,
            )
            .unwrap();
        let routine = CustomRoutine::load(store);
        assert!(routine.contains("a"));
    }
}
