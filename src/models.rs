//models.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{CatalogRecord, Facet};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub equipment: String,
    pub calories_burned: u32,
    pub description: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub details: String,
    pub difficulty: String,
    pub duration: String,
    pub frequency: String,
    pub calories_burned: u32,
    pub image: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoutineExercise {
    pub name: String,
    pub sets: u32,
    #[serde(deserialize_with = "string_or_number")]
    pub reps: String,
    #[serde(deserialize_with = "string_or_number")]
    pub rest: String,
}

/// One line of the user's custom routine. Entries copied from the workout
/// catalog carry no set scheme; entries expanded from a routine template do.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoutineEntry {
    #[serde(flatten)]
    pub workout: Workout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
}

impl From<Workout> for RoutineEntry {
    fn from(workout: Workout) -> Self {
        RoutineEntry {
            workout,
            sets: None,
            reps: None,
            rest: None,
        }
    }
}

impl RoutineEntry {
    pub fn id(&self) -> &str {
        &self.workout.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum MembershipTier {
    Member,
    Silver,
    Gold,
}

impl From<u8> for MembershipTier {
    fn from(level: u8) -> Self {
        match level {
            1 => MembershipTier::Member,
            2 => MembershipTier::Silver,
            _ => MembershipTier::Gold,
        }
    }
}

impl From<MembershipTier> for u8 {
    fn from(tier: MembershipTier) -> Self {
        match tier {
            MembershipTier::Member => 1,
            MembershipTier::Silver => 2,
            MembershipTier::Gold => 3,
        }
    }
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 3] = [
        MembershipTier::Member,
        MembershipTier::Silver,
        MembershipTier::Gold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MembershipTier::Member => "Member",
            MembershipTier::Silver => "Silver",
            MembershipTier::Gold => "Gold",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image: String,
    pub membership: MembershipTier,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub completed: bool,
}

impl Course {
    /// Subject prefix of the course code, e.g. `WDD` for `WDD 231`.
    pub fn subject(&self) -> &str {
        self.code.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub title: String,
    pub address: String,
    pub description: String,
    pub image: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    })
}

impl CatalogRecord for Workout {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tag(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::MuscleGroup => Some(&self.muscle_group),
            Facet::Difficulty => Some(&self.difficulty),
            _ => None,
        }
    }
}

impl CatalogRecord for Routine {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tag(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Difficulty => Some(&self.difficulty),
            _ => None,
        }
    }
}

impl CatalogRecord for Member {
    fn id(&self) -> &str {
        &self.name
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tag(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Membership => Some(self.membership.label()),
            _ => None,
        }
    }
}

impl CatalogRecord for Course {
    fn id(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.code
    }
    fn tag(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Subject => Some(self.subject()),
            _ => None,
        }
    }
}

impl CatalogRecord for Place {
    fn id(&self) -> &str {
        &self.title
    }
    fn name(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tag(&self, _facet: Facet) -> Option<&str> {
        None
    }
}

pub fn default_courses() -> Vec<Course> {
    [
        ("CSE 110", "Introduction to Programming", true),
        ("WDD 130", "Web Fundamentals", true),
        ("CSE 111", "Programming with Functions", true),
        ("CSE 210", "Programming with Classes", true),
        ("WDD 131", "Dynamic Web Fundamentals", true),
        ("WDD 231", "Frontend Web Development I", false),
    ]
    .into_iter()
    .map(|(code, name, completed)| Course {
        code: code.to_string(),
        name: name.to_string(),
        credits: 3,
        completed,
    })
    .collect()
}

pub fn default_places() -> Vec<Place> {
    [
        ("Central Market", "Av. Central 123, Lima", "A bustling market offering local produce, artisan goods, and traditional street food.", "images/startup1.webp"),
        ("Riverside Park", "Paseo del Río, Miraflores", "Scenic riverside paths, playgrounds, and weekend farmers' markets.", "images/startup2.webp"),
        ("Innovation Hub", "Calle Emprende 45, San Isidro", "Co-working and event space where local startups showcase demos and workshops.", "images/startup3.webp"),
        ("Historic Plaza", "Plaza Mayor, Centro", "Historic architecture, guided tours, and vibrant cultural events year-round.", "images/startup4.webp"),
        ("Tech Museum", "Museo Tec, Barranco", "Interactive exhibits showcasing Peru's contributions to technology and design.", "images/startup5.webp"),
        ("Gastronomy Row", "Av. Sabores 8, Miraflores", "A collection of restaurants and food stalls celebrating regional and international cuisine.", "images/startup6.webp"),
        ("Artisan Market", "Plaza Artesanal, Barranco", "Handmade crafts, textiles, and galleries from local artists and designers.", "images/startup7.webp"),
        ("Coastal Lookout", "Malecón Viewpoint, Costa Verde", "Clifftop views of the Pacific, perfect for sunrise walks and photography.", "images/startup1.webp"),
    ]
    .into_iter()
    .map(|(title, address, description, image)| Place {
        title: title.to_string(),
        address: address.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_uses_camel_case_fields() {
        let workout: Workout = serde_json::from_str(
            r#"{"id":"a","name":"Push Up","muscleGroup":"chest","difficulty":"beginner",
                "equipment":"none","caloriesBurned":80,"description":"Classic","image":"a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(workout.muscle_group, "chest");
        assert_eq!(workout.calories_burned, 80);
    }

    #[test]
    fn routine_exercise_accepts_numeric_reps() {
        let exercise: RoutineExercise =
            serde_json::from_str(r#"{"name":"Squat","sets":3,"reps":10,"rest":"60s"}"#).unwrap();
        assert_eq!(exercise.reps, "10");
        assert_eq!(exercise.rest, "60s");
    }

    #[test]
    fn membership_levels_map_like_the_directory() {
        let member: Member = serde_json::from_str(
            r#"{"name":"Acme","address":"1 Main","phone":"555","website":"https://acme.test",
                "image":"acme.png","membership":2}"#,
        )
        .unwrap();
        assert_eq!(member.membership, MembershipTier::Silver);
        assert_eq!(MembershipTier::from(7), MembershipTier::Gold);
        assert_eq!(serde_json::to_value(member.membership).unwrap(), 2);
    }

    #[test]
    fn routine_entry_flattens_workout() {
        let entry = RoutineEntry {
            sets: Some(3),
            reps: Some("10".to_string()),
            rest: None,
            ..RoutineEntry::from(Workout {
                id: "a".into(),
                name: "Push Up".into(),
                muscle_group: "chest".into(),
                difficulty: "beginner".into(),
                equipment: "none".into(),
                calories_burned: 80,
                description: String::new(),
                image: String::new(),
            })
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["muscleGroup"], "chest");
        assert_eq!(value["sets"], 3);
        assert!(value.get("rest").is_none());
    }

    #[test]
    fn course_subject_is_code_prefix() {
        let courses = default_courses();
        assert_eq!(courses[0].subject(), "CSE");
        assert_eq!(courses[1].tag(Facet::Subject), Some("WDD"));
    }
}
