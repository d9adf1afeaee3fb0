//! Catalog records and the one-shot loader that fetches them.
//!
//! A catalog is the ordered list of records read from a static JSON
//! resource. It is loaded once per session; a failed load leaves the
//! catalog empty and the view reports a fixed message instead.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::background::{Background, Waker};
use crate::error::{Error, Result};

/// Categorical dimensions a record can be filtered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
    MuscleGroup,
    Difficulty,
    Membership,
    Subject,
}

pub trait CatalogRecord {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// The record's value for `facet`, or `None` if it has no such tag.
    fn tag(&self, facet: Facet) -> Option<&str>;
}

pub fn find_by_id<'a, T: CatalogRecord>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

/// Where catalog documents come from. Shared with loader threads.
pub trait ResourceSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<String>;
}

pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("falling back to default HTTP client: {}", e);
                reqwest::blocking::Client::new()
            });
        HttpSource {
            base_url: base_url.into(),
            client,
        }
    }

    fn url_for(&self, location: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            location.trim_start_matches("./").trim_start_matches('/')
        )
    }
}

impl ResourceSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String> {
        let url = self.url_for(location);
        let network = |source| Error::Network {
            location: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                location: url.clone(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(network)
    }
}

pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSource { root: root.into() }
    }
}

impl ResourceSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String> {
        let path = self.root.join(location.trim_start_matches("./"));
        fs::read_to_string(&path).map_err(|source| Error::Io {
            location: path.display().to_string(),
            source,
        })
    }
}

/// A catalog resource: its location and the name of the array inside the
/// document. `key: None` means the document itself is the array.
#[derive(Clone, Copy, Debug)]
pub struct Resource {
    pub location: &'static str,
    pub key: Option<&'static str>,
    /// Shown in place of the view when the load fails.
    pub error_message: &'static str,
}

pub const WORKOUTS: Resource = Resource {
    location: "workouts.json",
    key: Some("workouts"),
    error_message: "Error loading workouts. Please try again later.",
};

pub const ROUTINES: Resource = Resource {
    location: "routines.json",
    key: Some("routines"),
    error_message: "Error loading routines. Please try again later.",
};

pub const MEMBERS: Resource = Resource {
    location: "members.json",
    key: None,
    error_message: "Unable to load member data.",
};

pub const SPOTLIGHTS: Resource = Resource {
    error_message: "Unable to load member spotlights.",
    ..MEMBERS
};

pub fn load_catalog<T: DeserializeOwned>(
    source: &dyn ResourceSource,
    resource: &Resource,
) -> Result<Vec<T>> {
    let text = source.fetch(resource.location)?;
    parse_catalog(&text, resource)
}

pub fn parse_catalog<T: DeserializeOwned>(text: &str, resource: &Resource) -> Result<Vec<T>> {
    let json = |source| Error::Json {
        location: resource.location.to_string(),
        source,
    };

    let document: Value = serde_json::from_str(text).map_err(json)?;
    let records = match resource.key {
        Some(key) => match document {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        }
        .ok_or_else(|| Error::MissingArray {
            location: resource.location.to_string(),
            key: key.to_string(),
        })?,
        None => document,
    };
    serde_json::from_value(records).map_err(json)
}

/// Outcome of a one-shot load, as the view sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<V> {
    Loading,
    Ready(Vec<V>),
    Failed(&'static str),
}

impl<V> LoadState<V> {
    pub fn items(&self) -> &[V] {
        match self {
            LoadState::Ready(items) => items,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            LoadState::Failed(message) => Some(*message),
            LoadState::Loading | LoadState::Ready(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

impl<V> Default for LoadState<V> {
    fn default() -> Self {
        LoadState::Loading
    }
}

/// Loads `resource` once and maps every record through `map`. Any failure
/// is logged and becomes the resource's fixed error message; there is no
/// retry.
pub fn load_view<T, V>(
    source: &dyn ResourceSource,
    resource: &Resource,
    map: impl FnMut(T) -> V,
) -> LoadState<V>
where
    T: DeserializeOwned,
{
    match load_catalog::<T>(source, resource) {
        Ok(records) => {
            info!(location = resource.location, count = records.len(), "catalog loaded");
            LoadState::Ready(records.into_iter().map(map).collect())
        }
        Err(e) => {
            warn!(location = resource.location, "catalog load failed: {}", e);
            LoadState::Failed(resource.error_message)
        }
    }
}

/// A catalog view whose load runs on a worker thread. The view shows
/// `Loading` until [`CatalogLoad::poll`] picks up the result.
pub struct CatalogLoad<V> {
    state: LoadState<V>,
    pending: Background<LoadState<V>>,
}

impl<V: Send + 'static> CatalogLoad<V> {
    pub fn spawn<T, F>(
        source: Arc<dyn ResourceSource>,
        resource: &'static Resource,
        waker: Waker,
        map: F,
    ) -> Self
    where
        T: DeserializeOwned + 'static,
        F: FnMut(T) -> V + Send + 'static,
    {
        let pending = Background::spawn(
            resource.location,
            waker,
            LoadState::Failed(resource.error_message),
            move || load_view(source.as_ref(), resource, map),
        );
        CatalogLoad {
            state: LoadState::Loading,
            pending,
        }
    }
}

impl<V> CatalogLoad<V> {
    pub fn poll(&mut self) {
        if let Some(state) = self.pending.poll() {
            self.state = state;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn state(&self) -> &LoadState<V> {
        &self.state
    }

    pub fn items(&self) -> &[V] {
        self.state.items()
    }
}

impl<V> From<LoadState<V>> for CatalogLoad<V> {
    fn from(state: LoadState<V>) -> Self {
        CatalogLoad {
            state,
            pending: Background::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Workout};
    use std::collections::HashMap;

    struct StaticSource(HashMap<&'static str, &'static str>);

    impl ResourceSource for StaticSource {
        fn fetch(&self, location: &str) -> Result<String> {
            self.0
                .get(location)
                .map(|text| text.to_string())
                .ok_or_else(|| Error::Status {
                    location: location.to_string(),
                    status: 404,
                })
        }
    }

    const WORKOUTS_JSON: &str = r#"{"workouts":[
        {"id":"a","name":"Push Up","muscleGroup":"chest","difficulty":"beginner",
         "equipment":"none","caloriesBurned":80,"description":"","image":""},
        {"id":"b","name":"Squat","muscleGroup":"legs","difficulty":"beginner",
         "equipment":"none","caloriesBurned":100,"description":"","image":""}]}"#;

    #[test]
    fn loads_named_array_in_order() {
        let source = StaticSource(HashMap::from([("workouts.json", WORKOUTS_JSON)]));
        let workouts: Vec<Workout> = load_catalog(&source, &WORKOUTS).unwrap();
        let ids: Vec<_> = workouts.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn loads_bare_array() {
        let source = StaticSource(HashMap::from([(
            "members.json",
            r#"[{"name":"Acme","address":"","phone":"","website":"","image":"","membership":3}]"#,
        )]));
        let members: Vec<Member> = load_catalog(&source, &MEMBERS).unwrap();
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = parse_catalog::<Workout>(r#"{"routines":[]}"#, &WORKOUTS).unwrap_err();
        assert!(matches!(err, Error::MissingArray { .. }));
    }

    #[test]
    fn failed_load_reports_fixed_message_and_empty_catalog() {
        let source = StaticSource(HashMap::new());
        let state = load_view::<Workout, _>(&source, &WORKOUTS, |w| w);
        assert_eq!(
            state.error(),
            Some("Error loading workouts. Please try again later.")
        );
        assert!(state.items().is_empty());
    }

    #[test]
    fn malformed_json_reports_fixed_message() {
        let source = StaticSource(HashMap::from([("routines.json", "{not json")]));
        let state = load_view::<crate::models::Routine, _>(&source, &ROUTINES, |r| r);
        assert_eq!(state, LoadState::Failed(ROUTINES.error_message));
    }

    #[test]
    fn view_mapping_is_applied() {
        let source = StaticSource(HashMap::from([("workouts.json", WORKOUTS_JSON)]));
        let state = load_view(&source, &WORKOUTS, |w: Workout| w.name);
        assert_eq!(state.items(), ["Push Up".to_string(), "Squat".to_string()]);
    }

    #[test]
    fn file_source_strips_relative_prefix() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("workouts.json"), WORKOUTS_JSON).unwrap();
        let source = FileSource::new(dir.path());
        assert!(source.fetch("./workouts.json").is_ok());
        assert!(matches!(
            source.fetch("missing.json"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn http_urls_join_cleanly() {
        let source = HttpSource::new("http://localhost:8000/data/", Duration::from_secs(1));
        assert_eq!(
            source.url_for("./workouts.json"),
            "http://localhost:8000/data/workouts.json"
        );
    }

    #[test]
    fn background_load_starts_loading_then_settles() {
        let source: Arc<dyn ResourceSource> =
            Arc::new(StaticSource(HashMap::from([("workouts.json", WORKOUTS_JSON)])));
        let mut load = CatalogLoad::spawn(
            source,
            &WORKOUTS,
            crate::background::noop_waker(),
            |w: Workout| w.id,
        );
        assert!(load.state().is_loading());
        assert!(load.is_pending());

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while load.is_pending() && std::time::Instant::now() < deadline {
            load.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(load.items(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn find_by_id_uses_record_identifier() {
        let workouts: Vec<Workout> = parse_catalog(WORKOUTS_JSON, &WORKOUTS).unwrap();
        assert_eq!(find_by_id(&workouts, "b").map(|w| w.name.as_str()), Some("Squat"));
        assert!(find_by_id(&workouts, "zzz").is_none());
    }
}
