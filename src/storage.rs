//! Key/value persistence standing in for browser local storage.
//!
//! Values are JSON strings, one per key. [`Repository`] adds a typed layer
//! with a schema version envelope so older stored shapes can be upgraded
//! rather than misread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::error::{Error, Result};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    data: Value,
}

/// Typed access to one key. Reads never fail: absent, unreadable or
/// malformed values come back as `T::default()`. Writes are immediate and
/// report their errors.
pub struct Repository<T> {
    store: Rc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(store: Rc<dyn KeyValueStore>, key: &'static str) -> Self {
        Repository {
            store,
            key,
            _value: PhantomData,
        }
    }

    pub fn load(&self) -> T {
        let text = match self.store.get(self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key = self.key, "stored value unreadable, using empty: {}", e);
                return T::default();
            }
        };

        match decode(&text) {
            Some((version, data)) => match serde_json::from_value(upgrade(version, data)) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = self.key, version, "stored value has unexpected shape: {}", e);
                    T::default()
                }
            },
            None => {
                warn!(key = self.key, "stored value is not JSON, using empty");
                T::default()
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string(&EnvelopeOut {
            version: SCHEMA_VERSION,
            data: value,
        })
        .map_err(|source| Error::StorageEncode {
            key: self.key.to_string(),
            source,
        })?;

        self.store.set(self.key, &text).map_err(|source| {
            error!(key = self.key, "failed to persist: {}", source);
            Error::StorageWrite {
                key: self.key.to_string(),
                source,
            }
        })
    }
}

/// Splits a stored string into its schema version and payload. Bare values
/// written before envelopes existed are version 0.
fn decode(text: &str) -> Option<(u32, Value)> {
    let value: Value = serde_json::from_str(text).ok()?;
    let is_envelope = value
        .as_object()
        .map(|map| map.len() == 2 && map.contains_key("version") && map.contains_key("data"))
        .unwrap_or(false);

    if is_envelope {
        if let Ok(envelope) = serde_json::from_value::<EnvelopeIn>(value.clone()) {
            return Some((envelope.version, envelope.data));
        }
    }
    Some((0, value))
}

fn upgrade(version: u32, data: Value) -> Value {
    match version {
        // version 0 values share the v1 shape, they only lack the envelope
        0 | SCHEMA_VERSION => data,
        newer => {
            warn!(version = newer, "stored value written by a newer schema");
            data
        }
    }
}
