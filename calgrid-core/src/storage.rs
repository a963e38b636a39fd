//! Persistence boundary for the event mapping.
//!
//! Events are stored as a JSON object keyed by `{year}-{month}-{day}`, each
//! value an ordered list of `{ "name", "startTime", "endTime" }` records.

use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{CalGridError, CalGridResult};
use crate::store::EventMap;

/// Where an `EventStore` loads from and writes to.
pub trait EventStorage {
    /// Read the saved mapping. No saved state is an empty mapping.
    fn load(&self) -> CalGridResult<EventMap>;

    /// Replace the saved mapping with `events`.
    fn save(&mut self, events: &EventMap) -> CalGridResult<()>;
}

pub fn to_json(events: &EventMap) -> CalGridResult<String> {
    serde_json::to_string_pretty(events).map_err(|e| CalGridError::Serialization(e.to_string()))
}

pub fn from_json(content: &str) -> CalGridResult<EventMap> {
    let mut events: EventMap =
        serde_json::from_str(content).map_err(|e| CalGridError::Serialization(e.to_string()))?;
    events.prune_empty_days();
    Ok(events)
}

/// Events file on disk.
///
/// A file that can't be parsed is renamed to `<name>.corrupt` when loading,
/// so the next save doesn't overwrite it.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable events file is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn set_aside(&self) {
        let backup = self.corrupt_path();
        match std::fs::rename(&self.path, &backup) {
            Ok(()) => warn!(
                "event=storage_set_aside path={} backup={}",
                self.path.display(),
                backup.display()
            ),
            Err(e) => warn!(
                "event=storage_set_aside status=failed path={} error={}",
                self.path.display(),
                e
            ),
        }
    }
}

impl EventStorage for JsonFileStorage {
    fn load(&self) -> CalGridResult<EventMap> {
        if !self.path.exists() {
            return Ok(EventMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(EventMap::new());
        }

        from_json(&content).inspect_err(|_| self.set_aside())
    }

    fn save(&mut self, events: &EventMap) -> CalGridResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Persistence(format!(
                    "Could not create {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let content = to_json(events)?;
        let temp = self.path.with_extension("json.tmp");

        std::fs::write(&temp, content).map_err(|e| {
            CalGridError::Persistence(format!("Could not write {}: {e}", temp.display()))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            CalGridError::Persistence(format!("Could not replace {}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}

/// In-memory storage holding the serialized text, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
    save_count: usize,
    fail_saves: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved (possibly corrupt) text.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStorage {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Storage whose every save fails.
    pub fn failing() -> Self {
        MemoryStorage {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl EventStorage for MemoryStorage {
    fn load(&self) -> CalGridResult<EventMap> {
        match &self.contents {
            Some(content) => from_json(content),
            None => Ok(EventMap::new()),
        }
    }

    fn save(&mut self, events: &EventMap) -> CalGridResult<()> {
        if self.fail_saves {
            return Err(CalGridError::Persistence("storage is unavailable".into()));
        }
        self.contents = Some(to_json(events)?);
        self.save_count += 1;
        Ok(())
    }
}
