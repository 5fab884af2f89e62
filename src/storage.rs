use crate::types::{PadwatchError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Cap on retained ids so the file does not grow without bound. Oldest
/// entries are dropped first at flush time.
const MAX_RETAINED: usize = 10_000;

#[derive(Debug, Serialize, Deserialize)]
struct SeenFile {
    seen_ids: Vec<String>,
    last_updated: String,
    count: usize,
}

/// Durable set of already-processed listing ids.
///
/// Loaded once at startup; `mark_seen` mutates in memory and `flush` persists
/// atomically (temp file + rename), so a crash mid-write leaves the previous
/// file intact. A missing file is a fresh start; an unreadable one is fatal,
/// since guessing either way would corrupt the output stream.
pub struct SeenStore {
    path: PathBuf,
    seen: HashSet<String>,
    // Insertion order, for the retention cap.
    order: Vec<String>,
}

impl SeenStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("no seen-posts file at {}, starting fresh", path.display());
            return Ok(Self {
                path,
                seen: HashSet::new(),
                order: Vec::new(),
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| PadwatchError::StoreCorrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file: SeenFile =
            serde_json::from_str(&raw).map_err(|e| PadwatchError::StoreCorrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let order = file.seen_ids;
        let seen: HashSet<String> = order.iter().cloned().collect();
        info!("loaded {} seen post ids from {}", seen.len(), path.display());

        Ok(Self { path, seen, order })
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Idempotent; returns true only when the id was newly added.
    pub fn mark_seen(&mut self, id: &str) -> bool {
        if self.seen.insert(id.to_string()) {
            self.order.push(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Persist the set. Writes a sibling temp file and renames it over the
    /// target so the store is never left half-written.
    pub fn flush(&mut self) -> Result<()> {
        if self.order.len() > MAX_RETAINED {
            let drop = self.order.len() - MAX_RETAINED;
            for id in self.order.drain(..drop) {
                self.seen.remove(&id);
            }
        }

        let file = SeenFile {
            seen_ids: self.order.clone(),
            last_updated: Utc::now().to_rfc3339(),
            count: self.order.len(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
