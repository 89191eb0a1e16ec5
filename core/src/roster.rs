//! Technician roster: name to position title, classified once per run.
//!
//! The roster is built before any technician is processed and is
//! read-only afterwards, so one instance is shared by the whole batch.

use crate::{
    classifier::TechnicianProfile,
    error::{PayrollError, PayrollResult},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name:     String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    technicians: Vec<RosterEntry>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    /// Roster order, first occurrence of each name only.
    profiles: Vec<TechnicianProfile>,
    /// Lowercase trimmed name -> index into `profiles`.
    by_name:  HashMap<String, usize>,
}

pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Roster {
    /// Build the profile cache. Blank names are ignored and the first
    /// occurrence of a name wins.
    pub fn from_entries(entries: &[RosterEntry]) -> PayrollResult<Self> {
        let mut profiles = Vec::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());

        for entry in entries {
            let key = name_key(&entry.name);
            if key.is_empty() {
                continue;
            }
            if by_name.contains_key(&key) {
                log::debug!("roster: duplicate entry for '{}' ignored", entry.name.trim());
                continue;
            }
            by_name.insert(key, profiles.len());
            profiles.push(TechnicianProfile::new(&entry.name, &entry.position));
        }

        if profiles.is_empty() {
            return Err(PayrollError::EmptyRoster);
        }
        log::info!("roster: {} technicians loaded", profiles.len());
        Ok(Self { profiles, by_name })
    }

    /// Load the roster from a JSON file. Any failure here is fatal to
    /// the run: payouts cannot be computed without classes.
    pub fn load(path: &Path) -> PayrollResult<Self> {
        let unavailable = |reason: String| PayrollError::RosterUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let file: RosterFile = serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;
        Self::from_entries(&file.technicians)
    }

    /// Cached profile, or an unknown (class 0) profile carrying `name`.
    pub fn profile(&self, name: &str) -> TechnicianProfile {
        match self.get(name) {
            Some(p) => p.clone(),
            None => {
                log::debug!("roster: '{}' not found, treated as class 0", name.trim());
                TechnicianProfile::unknown(name)
            }
        }
    }

    /// Split one piece of a technician list into roster names.
    /// A piece that is itself a roster name is kept whole; otherwise
    /// the longest runs of words that name rostered technicians are
    /// taken. With no match at all the piece is returned unchanged.
    pub fn split_names(&self, piece: &str) -> Vec<String> {
        let piece = piece.trim();
        if piece.is_empty() {
            return Vec::new();
        }
        if self.get(piece).is_some() {
            return vec![piece.to_string()];
        }
        let words: Vec<&str> = piece.split_whitespace().collect();
        let mut found = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let matched = (i + 1..=words.len()).rev().find_map(|end| {
                let candidate = words[i..end].join(" ");
                self.get(&candidate).map(|_| (end, candidate))
            });
            match matched {
                Some((end, name)) => {
                    found.push(name);
                    i = end;
                }
                None => {
                    log::debug!("roster: '{}' in '{piece}' is not a technician", words[i]);
                    i += 1;
                }
            }
        }
        if found.is_empty() {
            vec![piece.to_string()]
        } else {
            found
        }
    }

    pub fn get(&self, name: &str) -> Option<&TechnicianProfile> {
        self.by_name.get(&name_key(name)).map(|&i| &self.profiles[i])
    }

    pub fn profiles(&self) -> &[TechnicianProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
