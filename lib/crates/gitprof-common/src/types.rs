use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named identity: commit author fields plus the SSH key that backs it.
///
/// Serialized with the field names of the on-disk registry document
/// (`name`, `email`, `ssh_key`). Fields this version does not know about are
/// kept in `extra` so a full rewrite does not drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Commit author name.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Commit author email.
    pub email: String,
    /// Private key path; the public half lives at the same path plus `.pub`.
    #[serde(rename = "ssh_key", default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    #[must_use]
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            key_path: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.key_path = Some(key_path.into());
        self
    }

    /// The private key path. A blank `ssh_key` counts as no key.
    #[must_use]
    pub fn key_path(&self) -> Option<&Path> {
        self.key_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Whether `identity` is the author identity this profile sets.
    #[must_use]
    pub fn matches(&self, identity: &GlobalIdentity) -> bool {
        self.display_name == identity.name && self.email == identity.email
    }

    /// The author identity this profile activates.
    #[must_use]
    pub fn identity(&self) -> GlobalIdentity {
        GlobalIdentity {
            name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The process-wide author identity (not tied to any repository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalIdentity {
    pub name: String,
    pub email: String,
}

impl GlobalIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Mapping of profile name to [`Profile`], persisted as one JSON object.
///
/// Backed by a `BTreeMap` so listings are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    profiles: BTreeMap<String, Profile>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Insert or replace the profile stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, profile: Profile) -> Option<Profile> {
        self.profiles.insert(name.into(), profile)
    }

    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Profile)> {
        self.profiles.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// First profile (by name) whose author identity equals `identity`.
    #[must_use]
    pub fn find_by_identity(&self, identity: &GlobalIdentity) -> Option<(&String, &Profile)> {
        self.profiles.iter().find(|(_, p)| p.matches(identity))
    }
}
