//! Profile registry use-cases (add, remove, switch,
//! list, current).
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The registry is a whole-document read-modify-write with no locking: two
//! concurrent `gitprof` processes race and the last save wins.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{
    IdentityStore, KeyGenerator, KeyRequest, LocalFs, ProgressReporter, RegistryStore,
    RouteEditor,
};
use crate::domain::profile::public_key_path;
use crate::domain::{
    GlobalIdentity, Profile, ProfileError, Registry, validate_email, validate_profile_name,
};

// ── Lazily loaded registry ────────────────────────────────────────────────────

/// The registry document, loaded from its store on first access.
pub struct ProfileRegistry<S> {
    store: S,
    loaded: Option<Registry>,
    load_warning: Option<String>,
}

impl<S: RegistryStore> ProfileRegistry<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            loaded: None,
            load_warning: None,
        }
    }

    /// The registry, loading it on first call.
    ///
    /// A missing store is an empty registry. An unreadable store is also
    /// treated as empty; the reason is kept for [`Self::take_load_warning`]
    /// and the next save overwrites the unreadable document.
    pub fn registry(&mut self) -> &Registry {
        self.ensure_loaded()
    }

    fn ensure_loaded(&mut self) -> &mut Registry {
        if self.loaded.is_none() {
            let registry = match self.store.load() {
                Ok(Some(registry)) => registry,
                Ok(None) => Registry::new(),
                Err(e) => {
                    tracing::warn!(error = %e, "registry unreadable, starting empty");
                    self.load_warning = Some(format!(
                        "could not read {} ({e:#}); treating it as empty",
                        self.store.location().display()
                    ));
                    Registry::new()
                }
            };
            self.loaded = Some(registry);
        }
        self.loaded.get_or_insert_with(Registry::new)
    }

    /// Mutable access; changes are kept in memory until [`Self::save`].
    pub fn registry_mut(&mut self) -> &mut Registry {
        self.ensure_loaded()
    }

    /// Rewrite the store with the in-memory registry.
    ///
    /// # Errors
    ///
    /// `ProfileError::PersistFailed` if the store cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let registry = self.ensure_loaded().clone();
        self.store
            .save(&registry)
            .map_err(|e| ProfileError::PersistFailed(format!("{e:#}")).into())
    }

    /// The load failure message, if the last load fell back to empty.
    pub fn take_load_warning(&mut self) -> Option<String> {
        self.load_warning.take()
    }

    /// Location of the backing store.
    pub fn location(&self) -> PathBuf {
        self.store.location()
    }
}

// ── Add ───────────────────────────────────────────────────────────────────────

/// Input to [`add_profile`].
#[derive(Debug, Clone, Copy)]
pub struct NewProfile<'a> {
    pub name: &'a str,
    pub email: &'a str,
    /// Commit author name; the profile name is used when absent or blank.
    pub display_name: Option<&'a str>,
    /// Empty for an unencrypted key.
    pub passphrase: &'a str,
}

/// Result of a successful [`add_profile`].
#[derive(Debug, Clone)]
pub struct AddedProfile {
    pub name: String,
    pub profile: Profile,
    /// `false` when an existing key on disk was reused.
    pub key_created: bool,
}

/// Validate `request`, provision its key and route, persist the profile and
/// make it the global identity.
///
/// Side effects of a failed add are undone: keys this call generated and the
/// stanza it appended are removed again.
///
/// # Errors
///
/// `InvalidName`, `InvalidEmail` or `DuplicateProfile` before anything is
/// touched; `KeyGenerationFailed`, `RouteEditFailed` or `PersistFailed` from
/// provisioning and saving.
pub async fn add_profile<S: RegistryStore>(
    registry: &mut ProfileRegistry<S>,
    keys: &impl KeyGenerator,
    routes: &impl RouteEditor,
    fs: &impl LocalFs,
    identity: &impl IdentityStore,
    reporter: &impl ProgressReporter,
    request: &NewProfile<'_>,
) -> Result<AddedProfile> {
    validate_profile_name(request.name)?;
    validate_email(request.email)?;
    if registry.registry().contains(request.name) {
        return Err(ProfileError::DuplicateProfile(request.name.to_string()).into());
    }
    let display_name = request
        .display_name
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(request.name);

    reporter.step(&format!("provisioning SSH key for '{}'...", request.name));
    let outcome = keys
        .generate(&KeyRequest {
            profile: request.name,
            email: request.email,
            passphrase: request.passphrase,
        })
        .await?;
    if outcome.created {
        reporter.success(&format!("key generated at {}", outcome.key_path.display()));
    } else {
        reporter.warn(&format!(
            "reusing existing key at {}",
            outcome.key_path.display()
        ));
    }

    let profile = Profile::new(display_name, request.email).with_key(&outcome.key_path);
    registry
        .registry_mut()
        .insert(request.name, profile.clone());
    if let Err(e) = registry.save() {
        registry.registry_mut().remove(request.name);
        if outcome.route_added {
            if let Err(route_err) = routes.remove_route(request.name) {
                tracing::warn!(error = %route_err, "could not roll back routing stanza");
            }
        }
        if outcome.created {
            for path in [outcome.key_path.clone(), public_key_path(&outcome.key_path)] {
                if let Err(fs_err) = fs.remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %fs_err, "could not roll back key file");
                }
            }
        }
        return Err(e);
    }

    match identity.set(&profile.identity()).await {
        Ok(()) => reporter.success(&format!(
            "global identity set to {} <{}>",
            profile.display_name, profile.email
        )),
        Err(e) => reporter.warn(&format!("could not set global identity: {e:#}")),
    }

    Ok(AddedProfile {
        name: request.name.to_string(),
        profile,
        key_created: outcome.created,
    })
}

// ── Remove ────────────────────────────────────────────────────────────────────

/// What [`remove_profile`] managed to tear down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// The global identity belonged to the profile and was cleared.
    pub identity_cleared: bool,
    /// Key files that existed and were deleted.
    pub removed_files: Vec<PathBuf>,
    /// Routing stanzas removed.
    pub routes_removed: usize,
    /// Steps that failed; teardown carried on past each of them.
    pub failures: Vec<String>,
}

impl RemovalReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, reporter: &impl ProgressReporter, message: String) {
        reporter.warn(&message);
        self.failures.push(message);
    }
}

/// Remove `name`: clear the identity if it is active, delete key files,
/// remove routing stanzas, then drop and persist the registry entry.
///
/// Each step is attempted even if an earlier one failed.
///
/// # Errors
///
/// `ProfileNotFound` with no side effects, or `PersistFailed` if the final
/// registry save fails.
pub async fn remove_profile<S: RegistryStore>(
    registry: &mut ProfileRegistry<S>,
    routes: &impl RouteEditor,
    fs: &impl LocalFs,
    identity: &impl IdentityStore,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<RemovalReport> {
    let profile = registry
        .registry()
        .get(name)
        .cloned()
        .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))?;
    let mut report = RemovalReport::default();

    match identity.get().await {
        Ok(Some(current)) if profile.matches(&current) => match identity.clear().await {
            Ok(()) => report.identity_cleared = true,
            Err(e) => report.fail(reporter, format!("could not clear global identity: {e:#}")),
        },
        Ok(_) => {}
        Err(e) => report.fail(reporter, format!("could not read global identity: {e:#}")),
    }

    if let Some(key) = profile.key_path() {
        for path in [key.to_path_buf(), public_key_path(key)] {
            match fs.remove_file(&path) {
                Ok(true) => report.removed_files.push(path),
                Ok(false) => tracing::debug!(path = %path.display(), "key file already absent"),
                Err(e) => report.fail(reporter, format!("could not delete {}: {e:#}", path.display())),
            }
        }
    }

    match routes.remove_route(name) {
        Ok(n) => report.routes_removed = n,
        Err(e) => report.fail(
            reporter,
            ProfileError::RouteEditFailed(format!("{e:#}")).to_string(),
        ),
    }

    registry.registry_mut().remove(name);
    registry.save()?;
    Ok(report)
}

// ── Switch / list / current ───────────────────────────────────────────────────

/// Make `name` the global identity. Keys and routes are left untouched.
///
/// # Errors
///
/// `ProfileNotFound`, or the identity store's own failure.
pub async fn switch_profile<S: RegistryStore>(
    registry: &mut ProfileRegistry<S>,
    identity: &impl IdentityStore,
    name: &str,
) -> Result<Profile> {
    let profile = registry
        .registry()
        .get(name)
        .cloned()
        .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))?;
    identity.set(&profile.identity()).await?;
    Ok(profile)
}

/// One row of [`list_profiles`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub name: String,
    pub profile: Profile,
    /// The global identity equals this profile's identity.
    pub active: bool,
}

/// All profiles in name order, marking the one matching the global identity.
///
/// # Errors
///
/// Never fails on an unreadable identity; that only clears the marks.
pub async fn list_profiles<S: RegistryStore>(
    registry: &mut ProfileRegistry<S>,
    identity: &impl IdentityStore,
) -> Result<Vec<ProfileEntry>> {
    let current = identity.get().await.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "global identity unavailable");
        None
    });
    Ok(registry
        .registry()
        .iter()
        .map(|(name, profile)| ProfileEntry {
            name: name.clone(),
            profile: profile.clone(),
            active: current.as_ref().is_some_and(|id| profile.matches(id)),
        })
        .collect())
}

/// The global identity and the profile it belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentIdentity {
    pub identity: GlobalIdentity,
    pub profile: Option<String>,
}

/// Read the global identity and match it against the registry.
///
/// # Errors
///
/// Returns an error if the identity store cannot be read.
pub async fn current_identity<S: RegistryStore>(
    registry: &mut ProfileRegistry<S>,
    identity: &impl IdentityStore,
) -> Result<Option<CurrentIdentity>> {
    let Some(current) = identity.get().await? else {
        return Ok(None);
    };
    let profile = registry
        .registry()
        .find_by_identity(&current)
        .map(|(name, _)| name.clone());
    Ok(Some(CurrentIdentity {
        identity: current,
        profile,
    }))
}
