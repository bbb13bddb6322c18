//! The sync orchestrator: one full reconciliation run from local egg files
//! to panel state.
//!
//! Nothing persists between runs. Each run rescans the repository, refetches
//! the panel's nests, and walks nests in sorted name order (scan order within
//! a nest) so repeated dry-runs over the same inputs produce identical
//! output.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use eggsync_lib::{EggFile, classify, egg_name, load_egg, scan_eggs};

use crate::client::PanelClient;
use crate::error::PanelError;
use crate::types::{DRY_RUN_NEST_ID, EggSummary, Nest};

/// Fixed pause after each successful live import, to stay under the panel's
/// rate limits. Not a retry or backoff mechanism.
pub const IMPORT_DELAY: Duration = Duration::from_millis(300);

/// The remote operations the orchestrator needs. [`PanelClient`] is the real
/// implementation; tests substitute an in-memory fake.
pub trait PanelApi {
    fn is_dry_run(&self) -> bool;
    fn list_nests(&self) -> Result<Vec<Nest>, PanelError>;
    fn create_nest(&self, name: &str, description: &str) -> Result<Nest, PanelError>;
    fn list_eggs(&self, nest_id: i64) -> Result<Vec<EggSummary>, PanelError>;
    fn import_egg(&self, nest_id: i64, egg: &Value) -> Result<Value, PanelError>;
}

impl PanelApi for PanelClient {
    fn is_dry_run(&self) -> bool {
        PanelClient::is_dry_run(self)
    }

    fn list_nests(&self) -> Result<Vec<Nest>, PanelError> {
        PanelClient::list_nests(self)
    }

    fn create_nest(&self, name: &str, description: &str) -> Result<Nest, PanelError> {
        PanelClient::create_nest(self, name, description)
    }

    fn list_eggs(&self, nest_id: i64) -> Result<Vec<EggSummary>, PanelError> {
        PanelClient::list_eggs(self, nest_id)
    }

    fn import_egg(&self, nest_id: i64, egg: &Value) -> Result<Value, PanelError> {
        PanelClient::import_egg(self, nest_id, egg)
    }
}

/// Options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Repository root to scan for `egg-*.json` files.
    pub root: PathBuf,
    /// Only process the nest with exactly this name.
    pub nest_filter: Option<String>,
    /// Pause between successful live imports.
    pub import_delay: Duration,
}

impl SyncOptions {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            nest_filter: None,
            import_delay: IMPORT_DELAY,
        }
    }
}

/// Per-run counters. `failed > 0` means the process should exit non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncTally {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncTally {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Progress events emitted during a run, consumed by the CLI for rendering.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Scanning the repository for egg files.
    Scanning,
    /// Scan complete; total egg files found (before filtering).
    ScanComplete { total: usize },
    /// No egg groups remain after applying the nest filter.
    NothingToDo,
    /// Fetching the panel's existing nests.
    FetchingNests,
    /// Nest listing complete; existing nest names, sorted.
    NestsFetched { names: Vec<String> },
    /// Nest listing failed in dry-run mode; continuing with none.
    NestListingUnavailable { message: String },
    /// Starting to process one nest group.
    NestStarted { name: String, egg_count: usize },
    /// The nest is missing remotely and is being created.
    NestCreating { name: String },
    /// Nest created ([`DRY_RUN_NEST_ID`] in dry-run mode).
    NestCreated { name: String, id: i64 },
    /// Nest creation failed; its whole group is counted as failed.
    NestFailed {
        name: String,
        message: String,
        egg_count: usize,
    },
    /// An egg with this name already exists in the nest.
    EggSkipped { nest: String, name: String },
    /// Importing an egg.
    EggImporting {
        nest: String,
        name: String,
        path: PathBuf,
    },
    /// Import succeeded.
    EggImported { nest: String, name: String },
    /// The egg file could not be loaded or the import was rejected.
    EggFailed {
        nest: String,
        name: String,
        message: String,
    },
    /// Run complete.
    Done { tally: SyncTally },
}

/// Errors that abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Live-mode nest listing failed; running without knowing the true
    /// remote state is not allowed.
    #[error("Could not fetch nests: {0}")]
    FetchNests(#[from] PanelError),
}

/// Run one full reconciliation: scan, classify, group, then create missing
/// nests and import missing eggs.
pub fn sync_eggs(
    client: &impl PanelApi,
    options: &SyncOptions,
    progress: &impl Fn(SyncEvent),
) -> Result<SyncTally, SyncError> {
    progress(SyncEvent::Scanning);
    let eggs = scan_eggs(&options.root).map_err(|source| SyncError::Scan {
        path: options.root.clone(),
        source,
    })?;
    progress(SyncEvent::ScanComplete { total: eggs.len() });

    // Group by nest; BTreeMap gives the sorted processing order. Scan order
    // is preserved within each group.
    let mut groups: BTreeMap<&'static str, Vec<EggFile>> = BTreeMap::new();
    for egg in eggs {
        let nest = classify(&egg.slug);
        if let Some(ref filter) = options.nest_filter {
            if nest != filter.as_str() {
                continue;
            }
        }
        groups.entry(nest).or_default().push(egg);
    }

    if groups.is_empty() {
        progress(SyncEvent::NothingToDo);
        return Ok(SyncTally::default());
    }

    progress(SyncEvent::FetchingNests);
    let mut nest_ids: HashMap<String, i64> = match client.list_nests() {
        Ok(nests) => nests.into_iter().map(|n| (n.name, n.id)).collect(),
        Err(e) if client.is_dry_run() => {
            // A preview must not be blocked by an unreachable panel.
            progress(SyncEvent::NestListingUnavailable {
                message: e.to_string(),
            });
            HashMap::new()
        }
        Err(e) => return Err(SyncError::FetchNests(e)),
    };
    let mut existing_names: Vec<String> = nest_ids.keys().cloned().collect();
    existing_names.sort_unstable();
    progress(SyncEvent::NestsFetched {
        names: existing_names,
    });

    let mut tally = SyncTally::default();

    for (nest_name, group) in &groups {
        progress(SyncEvent::NestStarted {
            name: nest_name.to_string(),
            egg_count: group.len(),
        });

        let nest_id = match nest_ids.get(*nest_name) {
            Some(&id) => id,
            None => {
                progress(SyncEvent::NestCreating {
                    name: nest_name.to_string(),
                });
                let description = format!("{nest_name} (auto-created by eggsync)");
                match client.create_nest(nest_name, &description) {
                    Ok(nest) => {
                        nest_ids.insert(nest_name.to_string(), nest.id);
                        progress(SyncEvent::NestCreated {
                            name: nest_name.to_string(),
                            id: nest.id,
                        });
                        nest.id
                    }
                    Err(e) => {
                        // One bad nest must not abort the run.
                        progress(SyncEvent::NestFailed {
                            name: nest_name.to_string(),
                            message: e.to_string(),
                            egg_count: group.len(),
                        });
                        tally.failed += group.len();
                        continue;
                    }
                }
            }
        };

        // Egg names already in this nest, for duplicate detection. Owned by
        // this loop body; never shared across nests or runs. Skipped in
        // dry-run mode and for nests that only exist as a dry-run placeholder.
        let mut existing: HashSet<String> = HashSet::new();
        if !client.is_dry_run() && nest_id != DRY_RUN_NEST_ID {
            match client.list_eggs(nest_id) {
                Ok(list) => existing = list.into_iter().map(|e| e.name).collect(),
                Err(e) => {
                    // Not fatal: import everything and let the panel reject
                    // duplicates.
                    log::warn!("Could not list eggs for nest '{nest_name}': {e}");
                }
            }
        }

        for egg in group {
            let Some(payload) = load_egg(&egg.path) else {
                tally.failed += 1;
                continue;
            };
            let name = egg_name(&payload, &egg.path);

            if existing.contains(&name) {
                progress(SyncEvent::EggSkipped {
                    nest: nest_name.to_string(),
                    name,
                });
                tally.skipped += 1;
                continue;
            }

            progress(SyncEvent::EggImporting {
                nest: nest_name.to_string(),
                name: name.clone(),
                path: egg.path.clone(),
            });
            match client.import_egg(nest_id, &payload) {
                Ok(_) => {
                    // Suppresses re-import when the local tree holds two eggs
                    // with the same name.
                    existing.insert(name.clone());
                    progress(SyncEvent::EggImported {
                        nest: nest_name.to_string(),
                        name,
                    });
                    tally.imported += 1;
                    if !client.is_dry_run() && !options.import_delay.is_zero() {
                        thread::sleep(options.import_delay);
                    }
                }
                Err(e) => {
                    progress(SyncEvent::EggFailed {
                        nest: nest_name.to_string(),
                        name,
                        message: e.to_string(),
                    });
                    tally.failed += 1;
                }
            }
        }
    }

    progress(SyncEvent::Done { tally });
    Ok(tally)
}
