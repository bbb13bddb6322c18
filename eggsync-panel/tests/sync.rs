use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;

use eggsync_panel::{
    DRY_RUN_NEST_ID, EggSummary, Nest, PanelApi, PanelError, SyncError, SyncEvent, SyncOptions,
    SyncTally, sync_eggs,
};

/// In-memory stand-in for the panel. The mutation counters track network
/// calls, so the dry-run branches leave them untouched just like the real
/// client does.
#[derive(Default)]
struct FakePanel {
    dry_run: bool,
    fail_list_nests: bool,
    fail_list_eggs: bool,
    fail_create: Vec<String>,
    nests: RefCell<Vec<Nest>>,
    eggs: RefCell<HashMap<i64, Vec<String>>>,
    next_id: Cell<i64>,
    list_nest_calls: Cell<usize>,
    list_egg_calls: Cell<usize>,
    create_calls: Cell<usize>,
    import_calls: Cell<usize>,
}

impl FakePanel {
    fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    fn with_nest(&self, name: &str) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.nests.borrow_mut().push(Nest {
            id,
            name: name.to_string(),
            description: None,
        });
        self.eggs.borrow_mut().insert(id, Vec::new());
        id
    }

    fn add_egg(&self, nest_id: i64, name: &str) {
        self.eggs
            .borrow_mut()
            .entry(nest_id)
            .or_default()
            .push(name.to_string());
    }

    fn egg_names(&self, nest_id: i64) -> Vec<String> {
        self.eggs
            .borrow()
            .get(&nest_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl PanelApi for FakePanel {
    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn list_nests(&self) -> Result<Vec<Nest>, PanelError> {
        self.list_nest_calls.set(self.list_nest_calls.get() + 1);
        if self.fail_list_nests {
            return Err(PanelError::api(500, "nest listing unavailable"));
        }
        Ok(self.nests.borrow().clone())
    }

    fn create_nest(&self, name: &str, description: &str) -> Result<Nest, PanelError> {
        if self.dry_run {
            return Ok(Nest {
                id: DRY_RUN_NEST_ID,
                name: name.to_string(),
                description: Some(description.to_string()),
            });
        }
        self.create_calls.set(self.create_calls.get() + 1);
        if self.fail_create.iter().any(|n| n == name) {
            return Err(PanelError::api(422, "nest rejected"));
        }
        let id = self.with_nest(name);
        Ok(Nest {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
        })
    }

    fn list_eggs(&self, nest_id: i64) -> Result<Vec<EggSummary>, PanelError> {
        self.list_egg_calls.set(self.list_egg_calls.get() + 1);
        if self.fail_list_eggs {
            return Err(PanelError::api(500, "egg listing unavailable"));
        }
        Ok(self
            .egg_names(nest_id)
            .into_iter()
            .map(|name| EggSummary { name })
            .collect())
    }

    fn import_egg(&self, nest_id: i64, egg: &Value) -> Result<Value, PanelError> {
        if self.dry_run {
            return Ok(Value::Null);
        }
        self.import_calls.set(self.import_calls.get() + 1);
        let name = egg["name"].as_str().unwrap_or("?");
        self.add_egg(nest_id, name);
        Ok(Value::Null)
    }
}

fn write_egg(root: &Path, rel: &str, name: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, json!({ "name": name }).to_string()).unwrap();
}

fn options(root: &Path) -> SyncOptions {
    SyncOptions {
        import_delay: Duration::ZERO,
        ..SyncOptions::new(root.to_path_buf())
    }
}

fn run(panel: &FakePanel, opts: &SyncOptions) -> (Result<SyncTally, SyncError>, Vec<SyncEvent>) {
    let events = RefCell::new(Vec::new());
    let result = sync_eggs(panel, opts, &|e| events.borrow_mut().push(e));
    (result, events.into_inner())
}

#[test]
fn fresh_panel_gets_one_create_and_two_imports() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "minecraft/egg-forge.json", "Forge");

    let panel = FakePanel::new();
    let (result, events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.imported, 2);
    assert_eq!(tally.skipped, 0);
    assert_eq!(tally.failed, 0);
    assert!(tally.is_clean());

    assert_eq!(panel.create_calls.get(), 1);
    assert_eq!(panel.import_calls.get(), 2);
    let nests = panel.nests.borrow();
    assert_eq!(nests.len(), 1);
    assert_eq!(nests[0].name, "Minecraft");
    // Scan order: egg-forge sorts before egg-vanilla.
    assert_eq!(panel.egg_names(nests[0].id), vec!["Forge", "Vanilla"]);

    let creates = events
        .iter()
        .filter(|e| matches!(e, SyncEvent::NestCreating { .. }))
        .count();
    assert_eq!(creates, 1);
}

#[test]
fn existing_egg_is_skipped_new_one_imported() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "minecraft/egg-forge.json", "Forge");

    let panel = FakePanel::new();
    let id = panel.with_nest("Minecraft");
    panel.add_egg(id, "Vanilla");

    let (result, events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.imported, 1);
    assert_eq!(tally.skipped, 1);
    assert_eq!(tally.failed, 0);
    assert_eq!(panel.create_calls.get(), 0);
    assert_eq!(panel.import_calls.get(), 1);
    assert!(events.iter().any(
        |e| matches!(e, SyncEvent::EggSkipped { name, .. } if name == "Vanilla")
    ));
    assert!(events.iter().any(
        |e| matches!(e, SyncEvent::EggImported { name, .. } if name == "Forge")
    ));
}

#[test]
fn nest_creation_failure_fails_whole_group_without_imports() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "rust/egg-rust.json", "Rust");
    write_egg(tmp.path(), "valheim/egg-valheim.json", "Valheim");
    write_egg(tmp.path(), "palworld/egg-palworld.json", "Palworld");

    let mut panel = FakePanel::new();
    panel.fail_create = vec!["Steam Games".to_string()];

    let (result, events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.failed, 3);
    assert_eq!(tally.imported, 0);
    assert_eq!(panel.import_calls.get(), 0);
    assert!(events.iter().any(
        |e| matches!(e, SyncEvent::NestFailed { name, egg_count, .. }
            if name == "Steam Games" && *egg_count == 3)
    ));
}

#[test]
fn run_continues_past_a_failed_nest() {
    let tmp = TempDir::new().unwrap();
    // "Minecraft" sorts before "Steam Games", so the failure comes first.
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "valheim/egg-valheim.json", "Valheim");

    let mut panel = FakePanel::new();
    panel.fail_create = vec!["Minecraft".to_string()];

    let (result, _events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.imported, 1);
    let nests = panel.nests.borrow();
    assert_eq!(nests.len(), 1);
    assert_eq!(nests[0].name, "Steam Games");
}

#[test]
fn nest_filter_drops_groups_before_any_remote_call() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");

    let panel = FakePanel::new();
    let mut opts = options(tmp.path());
    opts.nest_filter = Some("Source Engine".to_string());

    let (result, events) = run(&panel, &opts);

    assert_eq!(result.unwrap(), SyncTally::default());
    assert_eq!(panel.list_nest_calls.get(), 0);
    assert!(events.iter().any(|e| matches!(e, SyncEvent::NothingToDo)));
}

#[test]
fn nest_filter_keeps_matching_group() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "gmod/egg-gmod.json", "Garry's Mod");
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");

    let panel = FakePanel::new();
    let mut opts = options(tmp.path());
    opts.nest_filter = Some("Source Engine".to_string());

    let (result, _events) = run(&panel, &opts);

    assert_eq!(result.unwrap().imported, 1);
    let nests = panel.nests.borrow();
    assert_eq!(nests.len(), 1);
    assert_eq!(nests[0].name, "Source Engine");
}

#[test]
fn dry_run_counts_work_but_mutates_nothing() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "minecraft/egg-forge.json", "Forge");

    let mut panel = FakePanel::new();
    panel.dry_run = true;

    let (result, events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.imported, 2);
    assert_eq!(panel.create_calls.get(), 0);
    assert_eq!(panel.import_calls.get(), 0);
    // Listing a nest's eggs is also skipped: nothing real exists yet.
    assert_eq!(panel.list_egg_calls.get(), 0);
    assert!(panel.nests.borrow().is_empty());
    assert!(events.iter().any(
        |e| matches!(e, SyncEvent::NestCreated { id, .. } if *id == DRY_RUN_NEST_ID)
    ));
}

#[test]
fn second_run_against_unchanged_state_is_all_skip() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "minecraft/egg-forge.json", "Forge");

    let panel = FakePanel::new();
    let opts = options(tmp.path());

    let first = sync_eggs(&panel, &opts, &|_| {}).unwrap();
    assert_eq!(first.imported, 2);

    let second = sync_eggs(&panel, &opts, &|_| {}).unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(second.failed, 0);
}

#[test]
fn dry_run_degrades_when_nest_listing_fails() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");

    let mut panel = FakePanel::new();
    panel.dry_run = true;
    panel.fail_list_nests = true;

    let (result, events) = run(&panel, &options(tmp.path()));

    assert_eq!(result.unwrap().imported, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SyncEvent::NestListingUnavailable { .. })));
}

#[test]
fn live_nest_listing_failure_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");

    let mut panel = FakePanel::new();
    panel.fail_list_nests = true;

    let (result, _events) = run(&panel, &options(tmp.path()));

    assert!(matches!(result, Err(SyncError::FetchNests(_))));
    assert_eq!(panel.import_calls.get(), 0);
}

#[test]
fn egg_listing_failure_falls_back_to_importing_everything() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");

    let mut panel = FakePanel::new();
    panel.fail_list_eggs = true;
    let id = panel.with_nest("Minecraft");
    panel.add_egg(id, "Vanilla");

    let (result, _events) = run(&panel, &options(tmp.path()));

    // Forward progress over strict duplicate prevention: the import is
    // attempted even though the egg already exists remotely.
    let tally = result.unwrap();
    assert_eq!(tally.imported, 1);
    assert_eq!(tally.skipped, 0);
    assert_eq!(panel.import_calls.get(), 1);
}

#[test]
fn malformed_egg_file_counts_as_failed() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    let bad = tmp.path().join("minecraft/egg-bad.json");
    fs::write(&bad, "{not json").unwrap();

    let panel = FakePanel::new();
    let (result, _events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.imported, 1);
    assert_eq!(tally.failed, 1);
    assert!(!tally.is_clean());
}

#[test]
fn duplicate_names_within_one_run_import_only_once() {
    let tmp = TempDir::new().unwrap();
    write_egg(tmp.path(), "minecraft/egg-vanilla.json", "Vanilla");
    write_egg(tmp.path(), "minecraft/java/egg-vanilla-copy.json", "Vanilla");

    let panel = FakePanel::new();
    let (result, _events) = run(&panel, &options(tmp.path()));

    let tally = result.unwrap();
    assert_eq!(tally.imported, 1);
    assert_eq!(tally.skipped, 1);
    assert_eq!(panel.import_calls.get(), 1);
}
