use std::env;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use eggsync_panel::{PanelClient, SyncEvent, SyncOptions, SyncTally, sync_eggs};

const URL_ENV: &str = "PTERO_URL";
const API_KEY_ENV: &str = "PTERO_API_KEY";

/// Run the sync command. Returns the process exit code.
pub(crate) fn run_sync(
    url: Option<String>,
    api_key: Option<String>,
    dry_run: bool,
    nest_name: Option<String>,
    repo_root: Option<PathBuf>,
) -> i32 {
    let Some(url) = url
        .or_else(|| env::var(URL_ENV).ok())
        .filter(|s| !s.is_empty())
    else {
        eprintln!("Panel URL is required (--url or {URL_ENV} env var).");
        return 1;
    };
    let Some(api_key) = api_key
        .or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|s| !s.is_empty())
    else {
        eprintln!("API key is required (--api-key or {API_KEY_ENV} env var).");
        return 1;
    };

    let root = match repo_root {
        Some(p) => p,
        None => match env::current_dir() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Could not determine current directory: {e}");
                return 1;
            }
        },
    };

    let client = match PanelClient::new(&url, &api_key, dry_run) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{} Could not create panel client: {e}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
            return 1;
        }
    };

    if dry_run {
        println!(
            "{}",
            "Dry run: no changes will be made".if_supports_color(Stdout, |t| t.dimmed()),
        );
        println!();
    }

    let mut options = SyncOptions::new(root);
    options.nest_filter = nest_name;

    match sync_eggs(&client, &options, &render_event) {
        Ok(tally) => {
            print_summary(&tally);
            if tally.is_clean() { 0 } else { 1 }
        }
        Err(e) => {
            eprintln!(
                "{} {e}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
            1
        }
    }
}

/// Render one progress event as a human-readable line.
fn render_event(event: SyncEvent) {
    match event {
        SyncEvent::Scanning => println!("Scanning repository for eggs ..."),
        SyncEvent::ScanComplete { total } => {
            println!("  Found {total} egg file(s).");
            println!();
        }
        SyncEvent::NothingToDo => {
            println!(
                "{}",
                "No eggs matched the given filter.".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::FetchingNests => println!("Fetching existing nests from panel ..."),
        SyncEvent::NestsFetched { names } => {
            let list = if names.is_empty() {
                "(none)".to_string()
            } else {
                names.join(", ")
            };
            println!("  Found {} existing nest(s): {list}", names.len());
            println!();
        }
        SyncEvent::NestListingUnavailable { message } => {
            log::warn!("Could not reach panel ({message}); assuming no nests exist yet.");
        }
        SyncEvent::NestStarted { name, egg_count } => {
            println!(
                "{} {}",
                name.if_supports_color(Stdout, |t| t.bold()),
                format!("({egg_count} egg(s))").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::NestCreating { name } => println!("  Creating nest '{name}' ..."),
        SyncEvent::NestCreated { id, .. } => {
            println!(
                "  {} Created nest with id={id}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            );
        }
        SyncEvent::NestFailed {
            name,
            message,
            egg_count,
        } => {
            eprintln!(
                "  {} Could not create nest '{name}' ({egg_count} egg(s) failed): {message}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
        }
        SyncEvent::EggSkipped { name, .. } => {
            println!(
                "  {} {name} (already exists)",
                "SKIP".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
        SyncEvent::EggImporting { name, path, .. } => {
            log::debug!("importing '{name}' from {}", path.display());
        }
        SyncEvent::EggImported { name, .. } => {
            println!(
                "  {} {name}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            );
        }
        SyncEvent::EggFailed { name, message, .. } => {
            eprintln!(
                "  {} {name}: {message}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
        }
        SyncEvent::Done { .. } => {}
    }
}

fn print_summary(tally: &SyncTally) {
    println!();
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!(
        "  {} {} imported",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        tally.imported,
    );
    println!(
        "  {} {} skipped (already existed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        tally.skipped,
    );
    if tally.failed > 0 {
        println!(
            "  {} {} failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            tally.failed,
        );
    }
}
