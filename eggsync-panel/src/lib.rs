//! Pterodactyl application-API client and the egg sync orchestrator.
//!
//! [`client::PanelClient`] is a thin blocking HTTP facade over the four
//! remote operations the sync needs; [`sync::sync_eggs`] composes it with the
//! scanner and classifier from `eggsync-lib` into one reconciliation run.

pub mod client;
pub mod error;
pub mod sync;
pub mod types;

pub use client::PanelClient;
pub use error::PanelError;
pub use sync::{PanelApi, SyncError, SyncEvent, SyncOptions, SyncTally, sync_eggs};
pub use types::{DRY_RUN_NEST_ID, EggSummary, Nest};
