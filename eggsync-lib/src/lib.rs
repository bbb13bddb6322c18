//! Core pieces of the eggsync tool: the egg file scanner and the static
//! slug-to-nest classification table.
//!
//! Everything here is pure and local; talking to the panel lives in
//! `eggsync-panel`.

pub mod nests;
pub mod scanner;

pub use nests::{DEFAULT_NEST, classify, make_identifier, nest_names, slugs_for_nest};
pub use scanner::{EggFile, egg_name, load_egg, scan_eggs};
