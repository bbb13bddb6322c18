use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use eggsync_lib::{DEFAULT_NEST, make_identifier, nest_names, slugs_for_nest};

/// Print the nest taxonomy from the static classification table. No network.
pub(crate) fn run_nests() -> i32 {
    println!("{}", "Nests:".if_supports_color(Stdout, |t| t.bold()));
    println!();

    for nest in nest_names() {
        let slugs = slugs_for_nest(nest);
        println!(
            "  {} [{}]{}",
            nest.if_supports_color(Stdout, |t| t.bold()),
            make_identifier(nest).if_supports_color(Stdout, |t| t.cyan()),
            if nest == DEFAULT_NEST {
                format!(
                    " {}",
                    "(default for unmapped slugs)".if_supports_color(Stdout, |t| t.dimmed()),
                )
            } else {
                String::new()
            },
        );
        println!("    {} slug(s): {}", slugs.len(), slugs.join(", "));
    }
    0
}
