//! Static slug-to-nest classification table.
//!
//! Maps the top-level directory name of an egg (the game slug) to the nest
//! display name it should be imported into. Keys must match the exact
//! directory name on disk (case-sensitive). Slugs not listed here fall into
//! [`DEFAULT_NEST`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// Nest used for every slug that has no entry in [`NEST_MAP`].
pub const DEFAULT_NEST: &str = "Custom Games";

/// Full slug-to-nest mapping, grouped by nest.
pub static NEST_MAP: &[(&str, &str)] = &[
    // Minecraft
    ("minecraft", "Minecraft"),
    // Source Engine
    ("counter_strike", "Source Engine"),
    ("gmod", "Source Engine"),
    ("half_life_2_deathmatch", "Source Engine"),
    ("hlds_server", "Source Engine"),
    ("left4dead", "Source Engine"),
    ("left4dead_2", "Source Engine"),
    ("nmrih", "Source Engine"),
    ("open_fortress", "Source Engine"),
    ("svencoop", "Source Engine"),
    ("team_fortress_2_classic", "Source Engine"),
    ("contagion", "Source Engine"),
    ("fof", "Source Engine"),
    ("sourcecoop", "Source Engine"),
    ("black_mesa", "Source Engine"),
    // Steam Games
    ("7_days_to_die", "Steam Games"),
    ("Aska", "Steam Games"),
    ("abiotic_factor", "Steam Games"),
    ("aloft", "Steam Games"),
    ("ark_survival_ascended", "Steam Games"),
    ("ark_survival_evolved", "Steam Games"),
    ("arma", "Steam Games"),
    ("avorion", "Steam Games"),
    ("banana_shooter", "Steam Games"),
    ("barotrauma", "Steam Games"),
    ("battalion_legacy", "Steam Games"),
    ("citadel", "Steam Games"),
    ("conan_exiles", "Steam Games"),
    ("core_keeper", "Steam Games"),
    ("craftopia", "Steam Games"),
    ("cryofall", "Steam Games"),
    ("cubic_odyssey", "Steam Games"),
    ("dayz", "Steam Games"),
    ("ddnet", "Steam Games"),
    ("dont_starve", "Steam Games"),
    ("eco", "Steam Games"),
    ("empyrion", "Steam Games"),
    ("enshrouded", "Steam Games"),
    ("foundry", "Steam Games"),
    ("frozen_flame", "Steam Games"),
    ("holdfast", "Steam Games"),
    ("hurtworld", "Steam Games"),
    ("icarus", "Steam Games"),
    ("insurgency_sandstorm", "Steam Games"),
    ("killing_floor_2", "Steam Games"),
    ("longvinter", "Steam Games"),
    ("midnight_ghost_hunt", "Steam Games"),
    ("modiverse", "Steam Games"),
    ("mordhau", "Steam Games"),
    ("necesse", "Steam Games"),
    ("night_of_the_dead", "Steam Games"),
    ("no_love_lost", "Steam Games"),
    ("novalife_amboise", "Steam Games"),
    ("onset", "Steam Games"),
    ("operation_harsh_doorstop", "Steam Games"),
    ("palworld", "Steam Games"),
    ("pavlov_vr", "Steam Games"),
    ("pixark", "Steam Games"),
    ("plains_of_pain", "Steam Games"),
    ("portal_knights", "Steam Games"),
    ("post_scriptum", "Steam Games"),
    ("project_zomboid", "Steam Games"),
    ("quake_live", "Steam Games"),
    ("return_to_moria", "Steam Games"),
    ("rising_world", "Steam Games"),
    ("risk_of_rain_2", "Steam Games"),
    ("rust", "Steam Games"),
    ("satisfactory", "Steam Games"),
    ("scpsl", "Steam Games"),
    ("scum", "Steam Games"),
    ("smalland_survive_the_wilds", "Steam Games"),
    ("soldat", "Steam Games"),
    ("sonsoftheforest", "Steam Games"),
    ("soulmask", "Steam Games"),
    ("squad", "Steam Games"),
    ("starbound", "Steam Games"),
    ("stationeers", "Steam Games"),
    ("stormworks", "Steam Games"),
    ("subnautica_nitrox_mod", "Steam Games"),
    ("terratech_worlds", "Steam Games"),
    ("the_forest", "Steam Games"),
    ("the_isle", "Steam Games"),
    ("thefront", "Steam Games"),
    ("tower_unite", "Steam Games"),
    ("truck-simulator", "Steam Games"),
    ("unturned", "Steam Games"),
    ("v_rising", "Steam Games"),
    ("valheim", "Steam Games"),
    // Space / simulation
    ("astroneer", "Simulation Games"),
    ("astro_colony", "Simulation Games"),
    ("ksp", "Simulation Games"),
    ("space_engineers", "Simulation Games"),
    // Racing
    ("assetto_corsa", "Racing Games"),
    ("automobilista2", "Racing Games"),
    ("trackmania", "Racing Games"),
    // Role-play / social
    ("among_us", "Roleplay & Social"),
    ("gta", "Roleplay & Social"),
    ("losangelescrimes", "Roleplay & Social"),
    ("neosvr", "Roleplay & Social"),
    ("resonite", "Roleplay & Social"),
    // Survival / sandbox
    ("colony_survival", "Survival & Sandbox"),
    ("ground_breach", "Survival & Sandbox"),
    ("humanitz", "Survival & Sandbox"),
    ("rimworld", "Survival & Sandbox"),
    ("sunkenland", "Survival & Sandbox"),
    ("vintage_story", "Survival & Sandbox"),
    ("wurm_unlimited", "Survival & Sandbox"),
    // Indie / custom
    ("Archean", "Custom Games"),
    ("League Sandbox", "Custom Games"),
    ("Nazi Zombies Portable", "Custom Games"),
    ("Nightingale", "Custom Games"),
    ("SuperTuxKart", "Custom Games"),
    ("americas_army", "Custom Games"),
    ("beamng", "Custom Games"),
    ("brickadia", "Custom Games"),
    ("classicube", "Custom Games"),
    ("clone_hero", "Custom Games"),
    ("cod", "Custom Games"),
    ("cs2d", "Custom Games"),
    ("cubeengine", "Custom Games"),
    ("ddracenetwork", "Custom Games"),
    ("dead_matter", "Custom Games"),
    ("doom", "Custom Games"),
    ("eft", "Custom Games"),
    ("factorio", "Custom Games"),
    ("fortresscraft_evolved", "Custom Games"),
    ("foundry_vtt", "Custom Games"),
    ("ftl_tachyon", "Custom Games"),
    ("hogwarp", "Custom Games"),
    ("hytale", "Custom Games"),
    ("just_cause", "Custom Games"),
    ("mindustry", "Custom Games"),
    ("minetest", "Custom Games"),
    ("mohaa", "Custom Games"),
    ("mount_blade_II_bannerlord", "Custom Games"),
    ("myth_of_empires", "Custom Games"),
    ("neverwinter_nights_ee", "Custom Games"),
    ("nuclear_option", "Custom Games"),
    ("openarena", "Custom Games"),
    ("openra", "Custom Games"),
    ("openrct2", "Custom Games"),
    ("openttd", "Custom Games"),
    ("path_of_titans", "Custom Games"),
    ("puck", "Custom Games"),
    ("r5reloaded", "Custom Games"),
    ("rdr", "Custom Games"),
    ("renown", "Custom Games"),
    ("solace_crafting", "Custom Games"),
    ("soldat_2", "Custom Games"),
    ("sonic_robo_blast_2", "Custom Games"),
    ("spacestation_14", "Custom Games"),
    ("starmade", "Custom Games"),
    ("swords_'n_Magic_and_Stuff", "Custom Games"),
    ("teeworlds", "Custom Games"),
    ("terraria", "Custom Games"),
    ("urbanterror", "Custom Games"),
    ("vein", "Custom Games"),
    ("veloren", "Custom Games"),
    ("voyagers_of_nera", "Custom Games"),
    ("wine", "Custom Games"),
    ("wolfenstein_enemy_territory", "Custom Games"),
    ("xonotic", "Custom Games"),
];

static NEST_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NEST_MAP.iter().copied().collect());

/// Classify a game slug into its nest display name.
///
/// Total function: slugs absent from the table resolve to [`DEFAULT_NEST`].
pub fn classify(slug: &str) -> &'static str {
    NEST_INDEX.get(slug).copied().unwrap_or(DEFAULT_NEST)
}

/// Derive the short identifier used when creating a nest.
///
/// Lower-cases the display name and normalizes spaces, slashes, and
/// ampersands. The substitutions target disjoint characters, so the order
/// they run in does not matter.
pub fn make_identifier(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .replace('/', "_")
        .replace('&', "and")
}

/// All distinct nest display names, sorted. Always includes [`DEFAULT_NEST`].
pub fn nest_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = NEST_MAP.iter().map(|(_, nest)| *nest).collect();
    names.push(DEFAULT_NEST);
    names.sort_unstable();
    names.dedup();
    names
}

/// All slugs mapped to the given nest, in table order.
pub fn slugs_for_nest(nest: &str) -> Vec<&'static str> {
    NEST_MAP
        .iter()
        .filter(|(_, n)| *n == nest)
        .map(|(slug, _)| *slug)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_slugs() {
        assert_eq!(classify("minecraft"), "Minecraft");
        assert_eq!(classify("gmod"), "Source Engine");
        assert_eq!(classify("valheim"), "Steam Games");
        assert_eq!(classify("ksp"), "Simulation Games");
        assert_eq!(classify("trackmania"), "Racing Games");
        assert_eq!(classify("among_us"), "Roleplay & Social");
        assert_eq!(classify("rimworld"), "Survival & Sandbox");
        assert_eq!(classify("factorio"), "Custom Games");
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(classify("Aska"), "Steam Games");
        assert_eq!(classify("aska"), DEFAULT_NEST);
    }

    #[test]
    fn unknown_slug_falls_back_to_default() {
        assert_eq!(classify("definitely_not_a_game"), DEFAULT_NEST);
        assert_eq!(classify(""), DEFAULT_NEST);
    }

    #[test]
    fn every_table_entry_classifies_to_its_mapped_nest() {
        for (slug, nest) in NEST_MAP {
            assert_eq!(classify(slug), *nest, "slug {slug:?}");
        }
    }

    #[test]
    fn identifier_substitutions() {
        assert_eq!(make_identifier("Minecraft"), "minecraft");
        assert_eq!(make_identifier("Steam Games"), "steam_games");
        assert_eq!(make_identifier("Roleplay & Social"), "roleplay_and_social");
        assert_eq!(make_identifier("A/B Test"), "a_b_test");
    }

    #[test]
    fn identifier_is_idempotent_after_first_pass() {
        for name in ["Steam Games", "Roleplay & Social", "Survival & Sandbox"] {
            let once = make_identifier(name);
            assert_eq!(make_identifier(&once), once);
        }
    }

    #[test]
    fn nest_names_are_sorted_and_distinct() {
        let names = nest_names();
        assert!(names.contains(&DEFAULT_NEST));
        assert!(names.contains(&"Minecraft"));
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn slugs_for_nest_returns_table_entries() {
        let racing = slugs_for_nest("Racing Games");
        assert_eq!(racing, vec!["assetto_corsa", "automobilista2", "trackmania"]);
        assert!(slugs_for_nest("No Such Nest").is_empty());
    }
}
