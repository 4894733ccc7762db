use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const JITTER_SEED_X: u64 = 0x9e37_79b9_7f4a_7c15;
const JITTER_SEED_Y: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// Maps `id` into `[-1, 1]` using a hash seeded with `seed`.
///
/// `DefaultHasher::new` uses fixed keys, so the value only depends on the
/// inputs and never on process state.
pub fn stable_unit(id: &str, seed: u64) -> f32 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let unit = ((hash >> 11) as f64 / (1u64 << 53) as f64) as f32;
    (unit * 2.0) - 1.0
}

/// Two independent values in `[-1, 1]` derived from `id`.
pub fn stable_pair(id: &str) -> (f32, f32) {
    (stable_unit(id, JITTER_SEED_X), stable_unit(id, JITTER_SEED_Y))
}

/// Entity identifiers are stored as `Domain_Variant`.
pub fn display_entity(entity: &str) -> String {
    entity.replace('_', " ")
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_repeatable_and_bounded() {
        for id in ["#021", "#022", "", "a much longer identifier"] {
            let first = stable_pair(id);
            let second = stable_pair(id);
            assert_eq!(first, second);
            assert!((-1.0..=1.0).contains(&first.0));
            assert!((-1.0..=1.0).contains(&first.1));
        }
    }

    #[test]
    fn stable_pair_axes_differ() {
        let (x, y) = stable_pair("#030");
        assert_ne!(x, y);
    }

    #[test]
    fn display_entity_replaces_underscores() {
        assert_eq!(display_entity("Causation_Alpha"), "Causation Alpha");
        assert_eq!(display_entity("plain"), "plain");
    }

    #[test]
    fn truncate_chars_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_chars("short", 150), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }
}
