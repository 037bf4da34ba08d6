//! Musical key normalization
//!
//! Maps the raw key/scale spellings produced by the analyzer onto one of
//! 24 canonical short key names ("A", "Bbm", "F#m", ...). The analyzer and
//! its upstream models have emitted several spellings for the same key over
//! the years, so the table carries three conventions side by side:
//!
//! - full words: "AMAJOR", "BBMINOR"
//! - abbreviated: "AMAJ", "BBMIN"
//! - terse: "A" (major), "AM" (minor)
//!
//! Sharp and flat enharmonic spellings collapse to a single canonical form,
//! preferring flats for black keys. F# is the one exception: it keeps its
//! sharp spelling ("F#"/"F#m" rather than "Gb"/"Gbm").

use std::collections::HashMap;
use std::sync::LazyLock;

/// Raw `KEY + SCALE` spelling (upper-cased) -> canonical key name.
///
/// Kept as an exhaustive literal table rather than computed from pitch
/// arithmetic, so the exact legacy mapping is preserved. Note the terse
/// block only lists flat spellings for black keys; a bare "C#" with no
/// scale is not a recognized input.
const KEY_TABLE: &[(&str, &str)] = &[
    // Full word form
    ("AMAJOR", "A"),
    ("AMINOR", "Am"),
    ("A#MAJOR", "Bb"),
    ("A#MINOR", "Bbm"),
    ("BBMAJOR", "Bb"),
    ("BBMINOR", "Bbm"),
    ("BMAJOR", "B"),
    ("BMINOR", "Bm"),
    ("CMAJOR", "C"),
    ("CMINOR", "Cm"),
    ("C#MAJOR", "Db"),
    ("C#MINOR", "Dbm"),
    ("DBMAJOR", "Db"),
    ("DBMINOR", "Dbm"),
    ("DMAJOR", "D"),
    ("DMINOR", "Dm"),
    ("D#MAJOR", "Eb"),
    ("D#MINOR", "Ebm"),
    ("EBMAJOR", "Eb"),
    ("EBMINOR", "Ebm"),
    ("EMAJOR", "E"),
    ("EMINOR", "Em"),
    ("FMAJOR", "F"),
    ("FMINOR", "Fm"),
    ("F#MAJOR", "F#"),
    ("F#MINOR", "F#m"),
    ("GBMAJOR", "F#"),
    ("GBMINOR", "F#m"),
    ("GMAJOR", "G"),
    ("GMINOR", "Gm"),
    ("G#MAJOR", "Ab"),
    ("G#MINOR", "Abm"),
    ("ABMAJOR", "Ab"),
    ("ABMINOR", "Abm"),
    // Abbreviated form
    ("AMAJ", "A"),
    ("AMIN", "Am"),
    ("A#MAJ", "Bb"),
    ("A#MIN", "Bbm"),
    ("BBMAJ", "Bb"),
    ("BBMIN", "Bbm"),
    ("BMAJ", "B"),
    ("BMIN", "Bm"),
    ("CMAJ", "C"),
    ("CMIN", "Cm"),
    ("C#MAJ", "Db"),
    ("C#MIN", "Dbm"),
    ("DBMAJ", "Db"),
    ("DBMIN", "Dbm"),
    ("DMAJ", "D"),
    ("DMIN", "Dm"),
    ("D#MAJ", "Eb"),
    ("D#MIN", "Ebm"),
    ("EBMAJ", "Eb"),
    ("EBMIN", "Ebm"),
    ("EMAJ", "E"),
    ("EMIN", "Em"),
    ("FMAJ", "F"),
    ("FMIN", "Fm"),
    ("F#MAJ", "F#"),
    ("F#MIN", "F#m"),
    ("GBMAJ", "F#"),
    ("GBMIN", "F#m"),
    ("GMAJ", "G"),
    ("GMIN", "Gm"),
    ("G#MAJ", "Ab"),
    ("G#MIN", "Abm"),
    ("ABMAJ", "Ab"),
    ("ABMIN", "Abm"),
    // Terse form (scale folded into the key string)
    ("A", "A"),
    ("AM", "Am"),
    ("BB", "Bb"),
    ("BBM", "Bbm"),
    ("B", "B"),
    ("BM", "Bm"),
    ("C", "C"),
    ("CM", "Cm"),
    ("DB", "Db"),
    ("DBM", "Dbm"),
    ("D", "D"),
    ("DM", "Dm"),
    ("EB", "Eb"),
    ("EBM", "Ebm"),
    ("E", "E"),
    ("EM", "Em"),
    ("F", "F"),
    ("FM", "Fm"),
    ("F#", "F#"),
    ("F#M", "F#m"),
    ("G", "G"),
    ("GM", "Gm"),
    ("AB", "Ab"),
    ("ABM", "Abm"),
];

/// Lookup map, built once at first access via `LazyLock`.
static KEY_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KEY_TABLE.iter().copied().collect());

/// Normalize a raw key/scale pair to its canonical short form.
///
/// The two strings are concatenated and upper-cased before lookup, so input
/// case never matters. Unrecognized combinations return `None` rather than
/// an error.
///
/// # Examples
/// ```
/// use trackprobe::normalize_key;
///
/// assert_eq!(normalize_key("A", "minor"), Some("Am"));
/// assert_eq!(normalize_key("C#", "major"), Some("Db"));
/// assert_eq!(normalize_key("H", "major"), None);
/// ```
pub fn normalize_key(raw_key: &str, raw_scale: &str) -> Option<&'static str> {
    let spelling = format!("{}{}", raw_key, raw_scale).to_uppercase();
    KEY_LOOKUP.get(spelling.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 24 canonical outputs: 12 major + 12 minor.
    const CANONICAL_KEYS: [&str; 24] = [
        "A", "Am", "Bb", "Bbm", "B", "Bm", "C", "Cm", "Db", "Dbm", "D", "Dm",
        "Eb", "Ebm", "E", "Em", "F", "Fm", "F#", "F#m", "G", "Gm", "Ab", "Abm",
    ];

    #[test]
    fn test_full_word_form() {
        assert_eq!(normalize_key("A", "major"), Some("A"));
        assert_eq!(normalize_key("A", "minor"), Some("Am"));
        assert_eq!(normalize_key("Bb", "major"), Some("Bb"));
        assert_eq!(normalize_key("G#", "minor"), Some("Abm"));
    }

    #[test]
    fn test_abbreviated_form() {
        assert_eq!(normalize_key("A#", "min"), Some("Bbm"));
        assert_eq!(normalize_key("F", "maj"), Some("F"));
        assert_eq!(normalize_key("Eb", "min"), Some("Ebm"));
    }

    #[test]
    fn test_terse_form_folds_scale_into_key() {
        assert_eq!(normalize_key("Db", ""), Some("Db"));
        assert_eq!(normalize_key("Am", ""), Some("Am"));
        assert_eq!(normalize_key("F#m", ""), Some("F#m"));
    }

    #[test]
    fn test_enharmonic_spellings_collapse() {
        // Sharp and flat spellings of the same pitch agree on one canonical form
        assert_eq!(normalize_key("C#", "major"), normalize_key("Db", "maj"));
        assert_eq!(normalize_key("C#", "major"), Some("Db"));
        assert_eq!(normalize_key("D#", "minor"), normalize_key("Eb", "min"));
        assert_eq!(normalize_key("Gb", "major"), normalize_key("F#", "major"));
        // F# keeps its sharp spelling
        assert_eq!(normalize_key("Gb", "major"), Some("F#"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize_key("c", "minor"), Some("Cm"));
        assert_eq!(normalize_key("c", "minor"), normalize_key("C", "MINOR"));
        assert_eq!(normalize_key("bB", "MaJoR"), Some("Bb"));
    }

    #[test]
    fn test_unknown_spellings_return_none() {
        assert_eq!(normalize_key("H", "major"), None);
        assert_eq!(normalize_key("", ""), None);
        assert_eq!(normalize_key("A", "mixolydian"), None);
        // Terse sharp spellings were never in the legacy table
        assert_eq!(normalize_key("C#", ""), None);
    }

    #[test]
    fn test_table_has_no_conflicting_duplicates() {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for &(spelling, canonical) in KEY_TABLE {
            if let Some(&previous) = seen.get(spelling) {
                assert_eq!(
                    previous, canonical,
                    "spelling {:?} maps to both {:?} and {:?}",
                    spelling, previous, canonical
                );
            }
            seen.insert(spelling, canonical);
        }
    }

    #[test]
    fn test_table_values_are_canonical() {
        for &(spelling, canonical) in KEY_TABLE {
            assert!(
                CANONICAL_KEYS.contains(&canonical),
                "table entry {:?} -> {:?} is not a canonical key",
                spelling,
                canonical
            );
        }
    }

    #[test]
    fn test_every_canonical_key_is_reachable() {
        for key in CANONICAL_KEYS {
            assert!(
                KEY_TABLE.iter().any(|&(_, canonical)| canonical == key),
                "no spelling resolves to {:?}",
                key
            );
        }
    }
}
