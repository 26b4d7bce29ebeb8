//! Map identifier recognition and ordering.
//!
//! DOOM-engine games name their levels in one of two ways:
//!
//! - Episode style, `ExMy` (`E1M1`, `E4M9`), used by the original DOOM and Heretic
//! - Sequential style, `MAPxx` (`MAP01`, `MAP32`), used by DOOM II and most ports
//!
//! Names are compared case-insensitively; everything stored is uppercase.

use std::cmp::Ordering;
use std::collections::HashSet;

/// The naming scheme a map identifier follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStyle {
    /// `E<digit>M<digit>`
    Episode,
    /// `MAP<digit><digit>`, trailing characters allowed
    Sequential,
}

/// Classify a lump or folder name as a map marker.
///
/// Returns `None` for anything that is not a map identifier. A name can
/// match at most one style since the two differ in their first character.
pub fn classify(name: &str) -> Option<MapStyle> {
    let upper = name.to_ascii_uppercase();
    let b = upper.as_bytes();

    if b.len() == 4 && b[0] == b'E' && b[2] == b'M' && b[1].is_ascii_digit() && b[3].is_ascii_digit()
    {
        return Some(MapStyle::Episode);
    }

    if b.len() >= 5 && b.starts_with(b"MAP") && b[3].is_ascii_digit() && b[4].is_ascii_digit() {
        return Some(MapStyle::Sequential);
    }

    None
}

/// Returns `true` if `name` denotes a playable map under either naming scheme.
pub fn is_map_marker(name: &str) -> bool {
    classify(name).is_some()
}

/// Canonical ordering for map names.
///
/// - `ExMy` names order by episode digit, then by the whole name
/// - `MAP` names order by the number following `MAP`, so `MAP2` sorts
///   between `MAP01` and `MAP10`; names without a number follow the
///   numbered ones, and equal numbers fall back to the whole name
/// - anything else, including one name of each style, compares byte-wise
///
/// Every `MAP`-prefixed name shares the same byte-wise position relative
/// to other names, so the mixed rule keeps this a total order.
pub fn compare_map_names(a: &str, b: &str) -> Ordering {
    let (ab, bb) = (a.as_bytes(), b.as_bytes());

    if ab.starts_with(b"E") && bb.starts_with(b"E") {
        return ab.get(1).cmp(&bb.get(1)).then_with(|| ab.cmp(bb));
    }

    if ab.starts_with(b"MAP") && bb.starts_with(b"MAP") {
        return sequential_key(a).cmp(&sequential_key(b));
    }

    ab.cmp(bb)
}

/// Sort key for a `MAP`-prefixed name: numbered names first, by number.
fn sequential_key(name: &str) -> (bool, u32, &str) {
    let digits: &str = {
        let rest = &name[3..];
        let end = rest
            .bytes()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    match digits.parse::<u32>() {
        Ok(number) => (false, number, name),
        Err(_) => (true, 0, name),
    }
}

/// Sort a list of map names in place using [`compare_map_names`].
pub fn sort_map_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_map_names(a, b));
}

/// Accumulates map names from several sources, dropping duplicates.
///
/// Names are uppercased on insertion. [`MapList::into_sorted`] yields the
/// final list in canonical order.
#[derive(Debug, Default, Clone)]
pub struct MapList {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl MapList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a map name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.to_ascii_uppercase();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn into_sorted(self) -> Vec<String> {
        let mut names = self.names;
        sort_map_names(&mut names);
        names
    }
}

impl<S: AsRef<str>> Extend<S> for MapList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        sort_map_names(&mut v);
        v
    }

    #[test]
    fn recognizes_episode_names() {
        assert_eq!(classify("E1M1"), Some(MapStyle::Episode));
        assert_eq!(classify("e4m9"), Some(MapStyle::Episode));
        assert!(!is_map_marker("E1M"));
        assert!(!is_map_marker("E1M10"));
        assert!(!is_map_marker("EXMY"));
        assert!(!is_map_marker("E1X1"));
    }

    #[test]
    fn recognizes_sequential_names() {
        assert_eq!(classify("MAP01"), Some(MapStyle::Sequential));
        assert_eq!(classify("map32"), Some(MapStyle::Sequential));
        assert_eq!(classify("MAP01A"), Some(MapStyle::Sequential));
        assert!(!is_map_marker("MAP1"));
        assert!(!is_map_marker("MAPINFO"));
        assert!(!is_map_marker("MAP"));
    }

    #[test]
    fn rejects_other_lumps() {
        for name in ["", "THINGS", "PLAYPAL", "TEXTMAP", "ENDMAP", "E", "M1E1"] {
            assert!(!is_map_marker(name), "{name}");
        }
    }

    #[test]
    fn episode_order() {
        assert_eq!(sorted(&["E2M1", "E1M2", "E1M1"]), vec!["E1M1", "E1M2", "E2M1"]);
    }

    #[test]
    fn sequential_order_is_numeric() {
        assert_eq!(sorted(&["MAP10", "MAP2", "MAP01"]), vec!["MAP01", "MAP2", "MAP10"]);
    }

    #[test]
    fn unnumbered_map_names_follow_numbered_ones() {
        assert_eq!(
            sorted(&["MAPXY", "MAP10", "MAP1X", "MAP2"]),
            vec!["MAP1X", "MAP2", "MAP10", "MAPXY"]
        );
    }

    #[test]
    fn mixed_styles_compare_bytewise() {
        assert_eq!(compare_map_names("E1M1", "MAP01"), Ordering::Less);
        assert_eq!(compare_map_names("MAP01", "E9M9"), Ordering::Greater);
        assert_eq!(
            sorted(&["MAP03", "E1M1", "MAP01", "E2M2"]),
            vec!["E1M1", "E2M2", "MAP01", "MAP03"]
        );
    }

    #[test]
    fn map_list_deduplicates_case_insensitively() {
        let mut maps = MapList::new();
        assert!(maps.insert("map01"));
        assert!(!maps.insert("MAP01"));
        maps.extend(["MAP02", "MAP01"]);
        assert!(!maps.insert("Map02"));
        assert_eq!(maps.into_sorted(), vec!["MAP01", "MAP02"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn map_name() -> impl Strategy<Value = String> {
            prop_oneof![
                "[Ee][0-9][Mm][0-9]",
                "[Mm][Aa][Pp][0-9]{1,3}[A-Z]?",
                "[A-Z0-9]{0,8}",
            ]
        }

        proptest! {
            #[test]
            fn classification_ignores_case(name in "[A-Za-z0-9]{0,8}") {
                prop_assert_eq!(classify(&name), classify(&name.to_ascii_uppercase()));
                prop_assert_eq!(classify(&name), classify(&name.to_ascii_lowercase()));
            }

            #[test]
            fn ordering_is_antisymmetric(a in map_name(), b in map_name()) {
                let (a, b) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
                prop_assert_eq!(compare_map_names(&a, &b), compare_map_names(&b, &a).reverse());
            }

            #[test]
            fn ordering_is_transitive(a in map_name(), b in map_name(), c in map_name()) {
                let mut v = vec![a.to_ascii_uppercase(), b.to_ascii_uppercase(), c.to_ascii_uppercase()];
                sort_map_names(&mut v);
                prop_assert_ne!(compare_map_names(&v[0], &v[1]), Ordering::Greater);
                prop_assert_ne!(compare_map_names(&v[1], &v[2]), Ordering::Greater);
                prop_assert_ne!(compare_map_names(&v[0], &v[2]), Ordering::Greater);
            }

            #[test]
            fn sorted_output_ignores_input_order(names in proptest::collection::vec(map_name(), 0..24)) {
                let mut forward = MapList::new();
                forward.extend(names.iter());
                let mut backward = MapList::new();
                backward.extend(names.iter().rev());

                let forward = forward.into_sorted();
                prop_assert_eq!(&forward, &backward.into_sorted());

                let unique: HashSet<&String> = forward.iter().collect();
                prop_assert_eq!(unique.len(), forward.len());
            }
        }
    }
}
