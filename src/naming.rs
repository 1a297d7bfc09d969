//! Logical object names for atoms.
//!
//! The first atom of a species is named after the species itself, and every later atom of that
//! species gets a zero-padded counter: `O`, `H`, `H.001`, `O.001`. A name depends only on the
//! species list and the index of the atom, so the same atom is given the same name in every
//! frame.
use std::collections::HashMap;

/// The logical name of the `k`-th object (0-indexed) with a given species or role.
pub fn logical_name(species: &str, k: usize) -> String {
    if k == 0 {
        species.to_string()
    } else {
        format!("{species}.{k:03}")
    }
}

/// Assigns logical names in order, keeping one counter per species.
#[derive(Debug, Default, Clone)]
pub struct Namer {
    counts: HashMap<String, usize>,
}

impl Namer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the name for the next object of `species` and advance its counter.
    pub fn next(&mut self, species: &str) -> String {
        let count = self.counts.entry(species.to_string()).or_default();
        let name = logical_name(species, *count);
        *count += 1;
        name
    }
}

/// The logical names for a list of species, in order.
pub fn logical_names<'s>(species: impl IntoIterator<Item = &'s str>) -> Vec<String> {
    let mut namer = Namer::new();
    species.into_iter().map(|s| namer.next(s)).collect()
}

/// The logical name of the atom at `idx` in a species list.
///
/// Returns [`None`] if `idx` is out of bounds.
pub fn logical_name_at(species: &[&str], idx: usize) -> Option<String> {
    let this = species.get(idx)?;
    let k = species[..idx].iter().filter(|s| *s == this).count();
    Some(logical_name(this, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_dimer() {
        assert_eq!(logical_names(["O", "H", "H", "O"]), ["O", "H", "H.001", "O.001"]);
    }

    #[test]
    fn counter_is_zero_padded() {
        let names = logical_names(std::iter::repeat("C").take(1001));
        assert_eq!(names[0], "C");
        assert_eq!(names[1], "C.001");
        assert_eq!(names[42], "C.042");
        assert_eq!(names[999], "C.999");
        assert_eq!(names[1000], "C.1000");
    }

    #[test]
    fn positional_matches_sequential() {
        let species = ["O", "H", "H", "O", "H", "H", "Na", "O"];
        let names = logical_names(species);
        for (idx, name) in names.iter().enumerate() {
            assert_eq!(logical_name_at(&species, idx).as_ref(), Some(name));
        }
        assert_eq!(logical_name_at(&species, species.len()), None);
    }

    #[test]
    fn fresh_namer_restarts_counters() {
        let mut namer = Namer::new();
        assert_eq!(namer.next("H"), "H");
        assert_eq!(namer.next("H"), "H.001");
        let mut namer = Namer::new();
        assert_eq!(namer.next("H"), "H");
    }
}
