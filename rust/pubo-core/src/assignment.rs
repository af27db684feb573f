//! Read access to variable assignments.
//!
//! Solvers hand back assignments in whatever shape suits them: a dense vector
//! indexed by variable, or a map keyed by label. Values are `0`/`1` for binary
//! variables and `-1`/`1` for spins.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

pub trait Assignment<V> {
    /// Value assigned to `variable`, if any.
    fn value_of(&self, variable: &V) -> Option<i8>;
}

impl<V: Eq + Hash, S: BuildHasher> Assignment<V> for HashMap<V, i8, S> {
    fn value_of(&self, variable: &V) -> Option<i8> {
        self.get(variable).copied()
    }
}

impl<V: Ord> Assignment<V> for BTreeMap<V, i8> {
    fn value_of(&self, variable: &V) -> Option<i8> {
        self.get(variable).copied()
    }
}

impl Assignment<usize> for [i8] {
    fn value_of(&self, variable: &usize) -> Option<i8> {
        self.get(*variable).copied()
    }
}

impl Assignment<usize> for Vec<i8> {
    fn value_of(&self, variable: &usize) -> Option<i8> {
        self.get(*variable).copied()
    }
}

impl<const N: usize> Assignment<usize> for [i8; N] {
    fn value_of(&self, variable: &usize) -> Option<i8> {
        self.get(*variable).copied()
    }
}
