//! Variable labels and the label ↔ index bijection used to build dense,
//! integer-indexed problems.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::coefficient::Coefficient;
use crate::error::{FormulationError, Result};
use crate::polynomial::Polynomial;
use crate::vartype::{Monomial, Variable};

/// A label that is either an integer or a name, so that problems can mix
/// both (e.g. `x('a') * x(0)`).
///
/// Integers order before names; within a kind the natural order applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Name(String),
}

impl Label {
    /// The label as a dense variable index.
    ///
    /// Fails with [`FormulationError::InvalidKey`] for names and negative
    /// integers.
    pub fn as_index(&self) -> Result<usize> {
        match self {
            Label::Int(i) => usize::try_from(*i).map_err(|_| FormulationError::InvalidKey(self.to_string())),
            Label::Name(_) => Err(FormulationError::InvalidKey(self.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{i}"),
            Label::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(i64::from(value))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Name(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Name(value)
    }
}

impl<C: Coefficient> Polynomial<Label, C> {
    /// Reinterpret integer labels as dense indices.
    ///
    /// Every label must be a non-negative integer; anything else is an
    /// [`FormulationError::InvalidKey`].
    pub fn to_index_form(&self) -> Result<Polynomial<usize, C>> {
        self.try_relabel(Label::as_index)
    }
}

/// Bijection between labels and the indices `0..n`, assigned in first-seen
/// order.
///
/// A mapper belongs to one conversion call; indices it never handed out
/// (ancillas, for instance) do not resolve.
#[derive(Debug, Clone)]
pub struct LabelMapper<V> {
    forward: HashMap<V, usize>,
    reverse: Vec<V>,
}

impl<V: Variable> LabelMapper<V> {
    pub fn new() -> Self {
        LabelMapper {
            forward: HashMap::new(),
            reverse: Vec::new(),
        }
    }

    /// Index of `label`, binding it to the next unused index if unseen.
    pub fn assign(&mut self, label: &V) -> usize {
        if let Some(&index) = self.forward.get(label) {
            return index;
        }
        let index = self.reverse.len();
        self.forward.insert(label.clone(), index);
        self.reverse.push(label.clone());
        index
    }

    pub fn index_of(&self, label: &V) -> Option<usize> {
        self.forward.get(label).copied()
    }

    /// Label bound to `index`.
    pub fn resolve(&self, index: usize) -> Result<&V> {
        self.reverse.get(index).ok_or(FormulationError::KeyNotFound(index))
    }

    /// Indices of every label of `monomial`, assigning unseen ones.
    pub fn map_monomial(&mut self, monomial: &Monomial<V>) -> Vec<usize> {
        monomial.iter().map(|label| self.assign(label)).collect()
    }

    /// Number of labels assigned so far.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// `(index, label)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.reverse.iter().enumerate()
    }
}

impl<V: Variable> Default for LabelMapper<V> {
    fn default() -> Self {
        Self::new()
    }
}
