//! Variable algebras and the canonical form of a monomial under each of them.
//!
//! Binary variables are idempotent (`x * x = x`), so repeated labels collapse
//! to a single occurrence. Spin variables are involutive (`z * z = 1`), so
//! labels occurring an even number of times cancel out of the product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Any label usable as a polynomial variable.
pub trait Variable: Clone + Eq + Ord + std::hash::Hash + fmt::Debug {}

impl<T: Clone + Eq + Ord + std::hash::Hash + fmt::Debug> Variable for T {}

/// Domain of the variables of a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vartype {
    /// Variables take values in {0, 1}.
    Binary,
    /// Variables take values in {-1, 1}.
    Spin,
}

impl Vartype {
    /// Reduce a raw label collection to its canonical monomial.
    ///
    /// The result is sorted. For `Binary` every label appears once; for `Spin`
    /// only labels with an odd number of occurrences survive.
    pub fn canonicalize<V: Variable>(self, raw: impl IntoIterator<Item = V>) -> Monomial<V> {
        let mut labels: Vec<V> = raw.into_iter().collect();
        labels.sort_unstable();
        match self {
            Vartype::Binary => labels.dedup(),
            Vartype::Spin => {
                let mut kept: Vec<V> = Vec::with_capacity(labels.len());
                for label in labels {
                    if kept.last() == Some(&label) {
                        kept.pop();
                    } else {
                        kept.push(label);
                    }
                }
                labels = kept;
            }
        }
        Monomial(labels)
    }

    /// Whether `value` belongs to this domain.
    pub fn contains(self, value: i8) -> bool {
        match self {
            Vartype::Binary => value == 0 || value == 1,
            Vartype::Spin => value == -1 || value == 1,
        }
    }

    /// The other algebra.
    pub fn flipped(self) -> Vartype {
        match self {
            Vartype::Binary => Vartype::Spin,
            Vartype::Spin => Vartype::Binary,
        }
    }
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vartype::Binary => write!(f, "binary"),
            Vartype::Spin => write!(f, "spin"),
        }
    }
}

/// Container policy of a polynomial: its algebra plus an optional degree bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Arbitrary-degree binary polynomial.
    Pubo,
    /// Binary polynomial of degree at most 2.
    Qubo,
    /// Arbitrary-degree spin polynomial.
    HIsing,
    /// Spin polynomial of degree at most 2 (fields and couplings).
    Ising,
}

impl Format {
    pub fn vartype(self) -> Vartype {
        match self {
            Format::Pubo | Format::Qubo => Vartype::Binary,
            Format::HIsing | Format::Ising => Vartype::Spin,
        }
    }

    /// Largest canonical monomial length the container accepts, if bounded.
    pub fn max_degree(self) -> Option<usize> {
        match self {
            Format::Qubo | Format::Ising => Some(2),
            Format::Pubo | Format::HIsing => None,
        }
    }

    pub fn is_bounded(self) -> bool {
        self.max_degree().is_some()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pubo => write!(f, "PUBO"),
            Format::Qubo => write!(f, "QUBO"),
            Format::HIsing => write!(f, "HIsing"),
            Format::Ising => write!(f, "Ising"),
        }
    }
}

/// A canonical monomial: sorted labels with the duplicates of its algebra
/// already removed. The empty monomial is the constant term.
///
/// Only [`Vartype::canonicalize`] and [`Monomial::constant`] create one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial<V>(Vec<V>);

impl<V> Monomial<V> {
    pub fn constant() -> Self {
        Monomial(Vec::new())
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn is_constant(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[V] {
        &self.0
    }

    pub fn into_labels(self) -> Vec<V> {
        self.0
    }
}

impl<V> Deref for Monomial<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        &self.0
    }
}
