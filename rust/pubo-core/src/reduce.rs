//! Degree reduction of binary polynomials with ancilla variables.
//!
//! Every product `x_i x_j` inside a term of degree > 2 can be replaced by a
//! fresh binary variable `z` constrained to equal the product by the penalty
//!
//! ```text
//! lam * (3z + x_i x_j - 2 x_i z - 2 x_j z)
//! ```
//!
//! which is 0 when `z = x_i x_j` and at least `lam` otherwise. Repeating the
//! substitution brings every term to degree ≤ 2. Ancillas are registered per
//! pair, so a pair shared between terms reuses the same ancilla and only adds
//! another penalty block.
//!
//! The reduction is exact only if each weight dominates the gain of violating
//! its constraint. The default `1 + |v|` is enough for the term that minted or
//! reused the ancilla; custom weights that are too small make the reduced
//! problem unsound.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::coefficient::Coefficient;
use crate::error::{FormulationError, Result};
use crate::polynomial::Polynomial;
use crate::vartype::{Format, Vartype};

/// Ancilla variable standing for the product of a pair of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ancilla {
    pub index: usize,
    /// The pair `(x, y)`, `x < y`, whose product the ancilla encodes.
    pub pair: (usize, usize),
}

/// Result of [`reduce_degree`].
#[derive(Debug, Clone)]
pub struct Reduction<C = f64> {
    /// Degree ≤ 2 polynomial over the original variables and the ancillas.
    pub polynomial: Polynomial<usize, C>,
    /// Ancillas in minting order; indices are `num_variables..`.
    pub ancillas: Vec<Ancilla>,
    /// Number of original variables.
    pub num_variables: usize,
    /// Number of penalty blocks added, counting reuses.
    pub penalty_blocks: usize,
}

/// Counts describing a [`Reduction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionSummary {
    pub num_variables: usize,
    pub num_ancillas: usize,
    pub num_terms: usize,
    pub degree: usize,
    pub penalty_blocks: usize,
}

impl<C: Coefficient> Reduction<C> {
    /// Total number of variables, ancillas included.
    pub fn total_variables(&self) -> usize {
        self.num_variables + self.ancillas.len()
    }

    pub fn summary(&self) -> ReductionSummary {
        ReductionSummary {
            num_variables: self.num_variables,
            num_ancillas: self.ancillas.len(),
            num_terms: self.polynomial.num_terms(),
            degree: self.polynomial.degree(),
            penalty_blocks: self.penalty_blocks,
        }
    }
}

/// Default penalty weight for a term with coefficient `v`: `1 + |v|`.
pub fn default_penalty_weight<C: Coefficient>(v: &C) -> C {
    C::one() + v.magnitude()
}

/// The penalty block enforcing `z = x * y` at weight `lam`.
pub fn penalty_block<C: Coefficient>(x: usize, y: usize, z: usize, lam: &C) -> Result<Polynomial<usize, C>> {
    let mut block = Polynomial::qubo();
    add_penalty(&mut block, x, y, z, lam)?;
    Ok(block)
}

fn add_penalty<C: Coefficient>(target: &mut Polynomial<usize, C>, x: usize, y: usize, z: usize, lam: &C) -> Result<()> {
    let minus_two = -C::small(2) * lam.clone();
    target.accumulate([z], C::small(3) * lam.clone())?;
    target.accumulate([x, y], lam.clone())?;
    target.accumulate([x, z], minus_two.clone())?;
    target.accumulate([y, z], minus_two)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Ancilla registry
// ---------------------------------------------------------------------------

/// Pair → ancilla bindings for a single reduction.
struct AncillaRegistry {
    pairs: HashMap<(usize, usize), usize>,
    ancillas: Vec<Ancilla>,
    next: usize,
}

impl AncillaRegistry {
    fn new(first_index: usize) -> Self {
        AncillaRegistry {
            pairs: HashMap::new(),
            ancillas: Vec::new(),
            next: first_index,
        }
    }

    /// First pair of `key` (lexicographic over positions) already bound to an
    /// ancilla, otherwise a new ancilla for the first two labels.
    fn pick(&mut self, key: &[usize]) -> (usize, usize, usize) {
        for (i, &x) in key.iter().enumerate() {
            for &y in &key[i + 1..] {
                if let Some(&z) = self.pairs.get(&(x, y)) {
                    return (x, y, z);
                }
            }
        }
        let (x, y) = (key[0], key[1]);
        let z = self.next;
        self.next += 1;
        self.pairs.insert((x, y), z);
        self.ancillas.push(Ancilla { index: z, pair: (x, y) });
        log::trace!("ancilla {z} = x{x} * x{y}");
        (x, y, z)
    }
}

/// Reduce `pubo` to degree ≤ 2 with the default penalty weight.
///
/// `num_variables` is the number of original variables; ancillas are
/// numbered from there.
pub fn reduce_degree<C: Coefficient>(pubo: &Polynomial<usize, C>, num_variables: usize) -> Result<Reduction<C>> {
    reduce_degree_with(pubo, num_variables, default_penalty_weight)
}

/// Reduce `pubo` to degree ≤ 2, weighting the penalties of a term with
/// coefficient `v` by `weight(v)`.
pub fn reduce_degree_with<C, F>(pubo: &Polynomial<usize, C>, num_variables: usize, weight: F) -> Result<Reduction<C>>
where
    C: Coefficient,
    F: Fn(&C) -> C,
{
    if pubo.vartype() != Vartype::Binary {
        return Err(FormulationError::VartypeMismatch {
            expected: Vartype::Binary,
            found: pubo.vartype(),
        });
    }
    if let Some(index) = pubo.max_index().filter(|&index| index >= num_variables) {
        return Err(FormulationError::InvalidKey(index.to_string()));
    }

    let mut registry = AncillaRegistry::new(num_variables);
    let mut reduced = Polynomial::new(Format::Qubo);
    let mut penalty_blocks = 0;

    for (monomial, value) in pubo.terms() {
        let mut key = monomial.labels().to_vec();
        if key.len() > 2 {
            let lam = weight(value);
            while key.len() > 2 {
                let (x, y, z) = registry.pick(&key);
                add_penalty(&mut reduced, x, y, z, &lam)?;
                penalty_blocks += 1;
                key.retain(|&label| label != x && label != y);
                key.push(z);
                key.sort_unstable();
                key.dedup();
            }
        }
        reduced.accumulate(key, value.clone())?;
    }

    log::debug!(
        "reduced {} terms of degree {} over {} variables: {} ancillas, {} penalty blocks",
        pubo.num_terms(),
        pubo.degree(),
        num_variables,
        registry.ancillas.len(),
        penalty_blocks
    );

    Ok(Reduction {
        polynomial: reduced,
        ancillas: registry.ancillas,
        num_variables,
        penalty_blocks,
    })
}
