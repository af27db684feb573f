//! Sparse canonical polynomials over binary or spin variables.
//!
//! A polynomial maps canonical monomials to non-zero coefficients. Every
//! mutation goes through [`Polynomial::accumulate`] (or its crate-internal
//! twin for monomials that are already canonical), which is the single place
//! where monomials are canonicalized, degree bounds are enforced and zero
//! coefficients are dropped.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::assignment::Assignment;
use crate::coefficient::Coefficient;
use crate::error::{FormulationError, Result};
use crate::vartype::{Format, Monomial, Variable, Vartype};

/// Polynomial in `V`-labelled variables with `C` coefficients.
///
/// Terms keep their insertion order, so iteration (and everything derived
/// from it, such as label assignment) is deterministic.
#[derive(Debug, Clone)]
pub struct Polynomial<V, C = f64> {
    format: Format,
    terms: IndexMap<Monomial<V>, C>,
}

impl<V: Variable, C: Coefficient> Polynomial<V, C> {
    /// Empty polynomial in the given container format.
    pub fn new(format: Format) -> Self {
        Polynomial {
            format,
            terms: IndexMap::new(),
        }
    }

    pub fn pubo() -> Self {
        Self::new(Format::Pubo)
    }

    pub fn qubo() -> Self {
        Self::new(Format::Qubo)
    }

    pub fn hising() -> Self {
        Self::new(Format::HIsing)
    }

    pub fn ising() -> Self {
        Self::new(Format::Ising)
    }

    /// Build a polynomial by accumulating every `(raw monomial, value)` pair.
    ///
    /// Pairs whose raw monomials canonicalize to the same key are summed.
    pub fn from_terms<I, K>(format: Format, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: IntoIterator<Item = V>,
    {
        let mut polynomial = Self::new(format);
        for (raw, value) in terms {
            polynomial.accumulate(raw, value)?;
        }
        Ok(polynomial)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn vartype(&self) -> Vartype {
        self.format.vartype()
    }

    /// Add `value` to the term of the canonical form of `raw`.
    ///
    /// The term is created if absent and removed if the sum is zero. Bounded
    /// containers fail with [`FormulationError::InvalidTermDegree`] when the
    /// canonical monomial is longer than their bound.
    pub fn accumulate<K: IntoIterator<Item = V>>(&mut self, raw: K, value: C) -> Result<()> {
        let monomial = self.vartype().canonicalize(raw);
        self.accumulate_canonical(monomial, value)
    }

    pub(crate) fn accumulate_canonical(&mut self, monomial: Monomial<V>, value: C) -> Result<()> {
        self.check_degree(&monomial)?;
        self.add_to_term(monomial, value);
        Ok(())
    }

    /// Replace the coefficient of the canonical form of `raw`.
    ///
    /// Setting a zero coefficient removes the term.
    pub fn set<K: IntoIterator<Item = V>>(&mut self, raw: K, value: C) -> Result<()> {
        let monomial = self.vartype().canonicalize(raw);
        self.check_degree(&monomial)?;
        self.terms.shift_remove(&monomial);
        self.add_to_term(monomial, value);
        Ok(())
    }

    /// Add a constant to the offset.
    pub fn add_constant(&mut self, value: C) {
        self.add_to_term(Monomial::constant(), value);
    }

    fn check_degree(&self, monomial: &Monomial<V>) -> Result<()> {
        match self.format.max_degree() {
            Some(max) if monomial.degree() > max => Err(FormulationError::InvalidTermDegree {
                monomial: format!("{:?}", monomial.labels()),
                degree: monomial.degree(),
                max,
            }),
            _ => Ok(()),
        }
    }

    fn add_to_term(&mut self, monomial: Monomial<V>, value: C) {
        match self.terms.entry(monomial) {
            Entry::Occupied(mut entry) => {
                let sum = entry.get().clone() + value;
                if sum.is_zero() {
                    entry.shift_remove();
                } else {
                    entry.insert(sum);
                }
            }
            Entry::Vacant(entry) => {
                if !value.is_zero() {
                    entry.insert(value);
                }
            }
        }
    }

    /// Coefficient of the canonical form of `raw`, zero when absent.
    pub fn coefficient<K: IntoIterator<Item = V>>(&self, raw: K) -> C {
        let monomial = self.vartype().canonicalize(raw);
        self.get(&monomial).cloned().unwrap_or_else(C::zero)
    }

    pub fn get(&self, monomial: &Monomial<V>) -> Option<&C> {
        self.terms.get(monomial)
    }

    /// The constant term.
    pub fn offset(&self) -> C {
        self.get(&Monomial::constant()).cloned().unwrap_or_else(C::zero)
    }

    /// Length of the longest stored monomial, 0 for empty or constant-only
    /// polynomials.
    pub fn degree(&self) -> usize {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial<V>, &C)> {
        self.terms.iter()
    }

    pub fn into_terms(self) -> impl Iterator<Item = (Monomial<V>, C)> {
        self.terms.into_iter()
    }

    /// Distinct variables in order of first appearance.
    pub fn variables(&self) -> Vec<V> {
        let mut seen = HashSet::new();
        let mut variables = Vec::new();
        for monomial in self.terms.keys() {
            for label in monomial.iter() {
                if seen.insert(label) {
                    variables.push(label.clone());
                }
            }
        }
        variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    // ---------------------------------------------------------------------------
    // Algebra
    // ---------------------------------------------------------------------------

    /// Multiply every coefficient by `factor`. Scaling by zero empties the
    /// polynomial.
    pub fn scale(&mut self, factor: &C) {
        let terms = std::mem::take(&mut self.terms);
        for (monomial, value) in terms {
            self.add_to_term(monomial, value * factor.clone());
        }
    }

    /// Divide every coefficient by `divisor`.
    pub fn divide(&mut self, divisor: &C) -> Result<()> {
        if divisor.is_zero() {
            return Err(FormulationError::DivisionByZero);
        }
        let terms = std::mem::take(&mut self.terms);
        for (monomial, value) in terms {
            self.add_to_term(monomial, value / divisor.clone());
        }
        Ok(())
    }

    pub fn negate(&mut self) {
        self.scale(&-C::one());
    }

    /// Accumulate every term of `other` into `self`.
    pub fn add(&mut self, other: &Polynomial<V, C>) -> Result<()> {
        self.combine(other, false)
    }

    /// Accumulate the negation of every term of `other` into `self`.
    pub fn subtract(&mut self, other: &Polynomial<V, C>) -> Result<()> {
        self.combine(other, true)
    }

    fn combine(&mut self, other: &Polynomial<V, C>, negate: bool) -> Result<()> {
        self.expect_vartype(other.vartype())?;
        for monomial in other.terms.keys() {
            self.check_degree(monomial)?;
        }
        for (monomial, value) in &other.terms {
            let value = if negate { -value.clone() } else { value.clone() };
            self.accumulate_canonical(monomial.clone(), value)?;
        }
        Ok(())
    }

    /// Termwise product. Each concatenated monomial is re-canonicalized, so
    /// `x * x = x` for binary and `z * z = 1` for spin variables.
    pub fn multiply(&self, other: &Polynomial<V, C>) -> Result<Polynomial<V, C>> {
        self.expect_vartype(other.vartype())?;
        let mut product = Polynomial::new(self.format);
        for (left, left_value) in &self.terms {
            for (right, right_value) in &other.terms {
                product.accumulate(
                    left.iter().chain(right.iter()).cloned(),
                    left_value.clone() * right_value.clone(),
                )?;
            }
        }
        Ok(product)
    }

    /// `self` multiplied by itself `exponent` times; the zeroth power is the
    /// constant 1.
    pub fn power(&self, exponent: u32) -> Result<Polynomial<V, C>> {
        let mut result = Polynomial::new(self.format);
        result.add_constant(C::one());
        for _ in 0..exponent {
            result = result.multiply(self)?;
        }
        Ok(result)
    }

    /// Divide by the largest coefficient magnitude so that it becomes 1.
    pub fn normalize(&mut self) -> Result<()>
    where
        C: PartialOrd,
    {
        let mut largest: Option<C> = None;
        for value in self.terms.values() {
            let magnitude = value.magnitude();
            if largest.as_ref().map_or(true, |current| magnitude > *current) {
                largest = Some(magnitude);
            }
        }
        match largest {
            Some(largest) => self.divide(&largest),
            None => Ok(()),
        }
    }

    /// Rebuild the polynomial under a label map.
    ///
    /// Monomials are re-canonicalized, so a non-injective map merges terms.
    pub fn try_relabel<W, F>(&self, mut relabel: F) -> Result<Polynomial<W, C>>
    where
        W: Variable,
        F: FnMut(&V) -> Result<W>,
    {
        let mut relabeled = Polynomial::new(self.format);
        for (monomial, value) in &self.terms {
            let labels = monomial.iter().map(&mut relabel).collect::<Result<Vec<W>>>()?;
            relabeled.accumulate(labels, value.clone())?;
        }
        Ok(relabeled)
    }

    /// The same terms in another container of the same vartype.
    ///
    /// Moving into a bounded container fails if any term is too long.
    pub fn with_format(&self, format: Format) -> Result<Polynomial<V, C>> {
        self.expect_vartype(format.vartype())?;
        let mut converted = Polynomial::new(format);
        for (monomial, value) in &self.terms {
            converted.accumulate_canonical(monomial.clone(), value.clone())?;
        }
        Ok(converted)
    }

    pub(crate) fn expect_vartype(&self, found: Vartype) -> Result<()> {
        if self.vartype() == found {
            Ok(())
        } else {
            Err(FormulationError::VartypeMismatch {
                expected: self.vartype(),
                found,
            })
        }
    }

    // ---------------------------------------------------------------------------
    // Evaluation
    // ---------------------------------------------------------------------------

    /// Value of the polynomial at `assignment`.
    ///
    /// Every variable must be assigned a value from this polynomial's domain:
    /// {0, 1} for binary, {-1, 1} for spin.
    pub fn value<A: Assignment<V> + ?Sized>(&self, assignment: &A) -> Result<C> {
        let vartype = self.vartype();
        let mut total = C::zero();
        for (monomial, coefficient) in &self.terms {
            let mut product: i8 = 1;
            for label in monomial.iter() {
                let value = assignment
                    .value_of(label)
                    .ok_or_else(|| FormulationError::MissingValue(format!("{label:?}")))?;
                if !vartype.contains(value) {
                    return Err(FormulationError::InvalidValue { value, vartype });
                }
                product *= value;
            }
            match product {
                0 => {}
                1 => total = total + coefficient.clone(),
                _ => total = total - coefficient.clone(),
            }
        }
        Ok(total)
    }
}

impl<C: Coefficient> Polynomial<usize, C> {
    /// Largest variable index, `None` when no variable appears.
    pub fn max_index(&self) -> Option<usize> {
        self.terms.keys().filter_map(|monomial| monomial.last().copied()).max()
    }
}

impl<V: Variable, C: PartialEq> PartialEq for Polynomial<V, C> {
    /// Equal when the formats match and both hold the same terms, regardless
    /// of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.terms == other.terms
    }
}
