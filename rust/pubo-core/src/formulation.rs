//! Labeled polynomials turned into solver-ready, integer-indexed problems.
//!
//! Each conversion builds its own [`LabelMapper`], binding labels to indices
//! in the order they first appear in the terms, and hands it back inside the
//! [`Formulation`] so solver output can be translated back.

use std::collections::HashMap;

use crate::assignment::Assignment;
use crate::coefficient::Coefficient;
use crate::convert::{hising_to_pubo, pubo_to_hising, qubo_to_ising};
use crate::error::Result;
use crate::label::LabelMapper;
use crate::polynomial::Polynomial;
use crate::reduce::{default_penalty_weight, reduce_degree_with, Ancilla, ReductionSummary};
use crate::translate;
use crate::vartype::{Format, Variable, Vartype};

/// An integer-indexed problem together with the labels of its original
/// variables and the ancillas added to reach degree 2.
#[derive(Debug, Clone)]
pub struct Formulation<V, C = f64> {
    polynomial: Polynomial<usize, C>,
    mapper: LabelMapper<V>,
    ancillas: Vec<Ancilla>,
    penalty_blocks: usize,
}

impl<V: Variable, C: Coefficient> Formulation<V, C> {
    fn unreduced(polynomial: Polynomial<usize, C>, mapper: LabelMapper<V>) -> Self {
        Formulation {
            polynomial,
            mapper,
            ancillas: Vec::new(),
            penalty_blocks: 0,
        }
    }

    pub fn polynomial(&self) -> &Polynomial<usize, C> {
        &self.polynomial
    }

    pub fn into_polynomial(self) -> Polynomial<usize, C> {
        self.polynomial
    }

    pub fn mapper(&self) -> &LabelMapper<V> {
        &self.mapper
    }

    pub fn format(&self) -> Format {
        self.polynomial.format()
    }

    pub fn vartype(&self) -> Vartype {
        self.polynomial.vartype()
    }

    pub fn ancillas(&self) -> &[Ancilla] {
        &self.ancillas
    }

    /// Number of labeled (non-ancilla) variables.
    pub fn num_variables(&self) -> usize {
        self.mapper.len()
    }

    /// Number of variables a solver must assign, ancillas included.
    pub fn total_variables(&self) -> usize {
        self.mapper.len() + self.ancillas.len()
    }

    /// Labeled binary solution for a solver assignment of this problem.
    pub fn convert_solution<A: Assignment<usize> + ?Sized>(&self, assignment: &A) -> Result<HashMap<V, u8>> {
        translate::convert_solution(assignment, self.vartype(), &self.mapper)
    }

    pub fn reduction_summary(&self) -> ReductionSummary {
        ReductionSummary {
            num_variables: self.mapper.len(),
            num_ancillas: self.ancillas.len(),
            num_terms: self.polynomial.num_terms(),
            degree: self.polynomial.degree(),
            penalty_blocks: self.penalty_blocks,
        }
    }
}

impl<V: Variable, C: Coefficient> Polynomial<V, C> {
    /// Relabel onto `0..n` with a fresh first-seen mapper.
    fn index_form(&self) -> Result<(Polynomial<usize, C>, LabelMapper<V>)> {
        let mut mapper = LabelMapper::new();
        let indexed = self.try_relabel(|label| Ok(mapper.assign(label)))?;
        Ok((indexed, mapper))
    }

    /// Arbitrary-degree binary formulation.
    pub fn to_pubo(&self) -> Result<Formulation<V, C>> {
        let (indexed, mapper) = self.index_form()?;
        let pubo = match indexed.vartype() {
            Vartype::Binary => indexed.with_format(Format::Pubo)?,
            Vartype::Spin => hising_to_pubo(&indexed)?,
        };
        log::debug!("to_pubo: {} variables, {} terms", mapper.len(), pubo.num_terms());
        Ok(Formulation::unreduced(pubo, mapper))
    }

    /// Arbitrary-degree spin formulation.
    pub fn to_hising(&self) -> Result<Formulation<V, C>> {
        let (indexed, mapper) = self.index_form()?;
        let hising = match indexed.vartype() {
            Vartype::Binary => pubo_to_hising(&indexed)?,
            Vartype::Spin => indexed.with_format(Format::HIsing)?,
        };
        log::debug!("to_hising: {} variables, {} terms", mapper.len(), hising.num_terms());
        Ok(Formulation::unreduced(hising, mapper))
    }

    /// Quadratic binary formulation with the default penalty weight.
    pub fn to_qubo(&self) -> Result<Formulation<V, C>> {
        self.to_qubo_with(default_penalty_weight)
    }

    /// Quadratic binary formulation; the ancilla penalties of a term with
    /// coefficient `v` are weighted by `weight(v)`.
    pub fn to_qubo_with<F: Fn(&C) -> C>(&self, weight: F) -> Result<Formulation<V, C>> {
        let pubo = self.to_pubo()?;
        let reduction = reduce_degree_with(&pubo.polynomial, pubo.mapper.len(), weight)?;
        log::debug!(
            "to_qubo: {} variables, {} ancillas, {} terms",
            pubo.mapper.len(),
            reduction.ancillas.len(),
            reduction.polynomial.num_terms()
        );
        Ok(Formulation {
            polynomial: reduction.polynomial,
            mapper: pubo.mapper,
            ancillas: reduction.ancillas,
            penalty_blocks: reduction.penalty_blocks,
        })
    }

    /// Quadratic spin formulation with the default penalty weight.
    pub fn to_ising(&self) -> Result<Formulation<V, C>> {
        self.to_ising_with(default_penalty_weight)
    }

    /// Quadratic spin formulation; see [`Polynomial::to_qubo_with`].
    pub fn to_ising_with<F: Fn(&C) -> C>(&self, weight: F) -> Result<Formulation<V, C>> {
        let qubo = self.to_qubo_with(weight)?;
        Ok(Formulation {
            polynomial: qubo_to_ising(&qubo.polynomial)?,
            ..qubo
        })
    }
}
