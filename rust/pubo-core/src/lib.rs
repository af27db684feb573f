//! Pseudo-Boolean polynomial formulations.
//!
//! Builds canonical polynomials over binary ({0, 1}) or spin ({-1, 1})
//! variables and turns them into the integer-indexed shapes solvers consume:
//!
//! - PUBO / HIsing: arbitrary degree, binary / spin.
//! - QUBO / Ising: degree ≤ 2, reached through ancilla-based degree
//!   reduction with penalty terms.
//!
//! Labels are mapped to dense indices on the way in and solver assignments
//! are mapped back to labels on the way out, dropping the ancillas.
//!
//! ```
//! use pubo_core::{Format, Label, Polynomial};
//!
//! let mut p: Polynomial<Label> = Polynomial::new(Format::Pubo);
//! p.accumulate([Label::from("a")], -5.0).unwrap();
//! p.accumulate([Label::from(0), Label::from("a"), Label::from(1)], -2.0).unwrap();
//!
//! let qubo = p.to_qubo().unwrap();
//! assert_eq!(qubo.polynomial().degree(), 2);
//! assert_eq!(qubo.total_variables(), 4);
//! ```

pub mod assignment;
pub mod coefficient;
pub mod convert;
pub mod error;
pub mod formulation;
pub mod label;
pub mod polynomial;
pub mod reduce;
pub mod translate;
pub mod vartype;

pub use assignment::Assignment;
pub use coefficient::Coefficient;
pub use convert::{
    binaries_to_spins, binary_to_spin, decimal_to_binary, decimal_to_spin, hising_to_pubo, ising_to_qubo,
    pubo_to_hising, qubo_to_ising, solution_to_binaries, solution_to_spins, spin_to_binary,
    spins_to_binaries,
};
pub use error::{FormulationError, Result};
pub use formulation::Formulation;
pub use label::{Label, LabelMapper};
pub use polynomial::Polynomial;
pub use reduce::{
    default_penalty_weight, penalty_block, reduce_degree, reduce_degree_with, Ancilla, Reduction,
    ReductionSummary,
};
pub use translate::convert_solution;
pub use vartype::{Format, Monomial, Variable, Vartype};
