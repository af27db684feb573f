//! Exact conversions between binary and spin formulations.
//!
//! Binary variables map to spins through `x = (z + 1) / 2` and back through
//! `z = 2x - 1`. The substitutions are linear per variable, so the optimum
//! and the optimal value are preserved; only the constant offset moves.
//!
//! The quadratic converters use closed-form per-degree rules. The general
//! converters expand each monomial recursively. None of them renumber
//! labels.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::coefficient::Coefficient;
use crate::error::{FormulationError, Result};
use crate::polynomial::Polynomial;
use crate::vartype::{Format, Variable, Vartype};

/// Convert a degree ≤ 2 binary polynomial into an Ising model.
pub fn qubo_to_ising<V: Variable, C: Coefficient>(qubo: &Polynomial<V, C>) -> Result<Polynomial<V, C>> {
    expect_input(qubo, Vartype::Binary)?;
    let half = C::one() / C::small(2);
    let quarter = C::one() / C::small(4);

    let mut ising = Polynomial::new(Format::Ising);
    for (monomial, value) in qubo.terms() {
        match monomial.labels() {
            [] => ising.add_constant(value.clone()),
            [i] => {
                let v = value.clone() * half.clone();
                ising.accumulate([i.clone()], v.clone())?;
                ising.add_constant(v);
            }
            [i, j] => {
                let v = value.clone() * quarter.clone();
                ising.accumulate([i.clone(), j.clone()], v.clone())?;
                ising.accumulate([i.clone()], v.clone())?;
                ising.accumulate([j.clone()], v.clone())?;
                ising.add_constant(v);
            }
            _ => return Err(too_long(monomial.labels())),
        }
    }
    log::trace!("qubo_to_ising: {} terms -> {} terms", qubo.num_terms(), ising.num_terms());
    Ok(ising)
}

/// Convert an Ising model into a degree ≤ 2 binary polynomial.
pub fn ising_to_qubo<V: Variable, C: Coefficient>(ising: &Polynomial<V, C>) -> Result<Polynomial<V, C>> {
    expect_input(ising, Vartype::Spin)?;
    let two = C::small(2);
    let four = C::small(4);

    let mut qubo = Polynomial::new(Format::Qubo);
    for (monomial, value) in ising.terms() {
        match monomial.labels() {
            [] => qubo.add_constant(value.clone()),
            [i] => {
                qubo.accumulate([i.clone()], two.clone() * value.clone())?;
                qubo.add_constant(-value.clone());
            }
            [i, j] => {
                qubo.accumulate([i.clone(), j.clone()], four.clone() * value.clone())?;
                qubo.accumulate([i.clone()], -(two.clone() * value.clone()))?;
                qubo.accumulate([j.clone()], -(two.clone() * value.clone()))?;
                qubo.add_constant(value.clone());
            }
            _ => return Err(too_long(monomial.labels())),
        }
    }
    log::trace!("ising_to_qubo: {} terms -> {} terms", ising.num_terms(), qubo.num_terms());
    Ok(qubo)
}

/// Convert an arbitrary-degree binary polynomial into a higher-order Ising
/// model.
pub fn pubo_to_hising<V: Variable, C: Coefficient>(pubo: &Polynomial<V, C>) -> Result<Polynomial<V, C>> {
    expect_input(pubo, Vartype::Binary)?;
    // x = (z + 1) / 2: both branches carry half the running coefficient.
    let half = C::one() / C::small(2);
    let hising = expand(pubo, Format::HIsing, &half, &half)?;
    log::trace!("pubo_to_hising: {} terms -> {} terms", pubo.num_terms(), hising.num_terms());
    Ok(hising)
}

/// Convert a higher-order Ising model into an arbitrary-degree binary
/// polynomial.
pub fn hising_to_pubo<V: Variable, C: Coefficient>(hising: &Polynomial<V, C>) -> Result<Polynomial<V, C>> {
    expect_input(hising, Vartype::Spin)?;
    // z = 2x - 1: keeping the variable doubles, dropping it negates.
    let pubo = expand(hising, Format::Pubo, &C::small(2), &-C::one())?;
    log::trace!("hising_to_pubo: {} terms -> {} terms", hising.num_terms(), pubo.num_terms());
    Ok(pubo)
}

fn expand<V: Variable, C: Coefficient>(
    source: &Polynomial<V, C>,
    format: Format,
    keep: &C,
    drop: &C,
) -> Result<Polynomial<V, C>> {
    let mut target = Polynomial::new(format);
    for (monomial, value) in source.terms() {
        for (labels, factor) in substitution_terms(monomial.labels(), keep, drop) {
            target.accumulate(labels, factor * value.clone())?;
        }
    }
    Ok(target)
}

/// Expand the product of per-variable substitutions over `key`.
///
/// Peels the first label, expands the rest, and for every sub-term emits a
/// branch that keeps the label (scaled by `keep`) and one that drops it
/// (scaled by `drop`). The empty key contributes coefficient 1 to itself.
fn substitution_terms<V: Clone, C: Coefficient>(key: &[V], keep: &C, drop: &C) -> Vec<(Vec<V>, C)> {
    match key.split_first() {
        None => vec![(Vec::new(), C::one())],
        Some((first, rest)) => {
            let tail = substitution_terms(rest, keep, drop);
            let mut terms = Vec::with_capacity(tail.len() * 2);
            for (labels, value) in tail {
                let mut kept = Vec::with_capacity(labels.len() + 1);
                kept.push(first.clone());
                kept.extend(labels.iter().cloned());
                terms.push((kept, value.clone() * keep.clone()));
                terms.push((labels, value * drop.clone()));
            }
            terms
        }
    }
}

fn expect_input<V: Variable, C: Coefficient>(polynomial: &Polynomial<V, C>, expected: Vartype) -> Result<()> {
    if polynomial.vartype() == expected {
        Ok(())
    } else {
        Err(FormulationError::VartypeMismatch {
            expected,
            found: polynomial.vartype(),
        })
    }
}

fn too_long<V: std::fmt::Debug>(labels: &[V]) -> FormulationError {
    FormulationError::InvalidTermDegree {
        monomial: format!("{labels:?}"),
        degree: labels.len(),
        max: 2,
    }
}

// ---------------------------------------------------------------------------
// Variable values
// ---------------------------------------------------------------------------

/// Binary value {0, 1} to spin value {-1, 1}, in that order.
pub fn binary_to_spin(x: i8) -> Result<i8> {
    match x {
        0 => Ok(-1),
        1 => Ok(1),
        _ => Err(FormulationError::InvalidValue {
            value: x,
            vartype: Vartype::Binary,
        }),
    }
}

/// Spin value {-1, 1} to binary value {0, 1}, in that order.
pub fn spin_to_binary(z: i8) -> Result<i8> {
    match z {
        -1 => Ok(0),
        1 => Ok(1),
        _ => Err(FormulationError::InvalidValue {
            value: z,
            vartype: Vartype::Spin,
        }),
    }
}

/// Elementwise [`binary_to_spin`] over a dense assignment.
pub fn binaries_to_spins(values: &[i8]) -> Result<Vec<i8>> {
    values.iter().map(|&x| binary_to_spin(x)).collect()
}

/// Elementwise [`spin_to_binary`] over a dense assignment.
pub fn spins_to_binaries(values: &[i8]) -> Result<Vec<i8>> {
    values.iter().map(|&z| spin_to_binary(z)).collect()
}

/// Spin form of a labeled binary solution, such as the output of
/// [`convert_solution`](crate::convert_solution).
pub fn solution_to_spins<V, S>(solution: &HashMap<V, u8, S>) -> Result<HashMap<V, i8>>
where
    V: Variable,
    S: BuildHasher,
{
    solution
        .iter()
        .map(|(label, &x)| {
            // Out-of-range values are reported saturated.
            let x = i8::try_from(x).unwrap_or(i8::MAX);
            Ok((label.clone(), binary_to_spin(x)?))
        })
        .collect()
}

/// Binary form of a labeled spin assignment.
pub fn solution_to_binaries<V, S>(assignment: &HashMap<V, i8, S>) -> Result<HashMap<V, u8>>
where
    V: Variable,
    S: BuildHasher,
{
    assignment
        .iter()
        .map(|(label, &z)| Ok((label.clone(), spin_to_binary(z)? as u8)))
        .collect()
}

/// Bits of `d`, most significant first.
///
/// With `num_bits` the result is zero-padded to that width; without it the
/// shortest representation is used. `0` needs one bit, so a width of zero
/// always fails.
pub fn decimal_to_binary(d: u64, num_bits: Option<usize>) -> Result<Vec<i8>> {
    let needed = (u64::BITS - d.leading_zeros()).max(1) as usize;
    let width = match num_bits {
        Some(bits) if bits < needed => {
            return Err(FormulationError::InsufficientBits { value: d, bits })
        }
        Some(bits) => bits,
        None => needed,
    };
    Ok((0..width)
        .rev()
        .map(|k| if k < 64 && (d >> k) & 1 == 1 { 1 } else { 0 })
        .collect())
}

/// Spin representation of `d`: its bits with 0 replaced by -1.
pub fn decimal_to_spin(d: u64, num_spins: Option<usize>) -> Result<Vec<i8>> {
    binaries_to_spins(&decimal_to_binary(d, num_spins)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use num_rational::Rational64;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn poly(format: Format, terms: &[(&[usize], f64)]) -> Polynomial<usize> {
        Polynomial::from_terms(format, terms.iter().map(|(k, v)| (k.to_vec(), *v))).unwrap()
    }

    /// All assignments of `n` variables in the given domain, index order.
    fn all_assignments(n: usize, vartype: Vartype) -> Vec<Vec<i8>> {
        (0..1u32 << n)
            .map(|bits| {
                (0..n)
                    .map(|i| {
                        let bit = ((bits >> i) & 1) as i8;
                        match vartype {
                            Vartype::Binary => bit,
                            Vartype::Spin => 2 * bit - 1,
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn to_spin(assignment: &[i8]) -> Vec<i8> {
        assignment.iter().map(|&x| binary_to_spin(x).unwrap()).collect()
    }

    fn random_polynomial(rng: &mut StdRng, format: Format, n: usize, max_len: usize) -> Polynomial<usize> {
        let mut p = Polynomial::new(format);
        for _ in 0..rng.gen_range(1..12) {
            let len = rng.gen_range(0..=max_len);
            let key: Vec<usize> = (0..len).map(|_| rng.gen_range(0..n)).collect();
            let value = f64::from(rng.gen_range(-8i32..=8)) / 4.0;
            p.accumulate(key, value).unwrap();
        }
        p
    }

    #[test]
    fn test_qubo_to_ising_closed_form() {
        let q = poly(Format::Qubo, &[(&[0], 1.0), (&[0, 1], -1.0), (&[1], 3.0)]);
        let ising = qubo_to_ising(&q).unwrap();
        assert_eq!(ising.format(), Format::Ising);
        assert_eq!(
            ising,
            poly(
                Format::Ising,
                &[(&[0], 0.25), (&[0, 1], -0.25), (&[1], 1.25), (&[], 1.75)]
            )
        );
    }

    #[test]
    fn test_bounded_round_trip() {
        let q = poly(Format::Qubo, &[(&[0], 1.0), (&[0, 1], -1.0), (&[1], 3.0)]);
        assert_eq!(ising_to_qubo(&qubo_to_ising(&q).unwrap()).unwrap(), q);
    }

    #[test]
    fn test_value_preserved_across_formats() {
        let q = poly(Format::Qubo, &[(&[0], 1.0), (&[0, 1], -1.0), (&[1], 3.0)]);
        assert_eq!(q.value(&[1i8, 0]).unwrap(), 1.0);
        let ising = qubo_to_ising(&q).unwrap();
        assert_eq!(ising.value(&[1i8, -1]).unwrap(), 1.0);
    }

    #[test]
    fn test_ising_to_qubo_closed_form() {
        let ising = poly(Format::Ising, &[(&[0], 1.0), (&[1], -1.0), (&[0, 1], -1.0)]);
        let q = ising_to_qubo(&ising).unwrap();
        assert_eq!(q.format(), Format::Qubo);
        assert_eq!(q, poly(Format::Qubo, &[(&[0], 4.0), (&[0, 1], -4.0), (&[], -1.0)]));
    }

    #[test]
    fn test_general_converters_match_closed_forms_on_quadratics() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let q = random_polynomial(&mut rng, Format::Qubo, 4, 2);
            let general = pubo_to_hising(&q.with_format(Format::Pubo).unwrap()).unwrap();
            let closed = qubo_to_ising(&q).unwrap();
            assert_eq!(general, closed.with_format(Format::HIsing).unwrap());

            let back_general = hising_to_pubo(&general).unwrap();
            let back_closed = ising_to_qubo(&closed).unwrap();
            assert_eq!(back_general, back_closed.with_format(Format::Pubo).unwrap());
        }
    }

    #[test]
    fn test_general_converters_preserve_values() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pubo = random_polynomial(&mut rng, Format::Pubo, 5, 5);
            let hising = pubo_to_hising(&pubo).unwrap();
            for x in all_assignments(5, Vartype::Binary) {
                let expected = pubo.value(&x).unwrap();
                let actual = hising.value(&to_spin(&x)).unwrap();
                assert!(
                    (expected - actual).abs() < 1e-9,
                    "pubo {pubo:?} at {x:?}: {expected} vs {actual}"
                );
            }
            assert_eq!(hising_to_pubo(&hising).unwrap(), pubo);
        }
    }

    #[test]
    fn test_hising_to_pubo_expansion() {
        // z0 z1 z2 = (2x0 - 1)(2x1 - 1)(2x2 - 1)
        let h = poly(Format::HIsing, &[(&[0, 1, 2], 1.0)]);
        let p = hising_to_pubo(&h).unwrap();
        assert_eq!(
            p,
            poly(
                Format::Pubo,
                &[
                    (&[0, 1, 2], 8.0),
                    (&[0, 1], -4.0),
                    (&[0, 2], -4.0),
                    (&[1, 2], -4.0),
                    (&[0], 2.0),
                    (&[1], 2.0),
                    (&[2], 2.0),
                    (&[], -1.0),
                ]
            )
        );
    }

    #[test]
    fn test_converters_keep_labels() {
        let mut p: Polynomial<Label> = Polynomial::pubo();
        p.accumulate([Label::from("a"), Label::from(0)], 4.0).unwrap();
        let h = pubo_to_hising(&p).unwrap();
        assert_eq!(h.coefficient([Label::from("a"), Label::from(0)]), 1.0);
        assert_eq!(h.coefficient([Label::from("a")]), 1.0);
        assert_eq!(h.coefficient([Label::from(0)]), 1.0);
        assert_eq!(h.offset(), 1.0);
    }

    #[test]
    fn test_exact_round_trip_with_rationals() {
        let mut p: Polynomial<usize, Rational64> = Polynomial::pubo();
        p.accumulate([0, 1, 2], Rational64::new(1, 3)).unwrap();
        p.accumulate([1], Rational64::new(-5, 7)).unwrap();
        p.add_constant(Rational64::new(2, 9));
        let h = pubo_to_hising(&p).unwrap();
        assert_eq!(h.coefficient([0, 1, 2]), Rational64::new(1, 24));
        assert_eq!(hising_to_pubo(&h).unwrap(), p);
    }

    #[test]
    fn test_high_degree_round_trip_with_big_rationals() {
        use num_bigint::BigInt;
        use num_rational::BigRational;

        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let mut p: Polynomial<usize, BigRational> = Polynomial::pubo();
        p.accumulate(0..12, third.clone()).unwrap();
        p.accumulate([3, 5], -third).unwrap();
        let h = pubo_to_hising(&p).unwrap();
        assert_eq!(
            h.coefficient(0..12),
            BigRational::new(BigInt::from(1), BigInt::from(3 * 4096))
        );
        assert_eq!(hising_to_pubo(&h).unwrap(), p);
    }

    #[test]
    fn test_wrong_inputs_are_rejected() {
        let ising = poly(Format::Ising, &[(&[0], 1.0)]);
        assert_eq!(
            qubo_to_ising(&ising).unwrap_err(),
            FormulationError::VartypeMismatch {
                expected: Vartype::Binary,
                found: Vartype::Spin
            }
        );
        let cubic = poly(Format::Pubo, &[(&[0, 1, 2], 1.0)]);
        assert!(matches!(
            qubo_to_ising(&cubic),
            Err(FormulationError::InvalidTermDegree { degree: 3, .. })
        ));
        let cubic_spin = poly(Format::HIsing, &[(&[0, 1, 2], 1.0)]);
        assert!(ising_to_qubo(&cubic_spin).is_err());
    }

    #[test]
    fn test_sequence_and_solution_helpers() {
        assert_eq!(binaries_to_spins(&[0, 1, 1, 0]).unwrap(), vec![-1, 1, 1, -1]);
        assert_eq!(spins_to_binaries(&[-1, 1]).unwrap(), vec![0, 1]);
        assert_eq!(
            spins_to_binaries(&[1, 0, -1]),
            Err(FormulationError::InvalidValue {
                value: 0,
                vartype: Vartype::Spin
            })
        );

        let solution: HashMap<Label, u8> = [(Label::from("a"), 1), (Label::from(0), 0)].into_iter().collect();
        let spins = solution_to_spins(&solution).unwrap();
        assert_eq!(spins[&Label::from("a")], 1);
        assert_eq!(spins[&Label::from(0)], -1);
        assert_eq!(solution_to_binaries(&spins).unwrap(), solution);

        let bad: HashMap<Label, u8> = [(Label::from("b"), 2)].into_iter().collect();
        assert!(solution_to_spins(&bad).is_err());
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(binary_to_spin(0), Ok(-1));
        assert_eq!(binary_to_spin(1), Ok(1));
        assert!(binary_to_spin(2).is_err());
        assert_eq!(spin_to_binary(-1), Ok(0));
        assert!(spin_to_binary(0).is_err());

        assert_eq!(decimal_to_binary(10, Some(7)).unwrap(), vec![0, 0, 0, 1, 0, 1, 0]);
        assert_eq!(decimal_to_binary(10, None).unwrap(), vec![1, 0, 1, 0]);
        assert_eq!(decimal_to_binary(0, None).unwrap(), vec![0]);
        assert_eq!(decimal_to_binary(0, Some(2)).unwrap(), vec![0, 0]);
        assert_eq!(
            decimal_to_binary(0, Some(0)),
            Err(FormulationError::InsufficientBits { value: 0, bits: 0 })
        );
        assert!(decimal_to_spin(0, Some(0)).is_err());
        assert_eq!(
            decimal_to_binary(10, Some(3)),
            Err(FormulationError::InsufficientBits { value: 10, bits: 3 })
        );
        assert_eq!(
            decimal_to_spin(10, Some(7)).unwrap(),
            vec![-1, -1, -1, 1, -1, 1, -1]
        );
        assert_eq!(decimal_to_spin(10, None).unwrap(), vec![1, -1, 1, -1]);
    }
}
