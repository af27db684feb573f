//! Mapping solver output back to the caller's labels.

use std::collections::HashMap;

use crate::assignment::Assignment;
use crate::error::{FormulationError, Result};
use crate::label::LabelMapper;
use crate::vartype::{Variable, Vartype};

/// Translate an index-keyed assignment into a binary assignment of labels.
///
/// Only indices bound by `mapper` are read, so ancilla values are ignored
/// without any consistency check. Each labeled value must lie in the domain
/// of `vartype` ([`FormulationError::InvalidValue`] otherwise); 1 maps to 1
/// and the other domain value (binary 0, spin -1) to 0.
pub fn convert_solution<V, A>(assignment: &A, vartype: Vartype, mapper: &LabelMapper<V>) -> Result<HashMap<V, u8>>
where
    V: Variable,
    A: Assignment<usize> + ?Sized,
{
    let mut solution = HashMap::with_capacity(mapper.len());
    for (index, label) in mapper.iter() {
        let value = assignment
            .value_of(&index)
            .ok_or_else(|| FormulationError::MissingValue(index.to_string()))?;
        if !vartype.contains(value) {
            return Err(FormulationError::InvalidValue { value, vartype });
        }
        solution.insert(label.clone(), u8::from(value == 1));
    }
    log::trace!("translated {} {vartype} values", solution.len());
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    fn mapper(labels: &[Label]) -> LabelMapper<Label> {
        let mut mapper = LabelMapper::new();
        for label in labels {
            mapper.assign(label);
        }
        mapper
    }

    #[test]
    fn test_binary_solution_ignores_ancillas() {
        let mapper = mapper(&[Label::from("a"), Label::from(0), Label::from(1)]);
        let solution = convert_solution(&[1i8, 1, 1, 0], Vartype::Binary, &mapper).unwrap();
        assert_eq!(solution.len(), 3);
        assert_eq!(solution[&Label::from("a")], 1);
        assert_eq!(solution[&Label::from(0)], 1);
        assert_eq!(solution[&Label::from(1)], 1);
    }

    #[test]
    fn test_spin_solution() {
        let mapper = mapper(&[Label::from("x"), Label::from("y")]);
        let solution = convert_solution(&vec![-1i8, 1, -1], Vartype::Spin, &mapper).unwrap();
        assert_eq!(solution[&Label::from("x")], 0);
        assert_eq!(solution[&Label::from("y")], 1);
    }

    #[test]
    fn test_map_assignment() {
        let mapper = mapper(&[Label::from(9)]);
        let assignment: HashMap<usize, i8> = [(0, 1), (7, 0)].into_iter().collect();
        let solution = convert_solution(&assignment, Vartype::Binary, &mapper).unwrap();
        assert_eq!(solution[&Label::from(9)], 1);
    }

    #[test]
    fn test_values_outside_the_domain_are_rejected() {
        let mapper = mapper(&[Label::from("a"), Label::from("b")]);
        assert_eq!(
            convert_solution(&[1i8, 0], Vartype::Spin, &mapper).unwrap_err(),
            FormulationError::InvalidValue {
                value: 0,
                vartype: Vartype::Spin
            }
        );
        assert_eq!(
            convert_solution(&[-1i8, 1], Vartype::Binary, &mapper).unwrap_err(),
            FormulationError::InvalidValue {
                value: -1,
                vartype: Vartype::Binary
            }
        );
        // Ancilla values are never read.
        let solution = convert_solution(&[1i8, -1, 5], Vartype::Spin, &mapper).unwrap();
        assert_eq!(solution[&Label::from("b")], 0);
    }

    #[test]
    fn test_missing_value() {
        let mapper = mapper(&[Label::from("a"), Label::from("b")]);
        assert_eq!(
            convert_solution(&[0i8], Vartype::Binary, &mapper).unwrap_err(),
            FormulationError::MissingValue("1".to_string())
        );
    }
}
