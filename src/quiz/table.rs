/*
 * src/quiz/table.rs
 * The fixed V-speed table the quiz drills.
 */

use std::collections::HashSet;

use super::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTerm {
    pub label: &'static str, // "Vr"
    pub knots: u32,          // reference value
    pub meaning: &'static str,
}

/// Reference speeds, in presentation order before shuffling.
pub const V_SPEEDS: &[SpeedTerm] = &[
    SpeedTerm { label: "Vr", knots: 65, meaning: "Rotation" },
    SpeedTerm { label: "Vx", knots: 73, meaning: "Best angle of climb" },
    SpeedTerm { label: "Vy", knots: 84, meaning: "Best rate of climb" },
    SpeedTerm { label: "Vyse", knots: 84, meaning: "Best rate of climb, single engine" },
    SpeedTerm { label: "Vsse", knots: 70, meaning: "Safe single engine" },
    SpeedTerm { label: "Vmc", knots: 62, meaning: "Minimum control" },
    SpeedTerm { label: "Vcc", knots: 95, meaning: "Cruise climb" },
    SpeedTerm { label: "Vs0", knots: 56, meaning: "Stall, landing configuration" },
    SpeedTerm { label: "Vs1", knots: 66, meaning: "Stall, clean configuration" },
    SpeedTerm { label: "Vne", knots: 167, meaning: "Never exceed" },
    SpeedTerm { label: "Vno", knots: 135, meaning: "Normal operating" },
    SpeedTerm { label: "Va", knots: 118, meaning: "Maneuvering" },
    SpeedTerm { label: "Vo", knots: 118, meaning: "Operating maneuvering" },
    SpeedTerm { label: "Vle", knots: 93, meaning: "Landing gear extended" },
    SpeedTerm { label: "Vlo", knots: 93, meaning: "Landing gear operating" },
    SpeedTerm { label: "Vfe", knots: 119, meaning: "Flaps extended" },
    SpeedTerm { label: "Vapp", knots: 90, meaning: "Approach" },
    SpeedTerm { label: "Vfinal", knots: 70, meaning: "Final approach" },
];

/// Validated, immutable set of terms. Built once at startup.
#[derive(Debug, Clone)]
pub struct SpeedTable {
    terms: Vec<SpeedTerm>,
}

impl SpeedTable {
    pub fn new(terms: &[SpeedTerm]) -> Result<Self, QuizError> {
        if terms.is_empty() {
            return Err(QuizError::EmptyTable);
        }
        let mut seen = HashSet::new();
        for term in terms {
            if !seen.insert(term.label) {
                return Err(QuizError::DuplicateLabel(term.label.to_string()));
            }
        }
        Ok(Self { terms: terms.to_vec() })
    }

    pub fn terms(&self) -> &[SpeedTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&SpeedTerm> {
        self.terms.iter().find(|t| t.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_eighteen_unique_terms() {
        let table = SpeedTable::new(V_SPEEDS).unwrap();
        assert_eq!(table.len(), 18);
        assert_eq!(table.get("Vr").map(|t| t.knots), Some(65));
        assert_eq!(table.get("Vne").map(|t| t.knots), Some(167));
        assert_eq!(table.get("Vfinal").map(|t| t.knots), Some(70));
    }

    #[test]
    fn empty_table_fails_fast() {
        assert_eq!(SpeedTable::new(&[]).unwrap_err(), QuizError::EmptyTable);
    }

    #[test]
    fn duplicate_label_rejected() {
        let terms = [V_SPEEDS[0], V_SPEEDS[1], V_SPEEDS[0]];
        assert_eq!(
            SpeedTable::new(&terms).unwrap_err(),
            QuizError::DuplicateLabel("Vr".to_string())
        );
    }
}
