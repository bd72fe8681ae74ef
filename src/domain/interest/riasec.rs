//! The six interest dimensions and per-dimension score vectors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One interest dimension. Declaration order is also the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiasecCode {
    R,
    I,
    A,
    S,
    E,
    C,
}

impl RiasecCode {
    pub const ALL: [RiasecCode; 6] = [
        RiasecCode::R,
        RiasecCode::I,
        RiasecCode::A,
        RiasecCode::S,
        RiasecCode::E,
        RiasecCode::C,
    ];

    pub fn index(&self) -> usize {
        match self {
            RiasecCode::R => 0,
            RiasecCode::I => 1,
            RiasecCode::A => 2,
            RiasecCode::S => 3,
            RiasecCode::E => 4,
            RiasecCode::C => 5,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            RiasecCode::R => 'R',
            RiasecCode::I => 'I',
            RiasecCode::A => 'A',
            RiasecCode::S => 'S',
            RiasecCode::E => 'E',
            RiasecCode::C => 'C',
        }
    }

    /// Parses a single code letter, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "R" => Some(RiasecCode::R),
            "I" => Some(RiasecCode::I),
            "A" => Some(RiasecCode::A),
            "S" => Some(RiasecCode::S),
            "E" => Some(RiasecCode::E),
            "C" => Some(RiasecCode::C),
            _ => None,
        }
    }
}

impl fmt::Display for RiasecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A value per interest dimension, serialized as `{"R": .., "I": .., ..}`.
///
/// Missing keys deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiasecScores {
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

impl RiasecScores {
    pub fn from_array(values: [f64; 6]) -> Self {
        let [r, i, a, s, e, c] = values;
        Self { r, i, a, s, e, c }
    }

    pub fn uniform(value: f64) -> Self {
        Self::from_array([value; 6])
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.r, self.i, self.a, self.s, self.e, self.c]
    }

    pub fn get(&self, code: RiasecCode) -> f64 {
        self.to_array()[code.index()]
    }

    pub fn set(&mut self, code: RiasecCode, value: f64) {
        let mut values = self.to_array();
        values[code.index()] = value;
        *self = Self::from_array(values);
    }

    pub fn add(&mut self, code: RiasecCode, amount: f64) {
        self.set(code, self.get(code) + amount);
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Divides by the total; a zero total leaves the values as they are.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        let divisor = if total == 0.0 { 1.0 } else { total };
        Self::from_array(self.to_array().map(|v| v / divisor))
    }

    /// Rejects negative or non-finite components.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for code in RiasecCode::ALL {
            let v = self.get(code);
            if !v.is_finite() || v < 0.0 {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("component {} must be a finite non-negative number, got {}", code, v),
                ));
            }
        }
        Ok(())
    }

    /// Codes ordered by value, highest first; ties keep R,I,A,S,E,C order.
    pub fn ranked(&self) -> Vec<RiasecCode> {
        let mut codes = RiasecCode::ALL.to_vec();
        codes.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        codes
    }

    /// The three highest codes as a string, e.g. `"ASE"`.
    pub fn top_three(&self) -> String {
        self.ranked().iter().take(3).map(|c| c.as_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RiasecCode::parse(" s"), Some(RiasecCode::S));
        assert_eq!(RiasecCode::parse("X"), None);
    }

    #[test]
    fn missing_components_default_to_zero() {
        let scores: RiasecScores = serde_json::from_str(r#"{"A": 3, "C": 1.5}"#).unwrap();
        assert_eq!(scores.to_array(), [0.0, 0.0, 3.0, 0.0, 0.0, 1.5]);
    }

    #[test]
    fn serializes_with_letter_keys() {
        let json = serde_json::to_value(RiasecScores::uniform(1.0)).unwrap();
        assert_eq!(json["R"], 1.0);
        assert_eq!(json["C"], 1.0);
    }

    #[test]
    fn normalized_sums_to_one_or_is_noop_at_zero() {
        let n = RiasecScores::from_array([1.0, 1.0, 2.0, 0.0, 0.0, 0.0]).normalized();
        assert!((n.total() - 1.0).abs() < 1e-12);
        assert_eq!(RiasecScores::default().normalized(), RiasecScores::default());
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        assert!(RiasecScores::from_array([1.0, -1.0, 0.0, 0.0, 0.0, 0.0])
            .validate("raw_scores")
            .is_err());
        assert!(RiasecScores::from_array([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0])
            .validate("raw_scores")
            .is_err());
        assert!(RiasecScores::uniform(2.0).validate("raw_scores").is_ok());
    }

    #[test]
    fn top_three_breaks_ties_in_declaration_order() {
        let scores = RiasecScores::from_array([5.0, 9.0, 9.0, 9.0, 1.0, 9.0]);
        assert_eq!(scores.top_three(), "IAS");
        assert_eq!(RiasecScores::default().top_three(), "RIA");
    }

    #[test]
    fn add_accumulates() {
        let mut scores = RiasecScores::default();
        scores.add(RiasecCode::E, 1.0);
        scores.add(RiasecCode::E, 2.0);
        assert_eq!(scores.get(RiasecCode::E), 3.0);
    }
}
