//! Trait axes, pole letters and four-letter labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the four independent bipolar trait dimensions.
///
/// The order of variants is the feature-vector order and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitAxis {
    /// Introversion vs extraversion.
    #[serde(rename = "IE")]
    Ie,
    /// Sensing vs intuition.
    #[serde(rename = "SN")]
    Sn,
    /// Thinking vs feeling.
    #[serde(rename = "TF")]
    Tf,
    /// Judging vs perceiving.
    #[serde(rename = "JP")]
    Jp,
}

impl TraitAxis {
    /// All axes in feature-vector order.
    pub const ALL: [TraitAxis; 4] = [TraitAxis::Ie, TraitAxis::Sn, TraitAxis::Tf, TraitAxis::Jp];

    /// Position of this axis in feature and probability vectors.
    pub fn index(&self) -> usize {
        match self {
            TraitAxis::Ie => 0,
            TraitAxis::Sn => 1,
            TraitAxis::Tf => 2,
            TraitAxis::Jp => 3,
        }
    }

    /// Axis at the given vector position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The designated positive pole (I, S, T, J).
    pub fn positive(&self) -> TraitLetter {
        match self {
            TraitAxis::Ie => TraitLetter::I,
            TraitAxis::Sn => TraitLetter::S,
            TraitAxis::Tf => TraitLetter::T,
            TraitAxis::Jp => TraitLetter::J,
        }
    }

    /// The negative pole (E, N, F, P).
    pub fn negative(&self) -> TraitLetter {
        match self {
            TraitAxis::Ie => TraitLetter::E,
            TraitAxis::Sn => TraitLetter::N,
            TraitAxis::Tf => TraitLetter::F,
            TraitAxis::Jp => TraitLetter::P,
        }
    }

    /// Two-letter code used in log headers.
    pub fn code(&self) -> &'static str {
        match self {
            TraitAxis::Ie => "IE",
            TraitAxis::Sn => "SN",
            TraitAxis::Tf => "TF",
            TraitAxis::Jp => "JP",
        }
    }
}

impl fmt::Display for TraitAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single pole letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitLetter {
    I,
    E,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl TraitLetter {
    /// Parses a letter, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(TraitLetter::I),
            'E' => Some(TraitLetter::E),
            'S' => Some(TraitLetter::S),
            'N' => Some(TraitLetter::N),
            'T' => Some(TraitLetter::T),
            'F' => Some(TraitLetter::F),
            'J' => Some(TraitLetter::J),
            'P' => Some(TraitLetter::P),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            TraitLetter::I => 'I',
            TraitLetter::E => 'E',
            TraitLetter::S => 'S',
            TraitLetter::N => 'N',
            TraitLetter::T => 'T',
            TraitLetter::F => 'F',
            TraitLetter::J => 'J',
            TraitLetter::P => 'P',
        }
    }

    /// Axis this letter is a pole of.
    pub fn axis(&self) -> TraitAxis {
        match self {
            TraitLetter::I | TraitLetter::E => TraitAxis::Ie,
            TraitLetter::S | TraitLetter::N => TraitAxis::Sn,
            TraitLetter::T | TraitLetter::F => TraitAxis::Tf,
            TraitLetter::J | TraitLetter::P => TraitAxis::Jp,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.axis().positive() == *self
    }
}

impl fmt::Display for TraitLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Discrete four-letter trait label, one pole per axis in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraitLabel([TraitLetter; 4]);

impl TraitLabel {
    /// Thresholds each probability at 0.5; values at or above pick the positive pole.
    pub fn from_probabilities(probs: &[f64; 4]) -> Self {
        let mut letters = [TraitLetter::I; 4];
        for axis in TraitAxis::ALL {
            let i = axis.index();
            letters[i] = if probs[i] >= 0.5 {
                axis.positive()
            } else {
                axis.negative()
            };
        }
        Self(letters)
    }

    pub fn letters(&self) -> &[TraitLetter; 4] {
        &self.0
    }

    pub fn letter(&self, axis: TraitAxis) -> TraitLetter {
        self.0[axis.index()]
    }

    pub fn contains(&self, letter: TraitLetter) -> bool {
        self.0.contains(&letter)
    }
}

impl FromStr for TraitLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() != 4 {
            return Err(ValidationError::wrong_length("label", 4, chars.len()));
        }
        let mut letters = [TraitLetter::I; 4];
        for (axis, c) in TraitAxis::ALL.iter().zip(chars) {
            let letter = TraitLetter::from_char(c).ok_or_else(|| {
                ValidationError::invalid_format("label", format!("unknown letter '{}'", c))
            })?;
            if letter.axis() != *axis {
                return Err(ValidationError::invalid_format(
                    "label",
                    format!("letter '{}' is not a pole of {}", letter, axis),
                ));
            }
            letters[axis.index()] = letter;
        }
        Ok(Self(letters))
    }
}

impl TryFrom<String> for TraitLabel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TraitLabel> for String {
    fn from(label: TraitLabel) -> Self {
        label.to_string()
    }
}

impl fmt::Display for TraitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_have_fixed_pole_pairs() {
        let pairs: Vec<(char, char)> = TraitAxis::ALL
            .iter()
            .map(|a| (a.positive().as_char(), a.negative().as_char()))
            .collect();
        assert_eq!(pairs, vec![('I', 'E'), ('S', 'N'), ('T', 'F'), ('J', 'P')]);
    }

    #[test]
    fn index_round_trips() {
        for axis in TraitAxis::ALL {
            assert_eq!(TraitAxis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(TraitAxis::from_index(4), None);
    }

    #[test]
    fn letter_parse_is_case_insensitive() {
        assert_eq!(TraitLetter::parse(" e "), Some(TraitLetter::E));
        assert_eq!(TraitLetter::parse("x"), None);
        assert_eq!(TraitLetter::parse("EI"), None);
    }

    #[test]
    fn letter_knows_its_pole() {
        assert!(TraitLetter::J.is_positive());
        assert!(!TraitLetter::P.is_positive());
        assert_eq!(TraitLetter::F.axis(), TraitAxis::Tf);
    }

    #[test]
    fn label_from_probabilities_uses_inclusive_threshold() {
        let label = TraitLabel::from_probabilities(&[0.5, 0.49, 0.9, 0.1]);
        assert_eq!(label.to_string(), "INTP");
    }

    #[test]
    fn label_parses_valid_code() {
        let label: TraitLabel = "enfj".parse().unwrap();
        assert_eq!(label.to_string(), "ENFJ");
        assert!(label.contains(TraitLetter::F));
        assert_eq!(label.letter(TraitAxis::Sn), TraitLetter::N);
    }

    #[test]
    fn label_rejects_wrong_length() {
        let err = "ENF".parse::<TraitLabel>().unwrap_err();
        assert!(matches!(err, ValidationError::WrongLength { .. }));
    }

    #[test]
    fn label_rejects_letters_out_of_axis_order() {
        assert!("NEFJ".parse::<TraitLabel>().is_err());
    }

    #[test]
    fn label_serializes_as_string() {
        let label: TraitLabel = "ISTJ".parse().unwrap();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"ISTJ\"");
        let back: TraitLabel = serde_json::from_str("\"ISTJ\"").unwrap();
        assert_eq!(back, label);
    }
}
