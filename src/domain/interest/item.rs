//! Interest items and the item bank.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::RiasecCode;
use crate::domain::foundation::{QuestionId, ValidationError};

/// One Likert item keyed to an interest dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestItem {
    pub id: QuestionId,
    pub text: String,
    pub code: RiasecCode,
}

/// All interest items, sorted by numeric id when every id is numeric.
#[derive(Debug, Clone)]
pub struct InterestItemBank {
    items: Vec<InterestItem>,
    by_id: HashMap<QuestionId, usize>,
}

impl InterestItemBank {
    pub fn new(mut items: Vec<InterestItem>) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::empty_field("interest_items"));
        }
        let numeric: Option<Vec<i64>> = items.iter().map(|i| i.id.as_str().parse().ok()).collect();
        if numeric.is_some() {
            items.sort_by_key(|i| i.id.as_str().parse::<i64>().unwrap_or(i64::MAX));
        }

        let mut by_id = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), pos).is_some() {
                return Err(ValidationError::invalid_format(
                    "interest_items",
                    format!("duplicate item id '{}'", item.id),
                ));
            }
        }
        Ok(Self { items, by_id })
    }

    pub fn get(&self, id: &QuestionId) -> Option<&InterestItem> {
        self.by_id.get(id).map(|&pos| &self.items[pos])
    }

    pub fn code_of(&self, id: &QuestionId) -> Option<RiasecCode> {
        self.get(id).map(|item| item.code)
    }

    pub fn items(&self) -> &[InterestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, code: RiasecCode) -> InterestItem {
        InterestItem {
            id: QuestionId::new(id).unwrap(),
            text: format!("Item {id}"),
            code,
        }
    }

    #[test]
    fn numeric_ids_are_sorted_numerically() {
        let bank = InterestItemBank::new(vec![
            item("10", RiasecCode::R),
            item("2", RiasecCode::I),
            item("1", RiasecCode::A),
        ])
        .unwrap();
        let ids: Vec<&str> = bank.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn non_numeric_ids_keep_file_order() {
        let bank = InterestItemBank::new(vec![
            item("b", RiasecCode::R),
            item("a", RiasecCode::I),
        ])
        .unwrap();
        assert_eq!(bank.items()[0].id.as_str(), "b");
    }

    #[test]
    fn rejects_empty_and_duplicate_ids() {
        assert!(InterestItemBank::new(vec![]).is_err());
        assert!(InterestItemBank::new(vec![item("1", RiasecCode::R), item("1", RiasecCode::C)]).is_err());
    }

    #[test]
    fn looks_up_code_by_id() {
        let bank = InterestItemBank::new(vec![item("7", RiasecCode::E)]).unwrap();
        assert_eq!(bank.code_of(&QuestionId::new("7").unwrap()), Some(RiasecCode::E));
        assert_eq!(bank.code_of(&QuestionId::new("8").unwrap()), None);
    }
}
