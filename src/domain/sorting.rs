use crate::domain::card::Card;
use std::str::FromStr;

/// Fields available for sorting cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Priority,
    Created,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "priority" => Ok(SortField::Priority),
            "created" => Ok(SortField::Created),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: title, priority, created",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts cards in-place by the given field and direction.
///
/// The sort is stable. Priority compares the interpreted label, so unknown
/// labels rank with `LOW`.
///
/// # Examples
/// ```
/// use fuzzygo_core::domain::card::Card;
/// use fuzzygo_core::domain::sorting::{sort_cards, SortField, SortOrder};
///
/// let mut cards = vec![
///     Card::new("p".to_string(), "l".to_string(), "b".to_string()).with_priority("LOW"),
///     Card::new("p".to_string(), "l".to_string(), "a".to_string()).with_priority("CRITICAL"),
/// ];
///
/// sort_cards(&mut cards, SortField::Priority, SortOrder::Descending);
/// assert_eq!(cards[0].title, "a");
/// ```
pub fn sort_cards(cards: &mut [Card], field: SortField, order: SortOrder) {
    cards.sort_by(|a, b| {
        let cmp = match field {
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Priority => a.priority_level().cmp(&b.priority_level()),
            SortField::Created => a.created_at.cmp(&b.created_at),
        };

        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}
