use std::cmp::Ordering;

use crate::content::ContentItem;
use crate::utils::dates::timestamp_millis;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Anything sortable by an optional date field.
pub trait Dated {
    fn date(&self) -> Option<&str>;
}

impl Dated for ContentItem {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// Blank dates count as missing. Dates that fail to parse fall back to the
/// epoch so they still order consistently among dated items.
fn sort_key(date: Option<&str>) -> Option<i64> {
    let date = date.map(str::trim).filter(|date| !date.is_empty())?;
    Some(timestamp_millis(date).unwrap_or(0))
}

fn compare_keys(a: Option<i64>, b: Option<i64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
    }
}

/// Positions of `items` in display order. Dateless items always trail and
/// keep their relative order.
pub fn sorted_indices<T: Dated>(items: &[T], order: SortOrder) -> Vec<usize> {
    let keys: Vec<Option<i64>> = items.iter().map(|item| sort_key(item.date())).collect();
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by(|&a, &b| compare_keys(keys[a], keys[b], order));
    indices
}
