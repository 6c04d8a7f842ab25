//! Sort comparators.
//!
//! Ordering is made deterministic by breaking ties on the position a record
//! held before sorting, so the result never depends on the stability of the
//! underlying sort primitive.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::DateAsc => "date_asc",
            Self::DateDesc => "date_desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name_asc" | "az" => Ok(Self::NameAsc),
            "name_desc" | "za" => Ok(Self::NameDesc),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "date_asc" => Ok(Self::DateAsc),
            "date_desc" => Ok(Self::DateDesc),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Fields a record exposes to the comparators.
pub trait SortFields {
    fn sort_name(&self) -> &str;

    fn sort_price(&self) -> Option<f64> {
        None
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Keys this entity kind can be ordered by; others leave the order untouched.
    fn supports(key: SortKey) -> bool;
}

pub fn compare<R: SortFields>(key: SortKey, a: &R, b: &R) -> Ordering {
    match key {
        SortKey::NameAsc => collate(a.sort_name(), b.sort_name()),
        SortKey::NameDesc => collate(b.sort_name(), a.sort_name()),
        SortKey::PriceAsc => compare_price(a.sort_price(), b.sort_price()),
        SortKey::PriceDesc => compare_price(b.sort_price(), a.sort_price()),
        SortKey::DateAsc => a.sort_date().cmp(&b.sort_date()),
        SortKey::DateDesc => b.sort_date().cmp(&a.sort_date()),
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Reorders positions into `records`; ties keep their incoming relative order.
pub fn sort_positions<R: SortFields>(records: &[R], positions: &mut Vec<usize>, key: Option<SortKey>) {
    let Some(key) = key.filter(|key| R::supports(*key)) else {
        return;
    };
    let mut ranked: Vec<(usize, usize)> = positions.iter().copied().enumerate().collect();
    ranked.sort_unstable_by(|(rank_a, a), (rank_b, b)| {
        compare(key, &records[*a], &records[*b]).then(rank_a.cmp(rank_b))
    });
    *positions = ranked.into_iter().map(|(_, position)| position).collect();
}

pub fn sort_records<R: SortFields>(view: &mut Vec<&R>, key: Option<SortKey>) {
    let Some(key) = key.filter(|key| R::supports(*key)) else {
        return;
    };
    let mut ranked: Vec<(usize, &R)> = view.drain(..).enumerate().collect();
    ranked.sort_unstable_by(|(rank_a, a), (rank_b, b)| {
        compare(key, *a, *b).then(rank_a.cmp(rank_b))
    });
    view.extend(ranked.into_iter().map(|(_, record)| record));
}

/// Accent- and case-insensitive comparison with accent and case as tie-breakers,
/// approximating a Spanish locale collation (`ñ` sorts between `n` and `o`).
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(&primary_weights(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn primary_weights(value: &str) -> Vec<u32> {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            let base = match c {
                'á' | 'à' | 'ä' | 'â' => 'a',
                'é' | 'è' | 'ë' | 'ê' => 'e',
                'í' | 'ì' | 'ï' | 'î' => 'i',
                'ó' | 'ò' | 'ö' | 'ô' => 'o',
                'ú' | 'ù' | 'ü' | 'û' => 'u',
                'ç' => 'c',
                'ñ' => return (u32::from('n') << 1) | 1,
                other => other,
            };
            u32::from(base) << 1
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
