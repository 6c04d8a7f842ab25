//! Filter predicates over list records.
//!
//! A criteria value holds one optional constraint per dimension; an absent
//! constraint never excludes a record. Active constraints combine with AND, so
//! contradictory selections simply produce an empty view.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use shared::{
    domain::{ClientStatus, ServiceCategory, VisitFrequency},
    protocol::{Client, Service},
};

pub trait FilterCriteria<R>: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn matches(&self, record: &R) -> bool;

    /// True when no dimension is constrained.
    fn is_unconstrained(&self) -> bool;
}

/// Positions of the matching records, in collection order.
pub fn filter_positions<R, F: FilterCriteria<R>>(records: &[R], criteria: &F) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(position, _)| position)
        .collect()
}

pub fn apply_filters<'a, R, F: FilterCriteria<R>>(records: &'a [R], criteria: &F) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

/// Normalised free-text term; empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any field contains the term, ignoring case.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        if self.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn month_matches(selected: Option<u32>, date: NaiveDate) -> bool {
    selected.map_or(true, |month| date.month() == month)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub frequency: Option<VisitFrequency>,
    pub status: Option<ClientStatus>,
    /// 1-based birthday month.
    pub birthday_month: Option<u32>,
    pub search: SearchTerm,
}

impl FilterCriteria<Client> for ClientFilter {
    fn matches(&self, client: &Client) -> bool {
        let frequency = self
            .frequency
            .map_or(true, |frequency| client.visit_frequency == frequency);
        let status = self
            .status
            .map_or(true, |status| client.status == Some(status));
        let birthday = month_matches(self.birthday_month, client.birthday);
        if !(frequency && status && birthday) {
            return false;
        }

        let document = client.number_document.to_string();
        let phone = client.cellphone.to_string();
        self.search.matches_any([
            client.name_client.as_str(),
            client.lastname.as_str(),
            document.as_str(),
            phone.as_str(),
            client.email.as_str(),
        ])
    }

    fn is_unconstrained(&self) -> bool {
        self.frequency.is_none()
            && self.status.is_none()
            && self.birthday_month.is_none()
            && self.search.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub category: Option<ServiceCategory>,
    /// `Some(true)` keeps active services only.
    pub state: Option<bool>,
    /// 1-based registration month.
    pub registration_month: Option<u32>,
    pub search: SearchTerm,
}

impl FilterCriteria<Service> for ServiceFilter {
    fn matches(&self, service: &Service) -> bool {
        let category = self
            .category
            .map_or(true, |category| service.category == Some(category));
        let state = self
            .state
            .map_or(true, |state| service.state.unwrap_or(false) == state);
        let month = month_matches(self.registration_month, service.registration_date);
        if !(category && state && month) {
            return false;
        }

        let code = service
            .code
            .as_ref()
            .map(|code| code.as_str())
            .unwrap_or_default();
        self.search
            .matches_any([code, service.name_service.as_str()])
    }

    fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.state.is_none()
            && self.registration_month.is_none()
            && self.search.is_empty()
    }
}

/// Selecting the already-selected value clears it.
pub fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
