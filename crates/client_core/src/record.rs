//! Entity records as the list engine sees them.

use std::{fmt, hash::Hash};

use chrono::NaiveDate;
use shared::{
    domain::{ClientId, ClientStatus, ServiceCode},
    protocol::{Client, Service},
};

use crate::sort::{SortFields, SortKey};

/// A persisted-or-draft entity that can be listed, soft deleted and restored.
pub trait ListRecord: SortFields + Clone + fmt::Debug + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Entity name used in logs and notices.
    const KIND: &'static str;

    /// Whether freshly fetched collections are shown newest first.
    const NEWEST_FIRST: bool = false;

    /// Server-assigned identifier, `None` until the record is persisted.
    fn record_id(&self) -> Option<Self::Id>;

    fn is_active(&self) -> bool;

    /// Builtin records shown when the backend cannot be reached.
    fn fallback_sample() -> Vec<Self>;
}

impl ListRecord for Client {
    type Id = ClientId;

    const KIND: &'static str = "client";
    const NEWEST_FIRST: bool = true;

    fn record_id(&self) -> Option<ClientId> {
        self.id
    }

    fn is_active(&self) -> bool {
        self.status.is_some_and(ClientStatus::is_active)
    }

    fn fallback_sample() -> Vec<Self> {
        crate::sample::clients()
    }
}

impl SortFields for Client {
    fn sort_name(&self) -> &str {
        &self.name_client
    }

    fn supports(key: SortKey) -> bool {
        matches!(key, SortKey::NameAsc | SortKey::NameDesc)
    }
}

impl ListRecord for Service {
    type Id = ServiceCode;

    const KIND: &'static str = "service";

    fn record_id(&self) -> Option<ServiceCode> {
        self.code
            .as_ref()
            .filter(|code| !code.as_str().trim().is_empty())
            .cloned()
    }

    fn is_active(&self) -> bool {
        self.state.unwrap_or(false)
    }

    fn fallback_sample() -> Vec<Self> {
        crate::sample::services()
    }
}

impl SortFields for Service {
    fn sort_name(&self) -> &str {
        &self.name_service
    }

    fn sort_price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        Some(self.registration_date)
    }

    fn supports(_key: SortKey) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_service_code_is_not_an_identifier() {
        let mut service = crate::sample::services().remove(0);
        service.code = Some(ServiceCode::new("  "));
        assert_eq!(service.record_id(), None);
    }

    #[test]
    fn client_without_status_counts_as_inactive() {
        let mut client = crate::sample::clients().remove(0);
        client.status = None;
        assert!(!client.is_active());
        client.status = Some(ClientStatus::Active);
        assert!(client.is_active());
    }
}
