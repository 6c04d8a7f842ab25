use super::*;
use crate::sample;
use shared::domain::{ClientId, ServiceCode};

fn clients_with_frequencies(frequencies: &[VisitFrequency]) -> Vec<Client> {
    let template = sample::clients().remove(0);
    frequencies
        .iter()
        .enumerate()
        .map(|(index, frequency)| {
            let mut client = template.clone();
            client.id = Some(ClientId(index as i64 + 1));
            client.visit_frequency = *frequency;
            client
        })
        .collect()
}

fn ids(clients: &[&Client]) -> Vec<i64> {
    clients
        .iter()
        .filter_map(|client| client.id.map(|id| id.0))
        .collect()
}

#[test]
fn frequency_filter_keeps_matches_in_original_order() {
    let clients = clients_with_frequencies(&[
        VisitFrequency::New,
        VisitFrequency::Frequent,
        VisitFrequency::Occasional,
        VisitFrequency::Frequent,
    ]);
    let criteria = ClientFilter {
        frequency: Some(VisitFrequency::Frequent),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &criteria)), vec![2, 4]);
    assert_eq!(filter_positions(&clients, &criteria), vec![1, 3]);
}

#[test]
fn unconstrained_filter_keeps_everything() {
    let clients = sample::clients();
    let criteria = ClientFilter::default();

    assert!(criteria.is_unconstrained());
    assert_eq!(apply_filters(&clients, &criteria).len(), clients.len());
}

#[test]
fn filtering_is_a_subset_and_idempotent() {
    let clients = sample::clients();
    let criteria = ClientFilter {
        status: Some(ClientStatus::Active),
        search: SearchTerm::new("a"),
        ..ClientFilter::default()
    };

    let once: Vec<Client> = apply_filters(&clients, &criteria)
        .into_iter()
        .cloned()
        .collect();
    assert!(once.iter().all(|client| clients.contains(client)));

    let twice: Vec<Client> = apply_filters(&once, &criteria)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn search_matches_phone_number() {
    let clients = sample::clients();
    let criteria = ClientFilter {
        search: SearchTerm::new("987654321"),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &criteria)), vec![1, 4]);
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let clients = sample::clients();
    let criteria = ClientFilter {
        search: SearchTerm::new("  FERNÁNDEZ "),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &criteria)), vec![1]);
}

#[test]
fn search_covers_document_and_email() {
    let clients = sample::clients();
    let by_document = ClientFilter {
        search: SearchTerm::new("998877"),
        ..ClientFilter::default()
    };
    let by_email = ClientFilter {
        search: SearchTerm::new("carlos.ramos@"),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &by_document)), vec![3]);
    assert_eq!(ids(&apply_filters(&clients, &by_email)), vec![2]);
}

#[test]
fn birthday_month_filter_uses_birthday() {
    let clients = sample::clients();
    let criteria = ClientFilter {
        birthday_month: Some(3),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &criteria)), vec![2]);
}

#[test]
fn contradictory_filters_yield_empty_view() {
    let clients = sample::clients();
    let criteria = ClientFilter {
        frequency: Some(VisitFrequency::New),
        status: Some(ClientStatus::Inactive),
        ..ClientFilter::default()
    };

    assert!(apply_filters(&clients, &criteria).is_empty());
}

#[test]
fn client_without_status_is_excluded_by_status_filter() {
    let mut clients = sample::clients();
    clients[0].status = None;
    let criteria = ClientFilter {
        status: Some(ClientStatus::Active),
        ..ClientFilter::default()
    };

    assert_eq!(ids(&apply_filters(&clients, &criteria)), vec![3]);
}

#[test]
fn service_filters_combine_with_and() {
    let services = sample::services();
    let criteria = ServiceFilter {
        state: Some(true),
        search: SearchTerm::new("c"),
        ..ServiceFilter::default()
    };

    let codes: Vec<&str> = apply_filters(&services, &criteria)
        .into_iter()
        .filter_map(|service| service.code.as_ref().map(ServiceCode::as_str))
        .collect();
    assert_eq!(codes, vec!["CC001", "CM001", "DR001"]);
}

#[test]
fn service_category_and_registration_month() {
    let services = sample::services();
    let by_category = ServiceFilter {
        category: Some(ServiceCategory::Cp),
        ..ServiceFilter::default()
    };
    let by_month = ServiceFilter {
        registration_month: Some(2),
        ..ServiceFilter::default()
    };

    assert_eq!(apply_filters(&services, &by_category).len(), 1);
    assert_eq!(
        apply_filters(&services, &by_month)[0].code,
        Some(ServiceCode::new("DR001"))
    );
}

#[test]
fn inactive_state_filter_treats_missing_state_as_inactive() {
    let mut services = sample::services();
    services[0].state = None;
    let criteria = ServiceFilter {
        state: Some(false),
        ..ServiceFilter::default()
    };

    assert_eq!(apply_filters(&services, &criteria).len(), 2);
}

#[test]
fn toggle_selects_then_clears() {
    let mut slot = None;
    toggle(&mut slot, VisitFrequency::Frequent);
    assert_eq!(slot, Some(VisitFrequency::Frequent));

    toggle(&mut slot, VisitFrequency::New);
    assert_eq!(slot, Some(VisitFrequency::New));

    toggle(&mut slot, VisitFrequency::New);
    assert_eq!(slot, None);
}
