use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn valid_client() -> ClientDraft {
    ClientDraft {
        type_document: "DNI".into(),
        number_document: "74859632".into(),
        name_client: "Mariana".into(),
        lastname: "Fernández".into(),
        birthday: "1992-06-12".into(),
        cellphone: "987654321".into(),
        email: "mariana@example.com".into(),
        ubigeo_code: "150501".into(),
        visit_frequency: "F".into(),
        ..ClientDraft::default()
    }
}

fn valid_service() -> ServiceDraft {
    ServiceDraft {
        category: "CC".into(),
        name_service: "Corte (clásico)".into(),
        description_service: "Incluye lavado, secado y peinado.".into(),
        price: "35.50".into(),
        ..ServiceDraft::default()
    }
}

#[test]
fn valid_client_draft_builds_active_record() {
    let client = valid_client().validate(today()).unwrap();

    assert_eq!(client.type_document, "DNI");
    assert_eq!(client.number_document, 74859632);
    assert_eq!(client.cellphone, 987654321);
    assert_eq!(client.status, Some(ClientStatus::Active));
    assert_eq!(client.registration_date, Some(today()));
    assert_eq!(client.points, Some(0));
    assert_eq!(client.id, None);
}

#[test]
fn document_length_depends_on_type() {
    let mut draft = valid_client();
    draft.number_document = "1234567".into();
    let errors = draft.validate(today()).unwrap_err();
    assert_eq!(errors.get("numberDocument"), Some("must be exactly 8 digits"));

    draft.type_document = "CE".into();
    draft.number_document = "74859632".into();
    let errors = draft.validate(today()).unwrap_err();
    assert_eq!(errors.get("numberDocument"), Some("must be 12 to 20 digits"));

    draft.number_document = "998877665544".into();
    assert!(draft.validate(today()).is_ok());
}

#[test]
fn client_must_be_adult_on_the_given_day() {
    let mut draft = valid_client();
    draft.birthday = "2007-06-16".into();
    let errors = draft.validate(today()).unwrap_err();
    assert!(errors.get("birthday").is_some());

    draft.birthday = "2007-06-15".into();
    assert!(draft.validate(today()).is_ok());
}

#[test]
fn phone_must_start_with_nine() {
    let mut draft = valid_client();
    for phone in ["887654321", "98765432", "98765432a"] {
        draft.cellphone = phone.into();
        let errors = draft.validate(today()).unwrap_err();
        assert!(errors.get("cellphone").is_some(), "{phone}");
    }
}

#[test]
fn rejects_malformed_email_and_names() {
    let mut draft = valid_client();
    draft.email = "mariana@example".into();
    draft.name_client = "Ma".into();
    draft.lastname = "R2".into();

    let errors = draft.validate(today()).unwrap_err();
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["email", "lastname", "nameClient"]
    );
}

#[test]
fn names_accept_spaces_and_spanish_letters_only() {
    let mut draft = valid_client();
    draft.name_client = "María José".into();
    draft.lastname = "Núñez del Río".into();
    assert!(draft.validate(today()).is_ok());

    draft.name_client = "María\tJosé".into();
    assert!(draft.validate(today()).is_ok());

    for name in ["Ana-María", "José_Luis", "Zoë"] {
        draft.name_client = name.into();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(
            errors.get("nameClient"),
            Some("only letters and spaces are allowed"),
            "{name}"
        );
    }
}

#[test]
fn document_number_must_be_plain_digits() {
    let mut draft = valid_client();
    for number in ["7485963a", "+7485963", "７４８５９６３２"] {
        draft.number_document = number.into();
        let errors = draft.validate(today()).unwrap_err();
        assert!(errors.get("numberDocument").is_some(), "{number}");
    }
}

#[test]
fn email_needs_one_at_and_a_dotted_domain() {
    let mut draft = valid_client();
    for email in ["a@b@c.com", "@example.com", "mariana@.", "mariana.example.com"] {
        draft.email = email.into();
        assert!(draft.validate(today()).is_err(), "{email}");
    }
    draft.email = "m.perez+spa@mail.example.pe".into();
    assert!(draft.validate(today()).is_ok());
}

#[test]
fn empty_client_draft_reports_every_required_field() {
    let errors = ClientDraft::default().validate(today()).unwrap_err();

    for field in ClientDraft::FIELDS.iter().filter(|field| **field != "points") {
        assert_eq!(errors.get(field), Some("required"), "{field}");
    }
    assert_eq!(errors.get("points"), None);
}

#[test]
fn negative_points_are_rejected() {
    let mut draft = valid_client();
    draft.points = "-1".into();

    let errors = draft.validate(today()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("points").is_some());
}

#[test]
fn draft_from_client_round_trips_through_validation() {
    let client = crate::sample::clients().remove(0);
    let draft = ClientDraft::from(&client);

    assert_eq!(draft.validate(today()).unwrap(), client);
}

#[test]
fn valid_service_draft_defaults_state_and_date() {
    let service = valid_service().validate(today()).unwrap();

    assert_eq!(service.category, Some(ServiceCategory::Cc));
    assert_eq!(service.price, 35.5);
    assert_eq!(service.registration_date, today());
    assert_eq!(service.state, Some(true));
    assert_eq!(service.code, None);
}

#[test]
fn service_price_rules() {
    let mut draft = valid_service();
    for (price, ok) in [
        ("10", true),
        ("999.99", true),
        ("9.99", false),
        ("1000", false),
        ("12.345", false),
        ("12,50", false),
    ] {
        draft.price = price.into();
        assert_eq!(draft.validate(today()).is_ok(), ok, "{price}");
    }
}

#[test]
fn service_name_and_description_rules() {
    let mut draft = valid_service();
    draft.name_service = "1Corte".into();
    draft.description_service = " empieza con espacio".into();

    let errors = draft.validate(today()).unwrap_err();
    assert!(errors.get("nameService").is_some());
    assert!(errors.get("descriptionService").is_some());

    draft.name_service = "Corte".into();
    draft.description_service = String::new();
    assert!(draft.validate(today()).is_ok());

    draft.name_service = "Manicure/Pedicure (spa)".into();
    draft.description_service = "Precio #1: 50% menos".into();
    let errors = draft.validate(today()).unwrap_err();
    assert!(errors.get("nameService").is_none());
    assert!(errors.get("descriptionService").is_some());

    draft.description_service = "Precio #1: uñas + 2 diseños; (promo)".into();
    assert!(draft.validate(today()).is_ok());
}

#[test]
fn form_state_hides_errors_until_touched() {
    let mut form = FormState::new(ServiceDraft::default());
    assert!(form.visible_error("category").is_none());

    assert!(form.check(today()).is_err());
    assert!(form.is_touched("price"));
    assert_eq!(form.visible_error("category"), Some("required"));

    form.reset(valid_service());
    assert!(!form.is_touched("price"));
    assert!(form.check(today()).is_ok());
    assert!(form.visible_error("category").is_none());
}
