//! Local form validation. Invalid drafts never reach the data source.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::LazyLock,
};

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use shared::{
    domain::{ClientId, ClientStatus, DocumentType, ServiceCategory, ServiceCode, VisitFrequency},
    protocol::{Client, Service},
};

const MINIMUM_AGE_YEARS: i32 = 18;
const MINIMUM_SERVICE_PRICE: f64 = 10.0;

/// Field name → first failing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

pub trait Validate {
    type Output;

    /// Every field of the form, in display order.
    const FIELDS: &'static [&'static str];

    fn validate(&self, today: NaiveDate) -> Result<Self::Output, ValidationErrors>;
}

/// A draft plus the touched/error bookkeeping a form view renders from.
#[derive(Debug, Clone)]
pub struct FormState<D> {
    pub draft: D,
    touched: BTreeSet<&'static str>,
    errors: ValidationErrors,
}

impl<D: Validate> FormState<D> {
    pub fn new(draft: D) -> Self {
        Self {
            draft,
            touched: BTreeSet::new(),
            errors: ValidationErrors::default(),
        }
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(D::FIELDS.iter().copied());
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Error shown next to `field`; hidden until the field is touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Validates for submission, revealing every error.
    pub fn check(&mut self, today: NaiveDate) -> Result<D::Output, ValidationErrors> {
        self.mark_all_touched();
        match self.draft.validate(today) {
            Ok(output) => {
                self.errors = ValidationErrors::default();
                Ok(output)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    pub fn reset(&mut self, draft: D) {
        self.draft = draft;
        self.touched.clear();
        self.errors = ValidationErrors::default();
    }
}

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).unwrap_or_else(|err| panic!("invalid builtin pattern {raw}: {err}"))
}

static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$"));
static DNI_NUMBER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{8}$"));
static CE_NUMBER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{12,20}$"));
static ANY_DOCUMENT_NUMBER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{8,20}$"));
static CELLPHONE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^9[0-9]{8}$"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[^@]+@[^@]+\.[^@]+$"));
static SERVICE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ][a-zA-ZáéíóúÁÉÍÓÚñÑ\s\-/().]*$")
});
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^[^\s][0-9A-Za-z_\sáéíóúÁÉÍÓÚñÑ.,;:+#()\-/]*$")
});
static PRICE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{1,3}(\.[0-9]{0,2})?$"));

fn document_number_pattern(type_document: Option<DocumentType>) -> &'static Regex {
    match type_document {
        Some(DocumentType::Dni) => &DNI_NUMBER,
        Some(DocumentType::ForeignerCard) => &CE_NUMBER,
        None => &ANY_DOCUMENT_NUMBER,
    }
}

fn required<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &'a str,
) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "required");
        None
    } else {
        Some(value)
    }
}

fn parse_date(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<NaiveDate> {
    let raw = required(errors, field, raw)?;
    let date = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(field, "must be a date (YYYY-MM-DD)");
            None
        }
    }
}

fn is_adult(birthday: NaiveDate, today: NaiveDate) -> bool {
    let mut years = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years >= MINIMUM_AGE_YEARS
}

/// Raw client form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDraft {
    pub id: Option<ClientId>,
    pub type_document: String,
    pub number_document: String,
    pub name_client: String,
    pub lastname: String,
    pub birthday: String,
    pub cellphone: String,
    pub email: String,
    pub ubigeo_code: String,
    pub visit_frequency: String,
    pub points: String,
    pub image_url: Option<String>,
    pub status: Option<ClientStatus>,
    pub registration_date: Option<NaiveDate>,
}

impl From<&Client> for ClientDraft {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            type_document: client.type_document.clone(),
            number_document: client.number_document.to_string(),
            name_client: client.name_client.clone(),
            lastname: client.lastname.clone(),
            birthday: client.birthday.format("%Y-%m-%d").to_string(),
            cellphone: client.cellphone.to_string(),
            email: client.email.clone(),
            ubigeo_code: client.ubigeo_code.clone(),
            visit_frequency: client.visit_frequency.code().to_string(),
            points: client.points.unwrap_or_default().to_string(),
            image_url: client.image_url.clone(),
            status: client.status,
            registration_date: client.registration_date,
        }
    }
}

impl Validate for ClientDraft {
    type Output = Client;

    const FIELDS: &'static [&'static str] = &[
        "typeDocument",
        "numberDocument",
        "nameClient",
        "lastname",
        "birthday",
        "cellphone",
        "email",
        "ubigeoCode",
        "visitFrequency",
        "points",
    ];

    fn validate(&self, today: NaiveDate) -> Result<Client, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let type_document = required(&mut errors, "typeDocument", &self.type_document).and_then(
            |raw| {
                let parsed = DocumentType::parse(raw);
                if parsed.is_none() {
                    errors.insert("typeDocument", "must be DNI or CE");
                }
                parsed
            },
        );

        let number_document = required(&mut errors, "numberDocument", &self.number_document)
            .and_then(|raw| {
                if !document_number_pattern(type_document).is_match(raw) {
                    let expected = type_document.map_or(8..=20, DocumentType::number_len);
                    let (min, max) = (expected.start(), expected.end());
                    let rule = if min == max {
                        format!("must be exactly {min} digits")
                    } else {
                        format!("must be {min} to {max} digits")
                    };
                    errors.insert("numberDocument", rule);
                    return None;
                }
                raw.parse::<i64>().ok()
            });

        let name_client = required(&mut errors, "nameClient", &self.name_client).and_then(|raw| {
            if !PERSON_NAME.is_match(raw) {
                errors.insert("nameClient", "only letters and spaces are allowed");
                None
            } else if raw.chars().count() < 3 {
                errors.insert("nameClient", "must be at least 3 characters");
                None
            } else {
                Some(raw.to_string())
            }
        });

        let lastname = required(&mut errors, "lastname", &self.lastname).and_then(|raw| {
            if !PERSON_NAME.is_match(raw) {
                errors.insert("lastname", "only letters and spaces are allowed");
                None
            } else if raw.chars().count() < 2 {
                errors.insert("lastname", "must be at least 2 characters");
                None
            } else {
                Some(raw.to_string())
            }
        });

        let birthday = parse_date(&mut errors, "birthday", &self.birthday).and_then(|birthday| {
            if is_adult(birthday, today) {
                Some(birthday)
            } else {
                errors.insert("birthday", "client must be at least 18 years old");
                None
            }
        });

        let cellphone = required(&mut errors, "cellphone", &self.cellphone).and_then(|raw| {
            if CELLPHONE.is_match(raw) {
                raw.parse::<i64>().ok()
            } else {
                errors.insert("cellphone", "must be 9 digits starting with 9");
                None
            }
        });

        let email = required(&mut errors, "email", &self.email).and_then(|raw| {
            if EMAIL.is_match(raw) {
                Some(raw.to_string())
            } else {
                errors.insert("email", "must be a valid email address");
                None
            }
        });

        let ubigeo_code = required(&mut errors, "ubigeoCode", &self.ubigeo_code).map(str::to_string);

        let visit_frequency = required(&mut errors, "visitFrequency", &self.visit_frequency)
            .and_then(|raw| {
                let parsed = VisitFrequency::parse(raw);
                if parsed.is_none() {
                    errors.insert("visitFrequency", "must be one of N, F, O, H");
                }
                parsed
            });

        let points = {
            let raw = self.points.trim();
            if raw.is_empty() {
                Some(0)
            } else {
                match raw.parse::<i64>() {
                    Ok(points) if points >= 0 => Some(points),
                    _ => {
                        errors.insert("points", "must be a whole number of at least 0");
                        None
                    }
                }
            }
        };

        match (
            type_document,
            number_document,
            name_client,
            lastname,
            birthday,
            cellphone,
            email,
            ubigeo_code,
            visit_frequency,
            points,
        ) {
            (
                Some(type_document),
                Some(number_document),
                Some(name_client),
                Some(lastname),
                Some(birthday),
                Some(cellphone),
                Some(email),
                Some(ubigeo_code),
                Some(visit_frequency),
                Some(points),
            ) if errors.is_empty() => Ok(Client {
                id: self.id,
                image_url: self.image_url.clone().filter(|url| !url.trim().is_empty()),
                type_document: type_document.code().to_string(),
                number_document,
                name_client,
                lastname,
                birthday,
                cellphone,
                email,
                registration_date: Some(self.registration_date.unwrap_or(today)),
                ubigeo_code,
                status: Some(self.status.unwrap_or(ClientStatus::Active)),
                visit_frequency,
                points: Some(points),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw service form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub code: Option<ServiceCode>,
    pub category: String,
    pub name_service: String,
    pub description_service: String,
    pub price: String,
    pub registration_date: Option<NaiveDate>,
    pub state: Option<bool>,
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            code: service.code.clone(),
            category: service
                .category
                .map(|category| category.code().to_string())
                .unwrap_or_default(),
            name_service: service.name_service.clone(),
            description_service: service.description_service.clone(),
            price: format!("{:.2}", service.price),
            registration_date: Some(service.registration_date),
            state: service.state,
        }
    }
}

impl Validate for ServiceDraft {
    type Output = Service;

    const FIELDS: &'static [&'static str] = &[
        "category",
        "nameService",
        "descriptionService",
        "price",
    ];

    fn validate(&self, today: NaiveDate) -> Result<Service, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let category = required(&mut errors, "category", &self.category).and_then(|raw| {
            let parsed = ServiceCategory::parse(raw);
            if parsed.is_none() {
                errors.insert("category", "unknown category");
            }
            parsed
        });

        let name_service = required(&mut errors, "nameService", &self.name_service).and_then(|raw| {
            if !(3..=50).contains(&raw.chars().count()) {
                errors.insert("nameService", "must be 3 to 50 characters");
                None
            } else if !SERVICE_NAME.is_match(raw) {
                errors.insert(
                    "nameService",
                    "must start with a letter and use letters, spaces or -/().",
                );
                None
            } else {
                Some(raw.to_string())
            }
        });

        let description_service = {
            let raw = self.description_service.as_str();
            if raw.is_empty() {
                Some(String::new())
            } else {
                if !(3..=500).contains(&raw.chars().count()) {
                    errors.insert("descriptionService", "must be 3 to 500 characters");
                    None
                } else if !DESCRIPTION.is_match(raw) {
                    errors.insert(
                        "descriptionService",
                        "must not start with a space and may only use letters, digits and .,;:+#()-/",
                    );
                    None
                } else {
                    Some(raw.to_string())
                }
            }
        };

        let price = required(&mut errors, "price", &self.price).and_then(|raw| {
            if !PRICE.is_match(raw) {
                errors.insert("price", "up to 3 digits and 2 decimals");
                return None;
            }
            match raw.parse::<f64>() {
                Ok(price) if price >= MINIMUM_SERVICE_PRICE => Some(price),
                _ => {
                    errors.insert("price", "must be at least 10");
                    None
                }
            }
        });

        match (category, name_service, description_service, price) {
            (Some(category), Some(name_service), Some(description_service), Some(price))
                if errors.is_empty() =>
            {
                Ok(Service {
                    code: self.code.clone(),
                    name_service,
                    category: Some(category),
                    description_service,
                    price,
                    registration_date: self.registration_date.unwrap_or(today),
                    state: Some(self.state.unwrap_or(true)),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
