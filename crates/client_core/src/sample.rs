//! Builtin demonstration records used when the backend cannot be reached.

use chrono::NaiveDate;
use shared::{
    domain::{ClientId, ClientStatus, DocumentType, ServiceCategory, ServiceCode, VisitFrequency},
    protocol::{Client, Service},
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn client(
    id: i64,
    document: (DocumentType, i64),
    name: &str,
    lastname: &str,
    birthday: NaiveDate,
    cellphone: i64,
    email: &str,
    registered: NaiveDate,
    ubigeo_code: &str,
    status: ClientStatus,
    frequency: VisitFrequency,
) -> Client {
    Client {
        id: Some(ClientId(id)),
        image_url: None,
        type_document: document.0.code().to_string(),
        number_document: document.1,
        name_client: name.to_string(),
        lastname: lastname.to_string(),
        birthday,
        cellphone,
        email: email.to_string(),
        registration_date: Some(registered),
        ubigeo_code: ubigeo_code.to_string(),
        status: Some(status),
        visit_frequency: frequency,
        points: Some(0),
    }
}

pub fn clients() -> Vec<Client> {
    vec![
        client(
            1,
            (DocumentType::Dni, 74859632),
            "Mariana",
            "Fernández",
            date(1992, 6, 12),
            987654321,
            "mariana.fernandez@example.com",
            date(2024, 11, 5),
            "150501",
            ClientStatus::Active,
            VisitFrequency::Frequent,
        ),
        client(
            2,
            (DocumentType::Dni, 65412398),
            "Carlos",
            "Ramos",
            date(1988, 3, 22),
            912345678,
            "carlos.ramos@example.com",
            date(2024, 7, 14),
            "150507",
            ClientStatus::Inactive,
            VisitFrequency::Occasional,
        ),
        client(
            3,
            (DocumentType::ForeignerCard, 998877665544),
            "Sofía",
            "Lopez",
            date(1995, 9, 30),
            976543210,
            "sofia.lopez@example.com",
            date(2025, 1, 10),
            "150502",
            ClientStatus::Active,
            VisitFrequency::New,
        ),
        client(
            4,
            (DocumentType::Dni, 44556677),
            "Andrés",
            "Ramírez",
            date(1988, 5, 12),
            987654321,
            "andres.ramirez@example.com",
            date(2025, 2, 5),
            "150509",
            ClientStatus::Inactive,
            VisitFrequency::Frequent,
        ),
    ]
}

fn service(
    code: &str,
    name: &str,
    category: ServiceCategory,
    price: f64,
    registered: NaiveDate,
    active: bool,
) -> Service {
    Service {
        code: Some(ServiceCode::new(code)),
        name_service: name.to_string(),
        category: Some(category),
        description_service: String::new(),
        price,
        registration_date: registered,
        state: Some(active),
    }
}

pub fn services() -> Vec<Service> {
    vec![
        service(
            "CC001",
            "Corte clásico",
            ServiceCategory::Cc,
            35.0,
            date(2024, 9, 2),
            true,
        ),
        service(
            "CM001",
            "Manicure spa",
            ServiceCategory::Cm,
            45.5,
            date(2024, 10, 18),
            true,
        ),
        service(
            "CP001",
            "Pedicure completo",
            ServiceCategory::Cp,
            55.0,
            date(2025, 1, 7),
            false,
        ),
        service(
            "DR001",
            "Depilación de rostro",
            ServiceCategory::Dr,
            25.0,
            date(2025, 2, 20),
            true,
        ),
    ]
}
