use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ClientId, ClientStatus, ServiceCategory, ServiceCode, VisitFrequency};

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Document type code as sent by the backend; `DNI` and `CE` are the
    /// ones the console's form can produce.
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_document: String,
    pub number_document: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_client: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lastname: String,
    pub birthday: NaiveDate,
    pub cellphone: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ubigeo_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    pub visit_frequency: VisitFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ServiceCode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ServiceCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description_service: String,
    pub price: f64,
    pub registration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<bool>,
}

pub fn client_collection_route() -> &'static str {
    "/v1/api/client"
}

pub fn client_item_route(id: ClientId) -> String {
    format!("/v1/api/client/{}", id.0)
}

pub fn client_status_route(id: ClientId, active: bool) -> String {
    let action = if active { "restore" } else { "delete" };
    format!("/v1/api/client/{action}/{}", id.0)
}

pub fn service_collection_route() -> &'static str {
    "/v1/api/service"
}

pub fn service_save_route() -> &'static str {
    "/v1/api/service/save"
}

pub fn service_update_route() -> &'static str {
    "/v1/api/service/update"
}

pub fn service_status_route(code: &ServiceCode, active: bool) -> String {
    let action = if active { "restore" } else { "delete" };
    format!("/v1/api/service/{action}/{}", code.as_str())
}
