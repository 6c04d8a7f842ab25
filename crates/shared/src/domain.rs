use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ClientId);

/// Service identifier; assigned by the backend from the category prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(pub String);

impl ServiceCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[serde(rename = "A", alias = "a")]
    Active,
    #[serde(rename = "I", alias = "i")]
    Inactive,
}

impl ClientStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// Case-insensitive parse of the single-letter wire code.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::Active),
            "I" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitFrequency {
    #[serde(rename = "N")]
    New,
    #[serde(rename = "F")]
    Frequent,
    #[serde(rename = "O")]
    Occasional,
    #[serde(rename = "H")]
    Habitual,
}

impl VisitFrequency {
    pub const ALL: [VisitFrequency; 4] = [
        VisitFrequency::New,
        VisitFrequency::Frequent,
        VisitFrequency::Occasional,
        VisitFrequency::Habitual,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::New => "N",
            Self::Frequent => "F",
            Self::Occasional => "O",
            Self::Habitual => "H",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "Cliente Nuevo",
            Self::Frequent => "Cliente Fiel",
            Self::Occasional => "Cliente Ocasional",
            Self::Habitual => "Cliente Habitual",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.code().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "DNI")]
    Dni,
    #[serde(rename = "CE")]
    ForeignerCard,
}

impl DocumentType {
    pub fn code(self) -> &'static str {
        match self {
            Self::Dni => "DNI",
            Self::ForeignerCard => "CE",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DNI" => Some(Self::Dni),
            "CE" => Some(Self::ForeignerCard),
            _ => None,
        }
    }

    /// Accepted digit count for the document number.
    pub fn number_len(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Self::Dni => 8..=8,
            Self::ForeignerCard => 12..=20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceCategory {
    Cc,
    Cm,
    Cp,
    Cr,
    Dc,
    Dr,
    Dm,
    Dp,
    Dd,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 9] = [
        ServiceCategory::Cc,
        ServiceCategory::Cm,
        ServiceCategory::Cp,
        ServiceCategory::Cr,
        ServiceCategory::Dc,
        ServiceCategory::Dr,
        ServiceCategory::Dm,
        ServiceCategory::Dp,
        ServiceCategory::Dd,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Cm => "CM",
            Self::Cp => "CP",
            Self::Cr => "CR",
            Self::Dc => "DC",
            Self::Dr => "DR",
            Self::Dm => "DM",
            Self::Dp => "DP",
            Self::Dd => "DD",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.code().eq_ignore_ascii_case(raw))
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Display name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_lowercase_codes() {
        let status: ClientStatus = serde_json::from_str("\"a\"").expect("status");
        assert_eq!(status, ClientStatus::Active);
        assert_eq!(
            serde_json::to_string(&ClientStatus::Inactive).expect("json"),
            "\"I\""
        );
    }

    #[test]
    fn frequency_parse_is_case_insensitive() {
        assert_eq!(VisitFrequency::parse("f"), Some(VisitFrequency::Frequent));
        assert_eq!(VisitFrequency::parse("x"), None);
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("Enero"));
        assert_eq!(month_name(12), Some("Diciembre"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
