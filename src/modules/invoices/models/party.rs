use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street_address: String,
    pub extended_address: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Address {
    /// Printable lines, empty parts skipped
    ///
    /// Postal code and city share a line, as do state and country.
    pub fn formatted(&self) -> Vec<String> {
        let joined = |a: &str, b: &str| {
            [a.trim(), b.trim()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        };

        [
            self.street_address.trim().to_string(),
            self.extended_address.trim().to_string(),
            joined(&self.postal_code, &self.city),
            if self.state.trim().is_empty() || self.country.trim().is_empty() {
                joined(&self.state, &self.country)
            } else {
                format!("{}, {}", self.state.trim(), self.country.trim())
            },
        ]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.formatted().is_empty()
    }
}

/// Person the document is addressed to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
}

impl Contact {
    /// "Jane Doe", or "Jane DOE" with `upper_name`
    pub fn full_name(&self, upper_name: bool) -> String {
        let last = if upper_name {
            self.last_name.trim().to_uppercase()
        } else {
            self.last_name.trim().to_string()
        };
        [self.first_name.trim(), last.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub corporate_name: String,
}

/// Company issuing the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub name: String,
    /// Legal registration parts shown in the footer (VAT number, registry, ...)
    #[serde(default)]
    pub registration_info: Vec<String>,
    /// PNG or JPEG printed next to the sender block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

impl Tenant {
    /// "Acme SARL - VAT FR00123456789 - RCS Paris 123 456 789"
    pub fn registration_line(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.registration_info.iter().map(String::as_str))
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// User who issued the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    pub full_name: String,
}
