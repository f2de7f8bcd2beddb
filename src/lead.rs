//! Lead record shared by the extractors, the synthetic generator and export.

use serde::{Deserialize, Serialize};

use crate::phone;

/// Column names in serialization order. Export writes these as the header row.
pub const LEAD_FIELDS: [&str; 7] = [
    "name", "phone", "address", "rating", "category", "email", "website",
];

/// One discovered or synthesized business record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Lead {
    /// Create a lead with the three mandatory fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            rating: None,
            category: None,
            email: None,
            website: None,
        }
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Copy of this lead with the phone passed through [`phone::normalize`].
    pub fn normalized(&self) -> Self {
        Self {
            phone: phone::normalize(&self.phone),
            ..self.clone()
        }
    }

    /// Flat row in [`LEAD_FIELDS`] order, absent optionals as empty cells.
    pub fn to_row(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.name.clone(),
            self.phone.clone(),
            self.address.clone(),
            opt(&self.rating),
            opt(&self.category),
            opt(&self.email),
            opt(&self.website),
        ]
    }
}

/// Address placeholder used when a listing block carries no address.
pub fn unknown_address(location: &str) -> String {
    format!("{} (exact address not available)", location)
}
