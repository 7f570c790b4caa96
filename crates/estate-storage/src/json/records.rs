//! On-disk record types.
//!
//! Entities are stored as plain strings and integers and rebuilt through the
//! core builders on load, so every value is validated again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estate_core::book::AddressBook;
use estate_core::contact::{Contact, ContactBuilder};
use estate_core::enums::{ContactStatus, PropertyStatus};
use estate_core::ids::Uuid;
use estate_core::property::{Property, PropertyBuilder};

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Just the format version, read before the rest of the document so that
/// files written by another version are reported as such.
#[derive(Debug, Deserialize)]
pub struct VersionHeader {
    pub version: u32,
}

/// The top-level JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<u64>,
    #[serde(default = "default_contact_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub buying: Vec<u32>,
    #[serde(default)]
    pub selling: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: u32,
    pub address: String,
    pub postal_code: String,
    pub floor_area: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub price: u64,
    #[serde(default = "default_property_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub buyers: Vec<u32>,
    #[serde(default)]
    pub sellers: Vec<u32>,
}

fn default_contact_status() -> String {
    ContactStatus::default().as_str().to_owned()
}

fn default_property_status() -> String {
    PropertyStatus::default().as_str().to_owned()
}

fn raw_ids<'a>(ids: impl IntoIterator<Item = &'a Uuid>) -> Vec<u32> {
    ids.into_iter().map(Uuid::id).collect()
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id().id(),
            name: contact.name.to_string(),
            phone: contact.phone.to_string(),
            email: contact.email.to_string(),
            address: contact.address.as_ref().map(ToString::to_string),
            budget_min: contact.budget.min().map(|p| p.amount()),
            budget_max: contact.budget.max().map(|p| p.amount()),
            status: contact.status.as_str().to_owned(),
            tags: contact.tags.iter().map(ToString::to_string).collect(),
            buying: raw_ids(contact.buying()),
            selling: raw_ids(contact.selling()),
        }
    }
}

impl From<&Property> for PropertyRecord {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id().id(),
            address: property.address.to_string(),
            postal_code: property.postal_code.to_string(),
            floor_area: property.floor_area.square_metres(),
            bedrooms: property.bedrooms.count(),
            bathrooms: property.bathrooms.count(),
            price: property.price.amount(),
            status: property.status.as_str().to_owned(),
            tags: property.tags.iter().map(ToString::to_string).collect(),
            buyers: raw_ids(property.buyers()),
            sellers: raw_ids(property.sellers()),
        }
    }
}

impl ContactRecord {
    /// Validates the record and turns it into a [`Contact`].
    pub fn into_contact(self) -> Result<Contact, String> {
        let id = self.id;
        let status: ContactStatus = self.status.parse().map_err(|e| format!("contact {id}: {e}"))?;
        let mut builder = ContactBuilder::new(self.name, self.phone, self.email)
            .id(id)
            .budget(self.budget_min, self.budget_max)
            .status(status)
            .buying(self.buying)
            .selling(self.selling);
        if let Some(address) = self.address {
            builder = builder.address(address);
        }
        for tag in self.tags {
            builder = builder.tag(tag);
        }
        builder.build().map_err(|e| format!("contact {id}: {e}"))
    }
}

impl PropertyRecord {
    /// Validates the record and turns it into a [`Property`].
    pub fn into_property(self) -> Result<Property, String> {
        let id = self.id;
        let status: PropertyStatus =
            self.status.parse().map_err(|e| format!("property {id}: {e}"))?;
        let mut builder = PropertyBuilder::new(self.address, self.postal_code, self.price)
            .id(id)
            .floor_area(self.floor_area)
            .rooms(self.bedrooms, self.bathrooms)
            .status(status)
            .buyers(self.buyers)
            .sellers(self.sellers);
        for tag in self.tags {
            builder = builder.tag(tag);
        }
        builder.build().map_err(|e| format!("property {id}: {e}"))
    }
}

impl Document {
    /// Snapshot of `book`, stamped with the current time.
    pub fn from_book(book: &AddressBook) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            contacts: book.contacts().iter().map(ContactRecord::from).collect(),
            properties: book.properties().iter().map(PropertyRecord::from).collect(),
        }
    }

    /// Rebuilds the book, re-checking every field and link.
    pub fn into_book(self) -> Result<AddressBook, String> {
        let contacts = self
            .contacts
            .into_iter()
            .map(ContactRecord::into_contact)
            .collect::<Result<Vec<_>, _>>()?;
        let properties = self
            .properties
            .into_iter()
            .map(PropertyRecord::into_property)
            .collect::<Result<Vec<_>, _>>()?;
        AddressBook::from_parts(contacts, properties).map_err(|e| e.to_string())
    }
}
