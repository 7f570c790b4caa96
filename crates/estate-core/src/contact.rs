//! Contact -- a person who buys or sells properties.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::enums::ContactStatus;
use crate::fields::{Address, Budget, Email, Name, Phone, Price, Tag};
use crate::ids::Uuid;
use crate::validation::ValidationError;

/// A person tracked by the address book.
///
/// The link sets (`buying`, `selling`) hold property ids and are only changed
/// through [`AddressBook`](crate::book::AddressBook) so that both sides of a
/// link stay in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub(crate) id: Uuid,
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Budget::is_unbounded")]
    pub budget: Budget,
    pub status: ContactStatus,
    pub tags: BTreeSet<Tag>,
    pub(crate) buying: BTreeSet<Uuid>,
    pub(crate) selling: BTreeSet<Uuid>,
}

impl Contact {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Property ids this contact is buying.
    pub fn buying(&self) -> &BTreeSet<Uuid> {
        &self.buying
    }

    /// Property ids this contact is selling.
    pub fn selling(&self) -> &BTreeSet<Uuid> {
        &self.selling
    }

    /// Returns `true` if a contact with this name or phone is the same person.
    ///
    /// Names compare case-insensitively.
    pub fn is_same(&self, name: &Name, phone: &Phone) -> bool {
        self.name.as_str().to_lowercase() == name.as_str().to_lowercase() || self.phone == *phone
    }

    /// Returns `true` if the contact carries every tag in `tags`.
    pub fn has_tags(&self, tags: &[Tag]) -> bool {
        tags.iter().all(|t| self.tags.contains(t))
    }
}

/// The fields of a contact about to be added; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Option<Address>,
    pub budget: Budget,
    pub tags: BTreeSet<Tag>,
}

/// Typed partial update for a contact.
///
/// Only `Some` fields are applied. For the nested options, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdates {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Option<Address>>,
    pub budget_min: Option<Option<Price>>,
    pub budget_max: Option<Option<Price>>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl ContactUpdates {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.budget_min.is_none()
            && self.budget_max.is_none()
            && self.tags.is_none()
    }
}

/// Builds a [`Contact`] from raw field values, validating each one.
///
/// Used for persisted records and sample data.
#[derive(Debug, Clone, Default)]
pub struct ContactBuilder {
    id: u32,
    name: String,
    phone: String,
    email: String,
    address: Option<String>,
    budget_min: Option<u64>,
    budget_max: Option<u64>,
    status: ContactStatus,
    tags: Vec<String>,
    buying: Vec<u32>,
    selling: Vec<u32>,
}

impl ContactBuilder {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn budget(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.budget_min = min;
        self.budget_max = max;
        self
    }

    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = status;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn buying(mut self, property_ids: impl IntoIterator<Item = u32>) -> Self {
        self.buying.extend(property_ids);
        self
    }

    pub fn selling(mut self, property_ids: impl IntoIterator<Item = u32>) -> Self {
        self.selling.extend(property_ids);
        self
    }

    pub fn build(self) -> Result<Contact, ValidationError> {
        let budget = Budget::new(
            self.budget_min.map(Price::new).transpose()?,
            self.budget_max.map(Price::new).transpose()?,
        )?;
        Ok(Contact {
            id: Uuid::contact(self.id),
            name: Name::parse(&self.name)?,
            phone: Phone::parse(&self.phone)?,
            email: Email::parse(&self.email)?,
            address: self.address.as_deref().map(Address::parse).transpose()?,
            budget,
            status: self.status,
            tags: self
                .tags
                .iter()
                .map(|t| Tag::parse(t))
                .collect::<Result<_, _>>()?,
            buying: self.buying.into_iter().map(Uuid::property).collect(),
            selling: self.selling.into_iter().map(Uuid::property).collect(),
        })
    }
}
