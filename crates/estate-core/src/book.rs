//! [`AddressBook`] -- the in-memory model holding contacts and properties.
//!
//! Both lists are kept in insertion order. Every operation that touches a
//! buyer/seller link updates the contact and the property together, so the
//! two sides never disagree.

use std::collections::HashSet;

use crate::contact::{Contact, ContactUpdates, NewContact};
use crate::enums::{ContactStatus, EntityKind, LinkRole, PropertyStatus};
use crate::filter::{ContactFilter, Page, Paged, PropertyFilter, paginate};
use crate::fields::Budget;
use crate::ids::Uuid;
use crate::property::{NewProperty, Property, PropertyUpdates};
use crate::validation::ValidationError;

/// Errors raised by address book operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("no contact with id {0}")]
    ContactNotFound(Uuid),

    #[error("no property with id {0}")]
    PropertyNotFound(Uuid),

    #[error("this contact already exists in the address book (see contact {existing})")]
    DuplicateContact { existing: Uuid },

    #[error("this property already exists in the address book (see property {existing})")]
    DuplicateProperty { existing: Uuid },

    #[error("at least one field to edit must be provided")]
    NothingToUpdate,

    #[error("contact {contact} is already a {role} of property {property}")]
    AlreadyLinked {
        contact: Uuid,
        property: Uuid,
        role: LinkRole,
    },

    #[error("contact {contact} is not a {role} of property {property}")]
    NotLinked {
        contact: Uuid,
        property: Uuid,
        role: LinkRole,
    },

    #[error("contact {contact} is already a {existing} of property {property} and cannot also be its {}", .existing.opposite())]
    RoleConflict {
        contact: Uuid,
        property: Uuid,
        existing: LinkRole,
    },

    #[error("{kind} {id} is already {status}")]
    StatusUnchanged {
        kind: EntityKind,
        id: Uuid,
        status: String,
    },

    #[error("no {0} ids left: the highest id is already in use")]
    IdsExhausted(EntityKind),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("corrupt data: {0}")]
    CorruptData(String),
}

/// Convenience alias for address book operations.
pub type Result<T> = std::result::Result<T, BookError>;

/// Contacts, properties and the links between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: Vec<Contact>,
    properties: Vec<Property>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a book from persisted entities, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::CorruptData`] when ids are zero or repeated, two
    /// entities are duplicates, or a link is dangling or one-sided.
    pub fn from_parts(contacts: Vec<Contact>, properties: Vec<Property>) -> Result<Self> {
        check_unique_ids(contacts.iter().map(Contact::id))?;
        check_unique_ids(properties.iter().map(Property::id))?;

        for (i, contact) in contacts.iter().enumerate() {
            if let Some(other) = contacts[..i]
                .iter()
                .find(|o| o.is_same(&contact.name, &contact.phone))
            {
                return Err(BookError::CorruptData(format!(
                    "contacts {} and {} are duplicates",
                    other.id, contact.id
                )));
            }
        }
        for (i, property) in properties.iter().enumerate() {
            if let Some(other) = properties[..i]
                .iter()
                .find(|o| o.is_same(&property.address, &property.postal_code))
            {
                return Err(BookError::CorruptData(format!(
                    "properties {} and {} are duplicates",
                    other.id, property.id
                )));
            }
        }

        let book = Self {
            contacts,
            properties,
        };
        book.check_links()?;
        Ok(book)
    }

    /// Verifies that every link resolves and is recorded on both sides.
    fn check_links(&self) -> Result<()> {
        for contact in &self.contacts {
            if let Some(p) = contact.buying.intersection(&contact.selling).next() {
                return Err(BookError::CorruptData(format!(
                    "contact {} is both buyer and seller of property {}",
                    contact.id, p
                )));
            }
            for (role, ids) in [
                (LinkRole::Buyer, &contact.buying),
                (LinkRole::Seller, &contact.selling),
            ] {
                for pid in ids {
                    let property = self.property(*pid).ok_or_else(|| {
                        BookError::CorruptData(format!(
                            "contact {} links to missing property {}",
                            contact.id, pid
                        ))
                    })?;
                    if !property.side(role).contains(&contact.id) {
                        return Err(BookError::CorruptData(format!(
                            "link between contact {} and property {} is one-sided",
                            contact.id, pid
                        )));
                    }
                }
            }
        }
        for property in &self.properties {
            for (role, ids) in [
                (LinkRole::Buyer, &property.buyers),
                (LinkRole::Seller, &property.sellers),
            ] {
                for cid in ids {
                    let contact = self.contact(*cid).ok_or_else(|| {
                        BookError::CorruptData(format!(
                            "property {} links to missing contact {}",
                            property.id, cid
                        ))
                    })?;
                    if !contact.side(role).contains(&property.id) {
                        return Err(BookError::CorruptData(format!(
                            "link between contact {} and property {} is one-sided",
                            cid, property.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    // -- Accessors -----------------------------------------------------------

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.properties.is_empty()
    }

    pub fn contact(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Looks up a contact, failing with [`BookError::ContactNotFound`].
    pub fn get_contact(&self, id: Uuid) -> Result<&Contact> {
        self.contact(id).ok_or(BookError::ContactNotFound(id))
    }

    /// Looks up a property, failing with [`BookError::PropertyNotFound`].
    pub fn get_property(&self, id: Uuid) -> Result<&Property> {
        self.property(id).ok_or(BookError::PropertyNotFound(id))
    }

    /// Resolves property ids (as held in a contact's link sets).
    pub fn resolve_properties<'a>(&'a self, ids: impl IntoIterator<Item = &'a Uuid>) -> Vec<&'a Property> {
        ids.into_iter().filter_map(|id| self.property(*id)).collect()
    }

    /// Resolves contact ids (as held in a property's link sets).
    pub fn resolve_contacts<'a>(&'a self, ids: impl IntoIterator<Item = &'a Uuid>) -> Vec<&'a Contact> {
        ids.into_iter().filter_map(|id| self.contact(*id)).collect()
    }

    fn contact_index(&self, id: Uuid) -> Result<usize> {
        self.contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(BookError::ContactNotFound(id))
    }

    fn property_index(&self, id: Uuid) -> Result<usize> {
        self.properties
            .iter()
            .position(|p| p.id == id)
            .ok_or(BookError::PropertyNotFound(id))
    }

    // -- Contact CRUD --------------------------------------------------------

    /// Adds a contact and returns it with its newly assigned id.
    pub fn add_contact(&mut self, new: NewContact) -> Result<&Contact> {
        if let Some(existing) = self.contacts.iter().find(|c| c.is_same(&new.name, &new.phone)) {
            return Err(BookError::DuplicateContact {
                existing: existing.id,
            });
        }
        let id = Uuid::contact(next_id(
            EntityKind::Contact,
            self.contacts.iter().map(Contact::id),
        )?);
        self.contacts.push(Contact {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            address: new.address,
            budget: new.budget,
            status: ContactStatus::default(),
            tags: new.tags,
            buying: Default::default(),
            selling: Default::default(),
        });
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    /// Applies a partial update to a contact.
    pub fn update_contact(&mut self, id: Uuid, updates: ContactUpdates) -> Result<&Contact> {
        if updates.is_empty() {
            return Err(BookError::NothingToUpdate);
        }
        let index = self.contact_index(id)?;
        let mut edited = self.contacts[index].clone();
        if let Some(name) = updates.name {
            edited.name = name;
        }
        if let Some(phone) = updates.phone {
            edited.phone = phone;
        }
        if let Some(email) = updates.email {
            edited.email = email;
        }
        if let Some(address) = updates.address {
            edited.address = address;
        }
        if updates.budget_min.is_some() || updates.budget_max.is_some() {
            let min = updates.budget_min.unwrap_or(edited.budget.min());
            let max = updates.budget_max.unwrap_or(edited.budget.max());
            edited.budget = Budget::new(min, max)?;
        }
        if let Some(tags) = updates.tags {
            edited.tags = tags;
        }

        if let Some(other) = self
            .contacts
            .iter()
            .find(|c| c.id != id && c.is_same(&edited.name, &edited.phone))
        {
            return Err(BookError::DuplicateContact { existing: other.id });
        }
        self.contacts[index] = edited;
        Ok(&self.contacts[index])
    }

    /// Removes a contact and every link that points at it.
    pub fn delete_contact(&mut self, id: Uuid) -> Result<Contact> {
        let index = self.contact_index(id)?;
        let removed = self.contacts.remove(index);
        for property in &mut self.properties {
            property.buyers.remove(&id);
            property.sellers.remove(&id);
        }
        Ok(removed)
    }

    /// Sets a contact's status.
    pub fn mark_contact(&mut self, id: Uuid, status: ContactStatus) -> Result<&Contact> {
        let index = self.contact_index(id)?;
        let contact = &mut self.contacts[index];
        if contact.status == status {
            return Err(BookError::StatusUnchanged {
                kind: EntityKind::Contact,
                id,
                status: status.to_string(),
            });
        }
        contact.status = status;
        Ok(&self.contacts[index])
    }

    // -- Property CRUD -------------------------------------------------------

    /// Adds a property and returns it with its newly assigned id.
    pub fn add_property(&mut self, new: NewProperty) -> Result<&Property> {
        if let Some(existing) = self
            .properties
            .iter()
            .find(|p| p.is_same(&new.address, &new.postal_code))
        {
            return Err(BookError::DuplicateProperty {
                existing: existing.id,
            });
        }
        let id = Uuid::property(next_id(
            EntityKind::Property,
            self.properties.iter().map(Property::id),
        )?);
        self.properties.push(Property {
            id,
            address: new.address,
            postal_code: new.postal_code,
            floor_area: new.floor_area,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            price: new.price,
            status: new.status,
            tags: new.tags,
            buyers: Default::default(),
            sellers: Default::default(),
        });
        Ok(&self.properties[self.properties.len() - 1])
    }

    /// Applies a partial update to a property.
    pub fn update_property(&mut self, id: Uuid, updates: PropertyUpdates) -> Result<&Property> {
        if updates.is_empty() {
            return Err(BookError::NothingToUpdate);
        }
        let index = self.property_index(id)?;
        let mut edited = self.properties[index].clone();
        if let Some(address) = updates.address {
            edited.address = address;
        }
        if let Some(postal_code) = updates.postal_code {
            edited.postal_code = postal_code;
        }
        if let Some(floor_area) = updates.floor_area {
            edited.floor_area = floor_area;
        }
        if let Some(bedrooms) = updates.bedrooms {
            edited.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = updates.bathrooms {
            edited.bathrooms = bathrooms;
        }
        if let Some(price) = updates.price {
            edited.price = price;
        }
        if let Some(tags) = updates.tags {
            edited.tags = tags;
        }

        if let Some(other) = self
            .properties
            .iter()
            .find(|p| p.id != id && p.is_same(&edited.address, &edited.postal_code))
        {
            return Err(BookError::DuplicateProperty { existing: other.id });
        }
        self.properties[index] = edited;
        Ok(&self.properties[index])
    }

    /// Removes a property and every link that points at it.
    pub fn delete_property(&mut self, id: Uuid) -> Result<Property> {
        let index = self.property_index(id)?;
        let removed = self.properties.remove(index);
        for contact in &mut self.contacts {
            contact.buying.remove(&id);
            contact.selling.remove(&id);
        }
        Ok(removed)
    }

    /// Sets a property's status.
    pub fn mark_property(&mut self, id: Uuid, status: PropertyStatus) -> Result<&Property> {
        let index = self.property_index(id)?;
        let property = &mut self.properties[index];
        if property.status == status {
            return Err(BookError::StatusUnchanged {
                kind: EntityKind::Property,
                id,
                status: status.to_string(),
            });
        }
        property.status = status;
        Ok(&self.properties[index])
    }

    // -- Links ---------------------------------------------------------------

    /// Links a contact to a property as buyer or seller, on both sides.
    pub fn link(&mut self, contact: Uuid, property: Uuid, role: LinkRole) -> Result<()> {
        let ci = self.contact_index(contact)?;
        let pi = self.property_index(property)?;

        let c = &self.contacts[ci];
        if c.side(role).contains(&property) {
            return Err(BookError::AlreadyLinked {
                contact,
                property,
                role,
            });
        }
        if c.side(role.opposite()).contains(&property) {
            return Err(BookError::RoleConflict {
                contact,
                property,
                existing: role.opposite(),
            });
        }

        self.contacts[ci].side_mut(role).insert(property);
        self.properties[pi].side_mut(role).insert(contact);
        Ok(())
    }

    /// Removes a buyer or seller link from both sides.
    pub fn unlink(&mut self, contact: Uuid, property: Uuid, role: LinkRole) -> Result<()> {
        let ci = self.contact_index(contact)?;
        let pi = self.property_index(property)?;

        if !self.contacts[ci].side_mut(role).remove(&property) {
            return Err(BookError::NotLinked {
                contact,
                property,
                role,
            });
        }
        self.properties[pi].side_mut(role).remove(&contact);
        Ok(())
    }

    // -- Queries -------------------------------------------------------------

    /// Returns the page of contacts matching `filter`.
    pub fn filter_contacts(&self, filter: &ContactFilter, page: Page) -> Paged<&Contact> {
        paginate(&self.contacts, |c| filter.matches(c), page)
    }

    /// Returns the page of properties matching `filter`.
    pub fn filter_properties(&self, filter: &PropertyFilter, page: Page) -> Paged<&Property> {
        paginate(&self.properties, |p| filter.matches(p), page)
    }

    /// Removes every contact and property.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.properties.clear();
    }
}

// ---------------------------------------------------------------------------
// Link-set helpers
// ---------------------------------------------------------------------------

impl Contact {
    /// The property ids held for `role` (`Buyer` = buying).
    pub(crate) fn side(&self, role: LinkRole) -> &std::collections::BTreeSet<Uuid> {
        match role {
            LinkRole::Buyer => &self.buying,
            LinkRole::Seller => &self.selling,
        }
    }

    fn side_mut(&mut self, role: LinkRole) -> &mut std::collections::BTreeSet<Uuid> {
        match role {
            LinkRole::Buyer => &mut self.buying,
            LinkRole::Seller => &mut self.selling,
        }
    }
}

impl Property {
    /// The contact ids held for `role`.
    pub(crate) fn side(&self, role: LinkRole) -> &std::collections::BTreeSet<Uuid> {
        match role {
            LinkRole::Buyer => &self.buyers,
            LinkRole::Seller => &self.sellers,
        }
    }

    fn side_mut(&mut self, role: LinkRole) -> &mut std::collections::BTreeSet<Uuid> {
        match role {
            LinkRole::Buyer => &mut self.buyers,
            LinkRole::Seller => &mut self.sellers,
        }
    }
}

/// Next free id: one past the current maximum, starting at 1.
fn next_id(kind: EntityKind, ids: impl Iterator<Item = Uuid>) -> Result<u32> {
    ids.map(|id| id.id())
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(BookError::IdsExhausted(kind))
}

fn check_unique_ids(ids: impl Iterator<Item = Uuid>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.id() == 0 {
            return Err(BookError::CorruptData(format!("{} id must be positive", id.kind())));
        }
        if !seen.insert(id) {
            return Err(BookError::CorruptData(format!(
                "{} id {} appears more than once",
                id.kind(),
                id
            )));
        }
    }
    Ok(())
}
