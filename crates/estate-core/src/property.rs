//! Property -- a real-estate listing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::enums::PropertyStatus;
use crate::fields::{Address, FloorArea, PostalCode, Price, RoomCount, Tag};
use crate::ids::Uuid;
use crate::validation::ValidationError;

/// A listing tracked by the address book.
///
/// `buyers` and `sellers` hold contact ids and mirror the contacts'
/// `buying`/`selling` sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub(crate) id: Uuid,
    pub address: Address,
    pub postal_code: PostalCode,
    pub floor_area: FloorArea,
    pub bedrooms: RoomCount,
    pub bathrooms: RoomCount,
    pub price: Price,
    pub status: PropertyStatus,
    pub tags: BTreeSet<Tag>,
    pub(crate) buyers: BTreeSet<Uuid>,
    pub(crate) sellers: BTreeSet<Uuid>,
}

impl Property {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Contact ids linked as buyers.
    pub fn buyers(&self) -> &BTreeSet<Uuid> {
        &self.buyers
    }

    /// Contact ids linked as sellers.
    pub fn sellers(&self) -> &BTreeSet<Uuid> {
        &self.sellers
    }

    /// Two listings are the same when address (ignoring case) and postal
    /// code both match.
    pub fn is_same(&self, address: &Address, postal_code: &PostalCode) -> bool {
        self.postal_code == *postal_code
            && self.address.as_str().to_lowercase() == address.as_str().to_lowercase()
    }

    /// Returns `true` if the listing carries every tag in `tags`.
    pub fn has_tags(&self, tags: &[Tag]) -> bool {
        tags.iter().all(|t| self.tags.contains(t))
    }
}

/// The fields of a property about to be added; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub address: Address,
    pub postal_code: PostalCode,
    pub floor_area: FloorArea,
    pub bedrooms: RoomCount,
    pub bathrooms: RoomCount,
    pub price: Price,
    pub status: PropertyStatus,
    pub tags: BTreeSet<Tag>,
}

/// Typed partial update for a property. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyUpdates {
    pub address: Option<Address>,
    pub postal_code: Option<PostalCode>,
    pub floor_area: Option<FloorArea>,
    pub bedrooms: Option<RoomCount>,
    pub bathrooms: Option<RoomCount>,
    pub price: Option<Price>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl PropertyUpdates {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.postal_code.is_none()
            && self.floor_area.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.price.is_none()
            && self.tags.is_none()
    }
}

/// Builds a [`Property`] from raw field values, validating each one.
#[derive(Debug, Clone, Default)]
pub struct PropertyBuilder {
    id: u32,
    address: String,
    postal_code: String,
    floor_area: u32,
    bedrooms: u8,
    bathrooms: u8,
    price: u64,
    status: PropertyStatus,
    tags: Vec<String>,
    buyers: Vec<u32>,
    sellers: Vec<u32>,
}

impl PropertyBuilder {
    pub fn new(address: impl Into<String>, postal_code: impl Into<String>, price: u64) -> Self {
        Self {
            address: address.into(),
            postal_code: postal_code.into(),
            price,
            ..Default::default()
        }
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn floor_area(mut self, square_metres: u32) -> Self {
        self.floor_area = square_metres;
        self
    }

    pub fn rooms(mut self, bedrooms: u8, bathrooms: u8) -> Self {
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    pub fn status(mut self, status: PropertyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn buyers(mut self, contact_ids: impl IntoIterator<Item = u32>) -> Self {
        self.buyers.extend(contact_ids);
        self
    }

    pub fn sellers(mut self, contact_ids: impl IntoIterator<Item = u32>) -> Self {
        self.sellers.extend(contact_ids);
        self
    }

    pub fn build(self) -> Result<Property, ValidationError> {
        Ok(Property {
            id: Uuid::property(self.id),
            address: Address::parse(&self.address)?,
            postal_code: PostalCode::parse(&self.postal_code)?,
            floor_area: FloorArea::new(self.floor_area)?,
            bedrooms: RoomCount::new(self.bedrooms)?,
            bathrooms: RoomCount::new(self.bathrooms)?,
            price: Price::new(self.price)?,
            status: self.status,
            tags: self
                .tags
                .iter()
                .map(|t| Tag::parse(t))
                .collect::<Result<_, _>>()?,
            buyers: self.buyers.into_iter().map(Uuid::contact).collect(),
            sellers: self.sellers.into_iter().map(Uuid::contact).collect(),
        })
    }
}
