//! Filter types for querying contacts and properties.

use serde::Serialize;

use crate::contact::Contact;
use crate::enums::{ContactStatus, PropertyStatus};
use crate::fields::{Price, RoomCount, Tag};
use crate::property::Property;

/// Filter for contact queries. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// OR semantics: some keyword equals some word of the name (ignoring case).
    pub name_keywords: Vec<String>,
    /// Substring of the phone number.
    pub phone: Option<String>,
    /// Substring of the email address (ignoring case).
    pub email: Option<String>,
    /// AND semantics: contact must have ALL these tags.
    pub tags: Vec<Tag>,
    pub status: Option<ContactStatus>,
    /// Contact's budget must contain this price.
    pub affordable: Option<Price>,
}

impl ContactFilter {
    /// Returns `true` if no criterion is set (matches everything).
    pub fn matches(&self, contact: &Contact) -> bool {
        if !self.name_keywords.is_empty()
            && !any_keyword_matches(&self.name_keywords, contact.name.words())
        {
            return false;
        }
        if let Some(ref phone) = self.phone {
            if !contact.phone.as_str().contains(phone.as_str()) {
                return false;
            }
        }
        if let Some(ref email) = self.email {
            if !contact
                .email
                .as_str()
                .to_lowercase()
                .contains(&email.to_lowercase())
            {
                return false;
            }
        }
        if !contact.has_tags(&self.tags) {
            return false;
        }
        if self.status.is_some_and(|s| s != contact.status) {
            return false;
        }
        if self.affordable.is_some_and(|p| !contact.budget.contains(p)) {
            return false;
        }
        true
    }
}

/// Filter for property queries. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    /// OR semantics: some keyword equals some word of the address (ignoring case).
    pub address_keywords: Vec<String>,
    /// Postal code must start with this prefix.
    pub postal_prefix: Option<String>,
    /// AND semantics: listing must have ALL these tags.
    pub tags: Vec<Tag>,
    pub status: Option<PropertyStatus>,
    pub min_bedrooms: Option<RoomCount>,
    pub min_bathrooms: Option<RoomCount>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl PropertyFilter {
    /// Returns `true` if no criterion is set (matches everything).
    pub fn matches(&self, property: &Property) -> bool {
        if !self.address_keywords.is_empty()
            && !any_keyword_matches(&self.address_keywords, property.address.words())
        {
            return false;
        }
        if let Some(ref prefix) = self.postal_prefix {
            if !property.postal_code.as_str().starts_with(prefix.as_str()) {
                return false;
            }
        }
        if !property.has_tags(&self.tags) {
            return false;
        }
        if self.status.is_some_and(|s| s != property.status) {
            return false;
        }
        if self.min_bedrooms.is_some_and(|n| property.bedrooms < n) {
            return false;
        }
        if self.min_bathrooms.is_some_and(|n| property.bathrooms < n) {
            return false;
        }
        if self.min_price.is_some_and(|p| property.price < p) {
            return false;
        }
        if self.max_price.is_some_and(|p| property.price > p) {
            return false;
        }
        true
    }
}

/// Whole-word, case-insensitive keyword match.
fn any_keyword_matches<'a>(keywords: &[String], words: impl Iterator<Item = &'a str>) -> bool {
    let words: Vec<String> = words.map(|w| w.trim_matches(',').to_lowercase()).collect();
    keywords
        .iter()
        .any(|k| words.iter().any(|w| *w == k.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Limit/offset window over a filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Maximum items to return (`None` = unlimited).
    pub limit: Option<usize>,
    /// Matches to skip before the first returned item.
    pub offset: usize,
}

impl Page {
    /// A page holding every match.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }
}

/// One page of matches plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Number of matches before paging.
    pub total: usize,
    pub offset: usize,
}

impl<T> Paged<T> {
    /// Maps the page items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
        }
    }
}

/// Applies `page` to the matching items of `items`, preserving order.
///
/// An offset past the end yields an empty page.
pub fn paginate<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    mut predicate: impl FnMut(&T) -> bool,
    page: Page,
) -> Paged<&'a T>
where
    T: 'a,
{
    let matching: Vec<&T> = items.into_iter().filter(|item| predicate(item)).collect();
    let total = matching.len();
    let window = matching.into_iter().skip(page.offset);
    let items = match page.limit {
        Some(limit) => window.take(limit).collect(),
        None => window.collect(),
    };
    Paged {
        items,
        total,
        offset: page.offset,
    }
}
