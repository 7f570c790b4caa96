//! Validated value objects for contact and property attributes.
//!
//! Values are immutable and can only be built through `parse` (user input)
//! or `new` (already-typed numbers), both of which enforce the field's
//! constraint.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Macro: a trimmed string wrapper checked against a regex.
// ---------------------------------------------------------------------------
macro_rules! text_field {
    (
        $(#[$meta:meta])*
        $name:ident, pattern = $pattern:expr, error = $error:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Trims `input` and validates it.
            pub fn parse(input: &str) -> Result<Self, ValidationError> {
                static PATTERN: LazyLock<Regex> =
                    LazyLock::new(|| Regex::new($pattern).expect("field pattern is valid"));
                let trimmed = input.trim();
                if PATTERN.is_match(trimmed) {
                    Ok(Self(trimmed.to_owned()))
                } else {
                    let error: fn(&str) -> ValidationError = $error;
                    Err(error(trimmed))
                }
            }

            /// Returns the validated text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

text_field!(
    /// A contact's full name.
    Name, pattern = r"^[\p{L}\p{N}][\p{L}\p{N} ]*$", error = |_| ValidationError::Name
);

text_field!(
    /// A phone number made of digits only.
    Phone, pattern = r"^[0-9]{3,}$", error = |_| ValidationError::Phone
);

text_field!(
    /// An email address.
    Email,
    pattern = r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    error = |_| ValidationError::Email
);

text_field!(
    /// A free-form street address.
    Address, pattern = r"^\S.*$", error = |_| ValidationError::Address
);

text_field!(
    /// A single-word tag.
    Tag, pattern = r"^[\p{L}\p{N}]+$", error = |value| ValidationError::Tag(value.to_owned())
);

text_field!(
    /// A 6-digit postal code.
    PostalCode, pattern = r"^[0-9]{6}$", error = |_| ValidationError::PostalCode
);

impl Name {
    /// Returns the whitespace-separated words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl Address {
    /// Returns the whitespace-separated words of the address.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?([0-9]+|[0-9]{1,3}(,[0-9]{3})+)$").expect("price pattern is valid")
});

/// A positive whole amount of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Builds a price from a raw amount. Zero is rejected.
    pub fn new(amount: u64) -> Result<Self, ValidationError> {
        if amount == 0 {
            return Err(ValidationError::Price);
        }
        Ok(Self(amount))
    }

    /// Parses `850000`, `850,000` or `$850,000`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if !PRICE_PATTERN.is_match(trimmed) {
            return Err(ValidationError::Price);
        }
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        let amount = digits.parse::<u64>().map_err(|_| ValidationError::Price)?;
        Self::new(amount)
    }

    /// Returns the raw amount.
    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", group_thousands(self.0))
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats `1234567` as `1,234,567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Floor area and room counts
// ---------------------------------------------------------------------------

/// Maximum accepted floor area in square metres.
pub const MAX_FLOOR_AREA: u32 = 100_000;

/// Maximum accepted number of bedrooms or bathrooms.
pub const MAX_ROOMS: u8 = 20;

/// Floor area in whole square metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FloorArea(u32);

/// Parses a plain run of ASCII digits. Signs are rejected.
fn parse_digits<T: std::str::FromStr>(input: &str) -> Option<T> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

impl FloorArea {
    pub fn new(square_metres: u32) -> Result<Self, ValidationError> {
        if square_metres == 0 || square_metres > MAX_FLOOR_AREA {
            return Err(ValidationError::FloorArea);
        }
        Ok(Self(square_metres))
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = parse_digits::<u32>(input).ok_or(ValidationError::FloorArea)?;
        Self::new(value)
    }

    pub fn square_metres(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FloorArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sqm", self.0)
    }
}

/// Number of bedrooms or bathrooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomCount(u8);

impl RoomCount {
    pub fn new(count: u8) -> Result<Self, ValidationError> {
        if count > MAX_ROOMS {
            return Err(ValidationError::RoomCount);
        }
        Ok(Self(count))
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = parse_digits::<u8>(input).ok_or(ValidationError::RoomCount)?;
        Self::new(value)
    }

    pub fn count(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// The price range a contact is willing to pay. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Budget {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Price>,
}

impl Budget {
    /// Builds a budget, rejecting `min > max`.
    pub fn new(min: Option<Price>, max: Option<Price>) -> Result<Self, ValidationError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(ValidationError::BudgetRange {
                    min: lo.amount(),
                    max: hi.amount(),
                });
            }
        }
        Ok(Self { min, max })
    }

    /// A budget with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<Price> {
        self.min
    }

    pub fn max(&self) -> Option<Price> {
        self.max
    }

    /// Returns `true` when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns `true` if `price` lies within the (inclusive) range.
    pub fn contains(&self, price: Price) -> bool {
        self.min.is_none_or(|lo| price >= lo) && self.max.is_none_or(|hi| price <= hi)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => write!(f, "{lo} - {hi}"),
            (Some(lo), None) => write!(f, "from {lo}"),
            (None, Some(hi)) => write!(f, "up to {hi}"),
            (None, None) => f.write_str("any"),
        }
    }
}
