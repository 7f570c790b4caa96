//! Enum types for the estatebook domain.
//!
//! Each enum is a closed set of lowercase string variants with:
//! - Serialize as the lowercase string
//! - `as_str()`, `Display` and case-insensitive `FromStr`
//! - `ALL` listing every variant (used in error messages and help output)

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Macro: defines a closed enum with string variants.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:expr, default = $default:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( Self::$variant, )+ ];

            /// Returns the string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }

            /// Comma-separated list of accepted values, for messages.
            pub fn accepted() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_ascii_lowercase();
                match lowered.as_str() {
                    $( $str => Ok(Self::$variant), )+
                    _ => Err(ValidationError::UnknownVariant {
                        field: $field,
                        value: s.trim().to_owned(),
                        accepted: Self::accepted(),
                    }),
                }
            }
        }
    };
}

define_enum!(
    /// Lifecycle state of a contact.
    ContactStatus, field = "contact status", default = Active,
    variants: [
        (Active, "active"),
        (Inactive, "inactive"),
    ]
);

define_enum!(
    /// Market state of a property listing.
    PropertyStatus, field = "property status", default = Available,
    variants: [
        (Available, "available"),
        (Pending, "pending"),
        (Sold, "sold"),
    ]
);

define_enum!(
    /// The side of a deal a contact takes on a property.
    LinkRole, field = "role", default = Buyer,
    variants: [
        (Buyer, "buyer"),
        (Seller, "seller"),
    ]
);

define_enum!(
    /// Which entity list an identifier belongs to.
    EntityKind, field = "entity kind", default = Contact,
    variants: [
        (Contact, "contact"),
        (Property, "property"),
    ]
);

impl LinkRole {
    /// The role on the other side of the same deal.
    pub fn opposite(self) -> Self {
        match self {
            Self::Buyer => Self::Seller,
            Self::Seller => Self::Buyer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("SOLD".parse::<PropertyStatus>().unwrap(), PropertyStatus::Sold);
        assert_eq!(" Buyer ".parse::<LinkRole>().unwrap(), LinkRole::Buyer);
    }

    #[test]
    fn unknown_variant_lists_accepted_values() {
        let err = "rented".parse::<PropertyStatus>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("rented"), "{msg}");
        assert!(msg.contains("available, pending, sold"), "{msg}");
    }

    #[test]
    fn defaults() {
        assert_eq!(ContactStatus::default(), ContactStatus::Active);
        assert_eq!(PropertyStatus::default(), PropertyStatus::Available);
    }

    #[test]
    fn serialize_as_lowercase_string() {
        let json = serde_json::to_string(&PropertyStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn opposite_role() {
        assert_eq!(LinkRole::Buyer.opposite(), LinkRole::Seller);
        assert_eq!(LinkRole::Seller.opposite(), LinkRole::Buyer);
    }
}
