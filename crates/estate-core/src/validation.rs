//! Field validation errors.
//!
//! Every value object rejects bad input with one of these variants. The
//! display text is shown to the user verbatim, so each message states the
//! constraint the input must satisfy.

/// Error type for value-object validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Names should only contain letters, digits and spaces, and should not be blank")]
    Name,

    #[error("Phone numbers should only contain digits, and should be at least 3 digits long")]
    Phone,

    #[error(
        "Emails should be of the format local-part@domain: the local part holds letters and \
         digits separated by single +_.- characters, and the domain is made of labels separated \
         by periods, the last label being at least 2 characters long"
    )]
    Email,

    #[error("Addresses can take any values, and should not be blank")]
    Address,

    #[error("Tags should be alphanumeric without spaces (got '{0}')")]
    Tag(String),

    #[error("Postal codes should be exactly 6 digits")]
    PostalCode,

    #[error("Prices should be positive whole amounts, optionally written as $1,200,000")]
    Price,

    #[error("Floor areas should be whole square metres between 1 and 100000")]
    FloorArea,

    #[error("Room counts should be whole numbers between 0 and 20")]
    RoomCount,

    #[error("Budget minimum ({min}) cannot exceed budget maximum ({max})")]
    BudgetRange { min: u64, max: u64 },

    #[error("Unknown {field} '{value}' (expected one of: {accepted})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        accepted: String,
    },
}
