//! Core domain types for estatebook.
//!
//! Contacts, properties, their validated fields, the filters used to query
//! them and the [`book::AddressBook`] model that keeps buyer/seller links
//! consistent.

pub mod book;
pub mod contact;
pub mod enums;
pub mod fields;
pub mod filter;
pub mod ids;
pub mod property;
pub mod sample;
pub mod validation;
