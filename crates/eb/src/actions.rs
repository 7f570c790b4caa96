//! Applies parsed book commands to an [`AddressBook`].
//!
//! Each command produces a [`CommandResult`]: a feedback line plus a [`View`]
//! describing what to display. Rendering lives in [`crate::output`].

use anyhow::{Result, bail};
use estate_core::book::AddressBook;
use estate_core::contact::Contact;
use estate_core::filter::{Page, Paged};
use estate_core::property::Property;
use estate_parser::{Command, CommandWord};
use serde::Serialize;
use tracing::debug;

/// Knobs that change how commands run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecSettings {
    /// Page size applied to filters given without `limit/`.
    pub default_limit: Option<usize>,
    /// Reject every command that would change the book.
    pub readonly: bool,
}

/// A contact with its linked properties resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub buying_properties: Vec<Property>,
    pub selling_properties: Vec<Property>,
}

/// A property with its linked contacts resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub buyer_contacts: Vec<Contact>,
    pub seller_contacts: Vec<Contact>,
}

/// What a command asks the UI to show besides its feedback line.
#[derive(Debug, Clone)]
pub enum View {
    None,
    Contacts(Paged<Contact>),
    Properties(Paged<Property>),
    Contact(Box<ContactDetail>),
    Property(Box<PropertyDetail>),
    Help(String),
}

/// Outcome of one command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub feedback: String,
    pub view: View,
    /// The book changed and must be saved.
    pub mutated: bool,
    /// The shell should stop after this command.
    pub exit: bool,
}

impl CommandResult {
    fn new(feedback: impl Into<String>, view: View) -> Self {
        Self {
            feedback: feedback.into(),
            view,
            mutated: false,
            exit: false,
        }
    }

    fn mutated(mut self) -> Self {
        self.mutated = true;
        self
    }
}

pub fn contact_detail(book: &AddressBook, contact: Contact) -> ContactDetail {
    let buying_properties = book
        .resolve_properties(contact.buying())
        .into_iter()
        .cloned()
        .collect();
    let selling_properties = book
        .resolve_properties(contact.selling())
        .into_iter()
        .cloned()
        .collect();
    ContactDetail {
        contact,
        buying_properties,
        selling_properties,
    }
}

pub fn property_detail(book: &AddressBook, property: Property) -> PropertyDetail {
    let buyer_contacts = book
        .resolve_contacts(property.buyers())
        .into_iter()
        .cloned()
        .collect();
    let seller_contacts = book
        .resolve_contacts(property.sellers())
        .into_iter()
        .cloned()
        .collect();
    PropertyDetail {
        property,
        buyer_contacts,
        seller_contacts,
    }
}

fn with_default_limit(page: Page, settings: &ExecSettings) -> Page {
    Page {
        limit: page.limit.or(settings.default_limit),
        ..page
    }
}

fn paged_feedback(noun: &str, shown: usize, total: usize, offset: usize) -> String {
    if shown == total {
        format!("{total} {noun} listed")
    } else if shown == 0 {
        format!("0 of {total} {noun} listed (offset {offset} is past the last match)")
    } else {
        format!(
            "{shown} of {total} {noun} listed (showing {}-{})",
            offset + 1,
            offset + shown
        )
    }
}

/// Text for `help` and `help WORD`.
pub fn help_text(topic: Option<CommandWord>) -> String {
    match topic {
        Some(word) => word.usage().to_string(),
        None => {
            let width = CommandWord::ALL
                .iter()
                .map(|w| w.as_str().len())
                .max()
                .unwrap_or(0);
            let mut lines = vec!["Available commands:".to_string()];
            lines.extend(
                CommandWord::ALL
                    .iter()
                    .map(|w| format!("  {:<width$}  {}", w.as_str(), w.summary())),
            );
            lines.push(String::new());
            lines.push("Type 'help COMMAND' for the parameters of one command.".to_string());
            lines.join("\n")
        }
    }
}

/// Runs `command` against `book`.
///
/// # Errors
///
/// Fails when the book rejects the change (unknown id, duplicate entity,
/// link conflicts) or when a mutating command is given in read-only mode.
pub fn execute(
    book: &mut AddressBook,
    command: Command,
    settings: &ExecSettings,
) -> Result<CommandResult> {
    if settings.readonly && command.is_mutating() {
        bail!("cannot run '{}' in read-only mode", command.word());
    }
    debug!(word = %command.word(), "executing command");

    let result = match command {
        Command::AddContact(new) => {
            let contact = book.add_contact(new)?.clone();
            let feedback = format!("New contact added: {} {}", contact.id(), contact.name);
            CommandResult::new(
                feedback,
                View::Contact(Box::new(contact_detail(book, contact))),
            )
            .mutated()
        }
        Command::AddProperty(new) => {
            let property = book.add_property(new)?.clone();
            let feedback = format!("New property added: {} {}", property.id(), property.address);
            CommandResult::new(
                feedback,
                View::Property(Box::new(property_detail(book, property))),
            )
            .mutated()
        }
        Command::EditContact { id, updates } => {
            let contact = book.update_contact(id, updates)?.clone();
            let feedback = format!("Edited contact: {} {}", contact.id(), contact.name);
            CommandResult::new(
                feedback,
                View::Contact(Box::new(contact_detail(book, contact))),
            )
            .mutated()
        }
        Command::EditProperty { id, updates } => {
            let property = book.update_property(id, updates)?.clone();
            let feedback = format!("Edited property: {} {}", property.id(), property.address);
            CommandResult::new(
                feedback,
                View::Property(Box::new(property_detail(book, property))),
            )
            .mutated()
        }
        Command::DeleteContact(id) => {
            let contact = book.delete_contact(id)?;
            CommandResult::new(
                format!("Deleted contact: {} {}", contact.id(), contact.name),
                View::None,
            )
            .mutated()
        }
        Command::DeleteProperty(id) => {
            let property = book.delete_property(id)?;
            CommandResult::new(
                format!("Deleted property: {} {}", property.id(), property.address),
                View::None,
            )
            .mutated()
        }
        Command::ListContacts => {
            let page = book
                .filter_contacts(&Default::default(), Page::all())
                .map(Contact::clone);
            let feedback = if page.total == 0 {
                "No contacts in the book yet".to_string()
            } else {
                format!("Listed all {} contacts", page.total)
            };
            CommandResult::new(feedback, View::Contacts(page))
        }
        Command::ListProperties => {
            let page = book
                .filter_properties(&Default::default(), Page::all())
                .map(Property::clone);
            let feedback = if page.total == 0 {
                "No properties in the book yet".to_string()
            } else {
                format!("Listed all {} properties", page.total)
            };
            CommandResult::new(feedback, View::Properties(page))
        }
        Command::FilterContacts { filter, page } => {
            let page = book
                .filter_contacts(&filter, with_default_limit(page, settings))
                .map(Contact::clone);
            let feedback = paged_feedback("contacts", page.items.len(), page.total, page.offset);
            CommandResult::new(feedback, View::Contacts(page))
        }
        Command::FilterProperties { filter, page } => {
            let page = book
                .filter_properties(&filter, with_default_limit(page, settings))
                .map(Property::clone);
            let feedback = paged_feedback("properties", page.items.len(), page.total, page.offset);
            CommandResult::new(feedback, View::Properties(page))
        }
        Command::Link {
            contact,
            property,
            role,
        } => {
            book.link(contact, property, role)?;
            CommandResult::new(
                format!("Linked contact {contact} as {role} of property {property}"),
                View::None,
            )
            .mutated()
        }
        Command::Unlink {
            contact,
            property,
            role,
        } => {
            book.unlink(contact, property, role)?;
            CommandResult::new(
                format!("Unlinked contact {contact} as {role} of property {property}"),
                View::None,
            )
            .mutated()
        }
        Command::MarkContact { id, status } => {
            let contact = book.mark_contact(id, status)?;
            CommandResult::new(
                format!("Marked contact {} {} as {status}", contact.id(), contact.name),
                View::None,
            )
            .mutated()
        }
        Command::MarkProperty { id, status } => {
            let property = book.mark_property(id, status)?;
            CommandResult::new(
                format!("Marked property {} {} as {status}", property.id(), property.address),
                View::None,
            )
            .mutated()
        }
        Command::ShowContact(id) => {
            let contact = book.get_contact(id)?.clone();
            CommandResult::new(
                format!("Showing contact {id}"),
                View::Contact(Box::new(contact_detail(book, contact))),
            )
        }
        Command::ShowProperty(id) => {
            let property = book.get_property(id)?.clone();
            CommandResult::new(
                format!("Showing property {id}"),
                View::Property(Box::new(property_detail(book, property))),
            )
        }
        Command::Clear => {
            book.clear();
            CommandResult::new("Address book has been cleared!", View::None).mutated()
        }
        Command::Help(topic) => CommandResult::new("", View::Help(help_text(topic))),
        Command::Exit => CommandResult {
            exit: true,
            ..CommandResult::new("Goodbye!", View::None)
        },
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::enums::{LinkRole, PropertyStatus};
    use estate_core::ids::Uuid;
    use estate_core::sample::sample_book;
    use estate_parser::parse;
    use pretty_assertions::assert_eq;

    fn run(book: &mut AddressBook, line: &str) -> Result<CommandResult> {
        execute(book, parse(line)?, &ExecSettings::default())
    }

    #[test]
    fn add_then_show_contact() {
        let mut book = AddressBook::new();
        let added = run(&mut book, "addc n/John Doe p/98765432 e/johnd@example.com").unwrap();
        assert!(added.mutated);
        assert_eq!(added.feedback, "New contact added: #1 John Doe");

        let shown = run(&mut book, "showc 1").unwrap();
        assert!(!shown.mutated);
        let View::Contact(detail) = shown.view else {
            panic!("expected contact view");
        };
        assert_eq!(detail.contact.phone.as_str(), "98765432");
        assert!(detail.buying_properties.is_empty());
    }

    #[test]
    fn show_property_resolves_links() {
        let mut book = sample_book().unwrap();
        let result = run(&mut book, "showp 2").unwrap();
        let View::Property(detail) = result.view else {
            panic!("expected property view");
        };
        assert_eq!(detail.property.status, PropertyStatus::Pending);
        assert!(!detail.buyer_contacts.is_empty());
        assert!(!detail.seller_contacts.is_empty());
    }

    #[test]
    fn filters_use_the_default_limit() {
        let mut book = sample_book().unwrap();
        let settings = ExecSettings {
            default_limit: Some(1),
            readonly: false,
        };
        let result = execute(&mut book, parse("filterc s/active").unwrap(), &settings).unwrap();
        let View::Contacts(page) = result.view else {
            panic!("expected contacts view");
        };
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 3);
        assert_eq!(result.feedback, "1 of 3 contacts listed (showing 1-1)");

        // An explicit limit wins over the default.
        let result = execute(&mut book, parse("filterc s/active limit/5").unwrap(), &settings).unwrap();
        assert_eq!(result.feedback, "3 contacts listed");
    }

    #[test]
    fn offset_past_the_end_is_reported() {
        let mut book = sample_book().unwrap();
        let result = run(&mut book, "filterp offset/10").unwrap();
        assert_eq!(
            result.feedback,
            "0 of 3 properties listed (offset 10 is past the last match)"
        );
    }

    #[test]
    fn link_updates_both_sides() {
        let mut book = sample_book().unwrap();
        let result = run(&mut book, "link c/4 p/3 r/buyer").unwrap();
        assert!(result.mutated);
        assert!(book.get_contact(Uuid::contact(4)).unwrap().buying().contains(&Uuid::property(3)));
        assert!(book.get_property(Uuid::property(3)).unwrap().buyers().contains(&Uuid::contact(4)));

        let err = run(&mut book, "link c/4 p/3 r/seller").unwrap_err();
        assert!(err.to_string().contains("cannot also be its"), "{err}");

        run(&mut book, "unlink c/4 p/3 r/buyer").unwrap();
        assert!(book.get_contact(Uuid::contact(4)).unwrap().buying().is_empty());
        let err = run(&mut book, "unlink c/4 p/3 r/buyer").unwrap_err();
        assert!(err.to_string().contains(LinkRole::Buyer.as_str()));
    }

    #[test]
    fn readonly_rejects_mutations_only() {
        let mut book = sample_book().unwrap();
        let settings = ExecSettings {
            default_limit: None,
            readonly: true,
        };
        let err = execute(&mut book, parse("clear").unwrap(), &settings).unwrap_err();
        assert_eq!(err.to_string(), "cannot run 'clear' in read-only mode");
        assert!(!book.is_empty());
        assert!(execute(&mut book, parse("listp").unwrap(), &settings).is_ok());
    }

    #[test]
    fn help_and_exit() {
        let mut book = AddressBook::new();
        let help = run(&mut book, "help").unwrap();
        let View::Help(text) = help.view else {
            panic!("expected help view");
        };
        assert!(text.contains("filterp"));
        assert!(text.starts_with("Available commands:"));

        let usage = run(&mut book, "help link").unwrap();
        assert!(matches!(usage.view, View::Help(ref t) if t.starts_with("link:")));

        assert!(run(&mut book, "exit").unwrap().exit);
    }

    #[test]
    fn clear_empties_the_book() {
        let mut book = sample_book().unwrap();
        let result = run(&mut book, "clear").unwrap();
        assert!(result.mutated);
        assert!(book.is_empty());
        assert_eq!(run(&mut book, "listc").unwrap().feedback, "No contacts in the book yet");
    }
}
