//! Parsed commands and the command words that introduce them.

use std::fmt;
use std::str::FromStr;

use estate_core::contact::{ContactUpdates, NewContact};
use estate_core::enums::{ContactStatus, LinkRole, PropertyStatus};
use estate_core::filter::{ContactFilter, Page, PropertyFilter};
use estate_core::ids::Uuid;
use estate_core::property::{NewProperty, PropertyUpdates};

use crate::error::ParseError;

/// A fully validated command, ready to run against an address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddContact(NewContact),
    AddProperty(NewProperty),
    EditContact {
        id: Uuid,
        updates: ContactUpdates,
    },
    EditProperty {
        id: Uuid,
        updates: PropertyUpdates,
    },
    DeleteContact(Uuid),
    DeleteProperty(Uuid),
    ListContacts,
    ListProperties,
    /// `page.limit` is `None` when no `limit/` was given.
    FilterContacts {
        filter: ContactFilter,
        page: Page,
    },
    FilterProperties {
        filter: PropertyFilter,
        page: Page,
    },
    Link {
        contact: Uuid,
        property: Uuid,
        role: LinkRole,
    },
    Unlink {
        contact: Uuid,
        property: Uuid,
        role: LinkRole,
    },
    MarkContact {
        id: Uuid,
        status: ContactStatus,
    },
    MarkProperty {
        id: Uuid,
        status: PropertyStatus,
    },
    ShowContact(Uuid),
    ShowProperty(Uuid),
    Clear,
    Help(Option<CommandWord>),
    Exit,
}

impl Command {
    /// The word that introduces this command.
    pub fn word(&self) -> CommandWord {
        match self {
            Self::AddContact(_) => CommandWord::AddContact,
            Self::AddProperty(_) => CommandWord::AddProperty,
            Self::EditContact { .. } => CommandWord::EditContact,
            Self::EditProperty { .. } => CommandWord::EditProperty,
            Self::DeleteContact(_) => CommandWord::DeleteContact,
            Self::DeleteProperty(_) => CommandWord::DeleteProperty,
            Self::ListContacts => CommandWord::ListContacts,
            Self::ListProperties => CommandWord::ListProperties,
            Self::FilterContacts { .. } => CommandWord::FilterContacts,
            Self::FilterProperties { .. } => CommandWord::FilterProperties,
            Self::Link { .. } => CommandWord::Link,
            Self::Unlink { .. } => CommandWord::Unlink,
            Self::MarkContact { .. } => CommandWord::MarkContact,
            Self::MarkProperty { .. } => CommandWord::MarkProperty,
            Self::ShowContact(_) => CommandWord::ShowContact,
            Self::ShowProperty(_) => CommandWord::ShowProperty,
            Self::Clear => CommandWord::Clear,
            Self::Help(_) => CommandWord::Help,
            Self::Exit => CommandWord::Exit,
        }
    }

    /// Returns `true` if running the command can change the address book.
    pub fn is_mutating(&self) -> bool {
        self.word().is_mutating()
    }
}

/// Every command word the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandWord {
    AddContact,
    AddProperty,
    EditContact,
    EditProperty,
    DeleteContact,
    DeleteProperty,
    ListContacts,
    ListProperties,
    FilterContacts,
    FilterProperties,
    Link,
    Unlink,
    MarkContact,
    MarkProperty,
    ShowContact,
    ShowProperty,
    Clear,
    Help,
    Exit,
}

impl CommandWord {
    /// All words, in the order `help` lists them.
    pub const ALL: &[CommandWord] = &[
        Self::AddContact,
        Self::AddProperty,
        Self::EditContact,
        Self::EditProperty,
        Self::DeleteContact,
        Self::DeleteProperty,
        Self::ListContacts,
        Self::ListProperties,
        Self::FilterContacts,
        Self::FilterProperties,
        Self::ShowContact,
        Self::ShowProperty,
        Self::Link,
        Self::Unlink,
        Self::MarkContact,
        Self::MarkProperty,
        Self::Clear,
        Self::Help,
        Self::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddContact => "addc",
            Self::AddProperty => "addp",
            Self::EditContact => "editc",
            Self::EditProperty => "editp",
            Self::DeleteContact => "deletec",
            Self::DeleteProperty => "deletep",
            Self::ListContacts => "listc",
            Self::ListProperties => "listp",
            Self::FilterContacts => "filterc",
            Self::FilterProperties => "filterp",
            Self::Link => "link",
            Self::Unlink => "unlink",
            Self::MarkContact => "markc",
            Self::MarkProperty => "markp",
            Self::ShowContact => "showc",
            Self::ShowProperty => "showp",
            Self::Clear => "clear",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// One-line description for the `help` overview.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::AddContact => "Add a contact",
            Self::AddProperty => "Add a property listing",
            Self::EditContact => "Edit a contact's details",
            Self::EditProperty => "Edit a property's details",
            Self::DeleteContact => "Delete a contact and its links",
            Self::DeleteProperty => "Delete a property and its links",
            Self::ListContacts => "List all contacts",
            Self::ListProperties => "List all properties",
            Self::FilterContacts => "Find contacts matching criteria",
            Self::FilterProperties => "Find properties matching criteria",
            Self::Link => "Link a contact to a property as buyer or seller",
            Self::Unlink => "Remove a buyer or seller link",
            Self::MarkContact => "Set a contact's status",
            Self::MarkProperty => "Set a property's status",
            Self::ShowContact => "Show a contact with its linked properties",
            Self::ShowProperty => "Show a property with its buyers and sellers",
            Self::Clear => "Remove every contact and property",
            Self::Help => "Show help for all or one command",
            Self::Exit => "Leave the shell",
        }
    }

    /// Full usage text, shown for format errors and `help WORD`.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::AddContact => {
                "addc: Adds a contact.\n\
                 Parameters: n/NAME p/PHONE e/EMAIL [a/ADDRESS] [bmin/PRICE] [bmax/PRICE] [t/TAG]...\n\
                 Example: addc n/John Doe p/98765432 e/johnd@example.com bmax/800000 t/buyer"
            }
            Self::AddProperty => {
                "addp: Adds a property listing.\n\
                 Parameters: a/ADDRESS pc/POSTAL_CODE fa/FLOOR_AREA bed/BEDROOMS bath/BATHROOMS pr/PRICE [s/STATUS] [t/TAG]...\n\
                 Example: addp a/12 Marine Parade Road pc/449283 fa/110 bed/3 bath/2 pr/1250000 t/seaview"
            }
            Self::EditContact => {
                "editc: Edits the contact with the given id. Empty a/, bmin/ or bmax/ clears the value; a single empty t/ removes all tags.\n\
                 Parameters: ID [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [bmin/PRICE] [bmax/PRICE] [t/TAG]...\n\
                 Example: editc 1 p/91234567 e/johndoe@example.com"
            }
            Self::EditProperty => {
                "editp: Edits the property with the given id. A single empty t/ removes all tags.\n\
                 Parameters: ID [a/ADDRESS] [pc/POSTAL_CODE] [fa/FLOOR_AREA] [bed/BEDROOMS] [bath/BATHROOMS] [pr/PRICE] [t/TAG]...\n\
                 Example: editp 2 pr/1180000"
            }
            Self::DeleteContact => {
                "deletec: Deletes the contact with the given id.\n\
                 Parameters: ID\n\
                 Example: deletec 1"
            }
            Self::DeleteProperty => {
                "deletep: Deletes the property with the given id.\n\
                 Parameters: ID\n\
                 Example: deletep 1"
            }
            Self::ListContacts => "listc: Lists all contacts.\nExample: listc",
            Self::ListProperties => "listp: Lists all properties.\nExample: listp",
            Self::FilterContacts => {
                "filterc: Finds contacts matching every given criterion. Name keywords match whole words, ignoring case.\n\
                 Parameters: [n/KEYWORDS] [p/PHONE] [e/EMAIL] [t/TAG]... [s/STATUS] [pr/PRICE] [limit/N] [offset/N]\n\
                 Example: filterc n/alice bob t/vip limit/10"
            }
            Self::FilterProperties => {
                "filterp: Finds properties matching every given criterion.\n\
                 Parameters: [a/KEYWORDS] [pc/POSTAL_PREFIX] [t/TAG]... [s/STATUS] [bed/MIN] [bath/MIN] [prmin/PRICE] [prmax/PRICE] [limit/N] [offset/N]\n\
                 Example: filterp pc/44 bed/3 prmax/1500000"
            }
            Self::Link => {
                "link: Links a contact to a property as its buyer or seller.\n\
                 Parameters: c/CONTACT_ID p/PROPERTY_ID r/buyer|seller\n\
                 Example: link c/1 p/2 r/buyer"
            }
            Self::Unlink => {
                "unlink: Removes a buyer or seller link.\n\
                 Parameters: c/CONTACT_ID p/PROPERTY_ID r/buyer|seller\n\
                 Example: unlink c/1 p/2 r/buyer"
            }
            Self::MarkContact => {
                "markc: Sets the status of a contact.\n\
                 Parameters: ID s/active|inactive\n\
                 Example: markc 1 s/inactive"
            }
            Self::MarkProperty => {
                "markp: Sets the status of a property.\n\
                 Parameters: ID s/available|pending|sold\n\
                 Example: markp 2 s/sold"
            }
            Self::ShowContact => {
                "showc: Shows a contact with the properties it is buying and selling.\n\
                 Parameters: ID\n\
                 Example: showc 1"
            }
            Self::ShowProperty => {
                "showp: Shows a property with its buyers and sellers.\n\
                 Parameters: ID\n\
                 Example: showp 2"
            }
            Self::Clear => "clear: Removes every contact and property.\nExample: clear",
            Self::Help => {
                "help: Shows all commands, or the usage of one command.\n\
                 Parameters: [COMMAND]\n\
                 Example: help addc"
            }
            Self::Exit => "exit: Leaves the shell.\nExample: exit",
        }
    }

    /// Returns `true` for words whose command can change the address book.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddContact
                | Self::AddProperty
                | Self::EditContact
                | Self::EditProperty
                | Self::DeleteContact
                | Self::DeleteProperty
                | Self::Link
                | Self::Unlink
                | Self::MarkContact
                | Self::MarkProperty
                | Self::Clear
        )
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandWord {
    type Err = ParseError;

    /// Command words are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| ParseError::UnknownCommand(s.to_owned()))
    }
}
