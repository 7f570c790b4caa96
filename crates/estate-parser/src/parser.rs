//! Turns one line of user input into a [`Command`].

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use estate_core::contact::{ContactUpdates, NewContact};
use estate_core::enums::{ContactStatus, LinkRole, PropertyStatus};
use estate_core::fields::{
    Address, Budget, Email, FloorArea, Name, Phone, PostalCode, Price, RoomCount, Tag,
};
use estate_core::filter::{ContactFilter, Page, PropertyFilter};
use estate_core::ids::{Uuid, parse_id};
use estate_core::property::{NewProperty, PropertyUpdates};
use regex::Regex;

use crate::command::{Command, CommandWord};
use crate::error::{ParseError, Result};
use crate::tokenizer::{self as prefix, ArgumentMultimap, Prefix, tokenize};

static COMMAND_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<word>\S+)(?P<args>.*)$").expect("command pattern is valid")
});

const CONTACT_FIELDS: &[Prefix] = &[
    prefix::NAME,
    prefix::PHONE,
    prefix::EMAIL,
    prefix::ADDRESS,
    prefix::BUDGET_MIN,
    prefix::BUDGET_MAX,
    prefix::TAG,
];

const PROPERTY_FIELDS: &[Prefix] = &[
    prefix::ADDRESS,
    prefix::POSTAL_CODE,
    prefix::FLOOR_AREA,
    prefix::BEDROOMS,
    prefix::BATHROOMS,
    prefix::PRICE,
    prefix::STATUS,
    prefix::TAG,
];

const CONTACT_FILTERS: &[Prefix] = &[
    prefix::NAME,
    prefix::PHONE,
    prefix::EMAIL,
    prefix::TAG,
    prefix::STATUS,
    prefix::PRICE,
    prefix::LIMIT,
    prefix::OFFSET,
];

const PROPERTY_FILTERS: &[Prefix] = &[
    prefix::ADDRESS,
    prefix::POSTAL_CODE,
    prefix::TAG,
    prefix::STATUS,
    prefix::BEDROOMS,
    prefix::BATHROOMS,
    prefix::PRICE_MIN,
    prefix::PRICE_MAX,
    prefix::LIMIT,
    prefix::OFFSET,
];

const LINK_FIELDS: &[Prefix] = &[prefix::CONTACT, prefix::PROPERTY, prefix::ROLE];

/// Parses a full command line such as `addc n/John p/123 e/j@x.com`.
pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let captures = COMMAND_FORMAT.captures(line).ok_or(ParseError::Empty)?;
    let word: CommandWord = captures["word"].parse()?;
    let args = captures.name("args").map_or("", |m| m.as_str());

    match word {
        CommandWord::AddContact => parse_add_contact(args),
        CommandWord::AddProperty => parse_add_property(args),
        CommandWord::EditContact => parse_edit_contact(args),
        CommandWord::EditProperty => parse_edit_property(args),
        CommandWord::DeleteContact => Ok(Command::DeleteContact(parse_target(
            args,
            word,
            Uuid::contact,
        )?)),
        CommandWord::DeleteProperty => Ok(Command::DeleteProperty(parse_target(
            args,
            word,
            Uuid::property,
        )?)),
        CommandWord::ShowContact => Ok(Command::ShowContact(parse_target(
            args,
            word,
            Uuid::contact,
        )?)),
        CommandWord::ShowProperty => Ok(Command::ShowProperty(parse_target(
            args,
            word,
            Uuid::property,
        )?)),
        CommandWord::ListContacts => no_arguments(args, word, Command::ListContacts),
        CommandWord::ListProperties => no_arguments(args, word, Command::ListProperties),
        CommandWord::Clear => no_arguments(args, word, Command::Clear),
        CommandWord::Exit => no_arguments(args, word, Command::Exit),
        CommandWord::FilterContacts => parse_filter_contacts(args),
        CommandWord::FilterProperties => parse_filter_properties(args),
        CommandWord::Link => {
            let (contact, property, role) = parse_link(args, word)?;
            Ok(Command::Link {
                contact,
                property,
                role,
            })
        }
        CommandWord::Unlink => {
            let (contact, property, role) = parse_link(args, word)?;
            Ok(Command::Unlink {
                contact,
                property,
                role,
            })
        }
        CommandWord::MarkContact => {
            let (id, status) = parse_mark(args, word, Uuid::contact)?;
            Ok(Command::MarkContact { id, status })
        }
        CommandWord::MarkProperty => {
            let (id, status) = parse_mark(args, word, Uuid::property)?;
            Ok(Command::MarkProperty { id, status })
        }
        CommandWord::Help => {
            let topic = args.trim();
            if topic.is_empty() {
                Ok(Command::Help(None))
            } else {
                Ok(Command::Help(Some(topic.parse()?)))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

fn parse_add_contact(args: &str) -> Result<Command> {
    let word = CommandWord::AddContact;
    let map = tokenize(args, CONTACT_FIELDS);
    require(&map, word, &[prefix::NAME, prefix::PHONE, prefix::EMAIL])?;
    map.verify_no_duplicates(&single_valued(CONTACT_FIELDS))?;

    let budget = Budget::new(
        optional(&map, prefix::BUDGET_MIN, Price::parse)?,
        optional(&map, prefix::BUDGET_MAX, Price::parse)?,
    )?;
    Ok(Command::AddContact(NewContact {
        name: required(&map, prefix::NAME, Name::parse)?,
        phone: required(&map, prefix::PHONE, Phone::parse)?,
        email: required(&map, prefix::EMAIL, Email::parse)?,
        address: optional(&map, prefix::ADDRESS, Address::parse)?,
        budget,
        tags: parse_tags(map.all_values(prefix::TAG))?,
    }))
}

fn parse_edit_contact(args: &str) -> Result<Command> {
    let word = CommandWord::EditContact;
    let map = tokenize(args, CONTACT_FIELDS);
    let id = parse_preamble_id(&map, word, Uuid::contact)?;
    map.verify_no_duplicates(&single_valued(CONTACT_FIELDS))?;

    let updates = ContactUpdates {
        name: optional(&map, prefix::NAME, Name::parse)?,
        phone: optional(&map, prefix::PHONE, Phone::parse)?,
        email: optional(&map, prefix::EMAIL, Email::parse)?,
        address: clearable(&map, prefix::ADDRESS, Address::parse)?,
        budget_min: clearable(&map, prefix::BUDGET_MIN, Price::parse)?,
        budget_max: clearable(&map, prefix::BUDGET_MAX, Price::parse)?,
        tags: parse_tags_for_edit(map.all_values(prefix::TAG))?,
    };
    if updates.is_empty() {
        return Err(ParseError::NoFieldsToEdit);
    }
    Ok(Command::EditContact { id, updates })
}

fn parse_filter_contacts(args: &str) -> Result<Command> {
    let word = CommandWord::FilterContacts;
    let map = tokenize(args, CONTACT_FILTERS);
    if !map.preamble().is_empty() || map.has_no_prefixes() {
        return Err(invalid_format(word));
    }
    map.verify_no_duplicates(&single_valued(CONTACT_FILTERS))?;

    let filter = ContactFilter {
        name_keywords: keywords(&map, prefix::NAME, word)?,
        phone: non_empty(&map, prefix::PHONE, word)?.map(str::to_owned),
        email: non_empty(&map, prefix::EMAIL, word)?.map(str::to_owned),
        tags: parse_tags(map.all_values(prefix::TAG))?.into_iter().collect(),
        status: optional(&map, prefix::STATUS, ContactStatus::from_str)?,
        affordable: optional(&map, prefix::PRICE, Price::parse)?,
    };
    Ok(Command::FilterContacts {
        filter,
        page: parse_page(&map)?,
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn parse_add_property(args: &str) -> Result<Command> {
    let word = CommandWord::AddProperty;
    let map = tokenize(args, PROPERTY_FIELDS);
    require(
        &map,
        word,
        &[
            prefix::ADDRESS,
            prefix::POSTAL_CODE,
            prefix::FLOOR_AREA,
            prefix::BEDROOMS,
            prefix::BATHROOMS,
            prefix::PRICE,
        ],
    )?;
    map.verify_no_duplicates(&single_valued(PROPERTY_FIELDS))?;

    Ok(Command::AddProperty(NewProperty {
        address: required(&map, prefix::ADDRESS, Address::parse)?,
        postal_code: required(&map, prefix::POSTAL_CODE, PostalCode::parse)?,
        floor_area: required(&map, prefix::FLOOR_AREA, FloorArea::parse)?,
        bedrooms: required(&map, prefix::BEDROOMS, RoomCount::parse)?,
        bathrooms: required(&map, prefix::BATHROOMS, RoomCount::parse)?,
        price: required(&map, prefix::PRICE, Price::parse)?,
        status: optional(&map, prefix::STATUS, PropertyStatus::from_str)?.unwrap_or_default(),
        tags: parse_tags(map.all_values(prefix::TAG))?,
    }))
}

fn parse_edit_property(args: &str) -> Result<Command> {
    let word = CommandWord::EditProperty;
    // Status changes go through `markp`.
    let fields: Vec<Prefix> = PROPERTY_FIELDS
        .iter()
        .copied()
        .filter(|p| *p != prefix::STATUS)
        .collect();
    let map = tokenize(args, &fields);
    let id = parse_preamble_id(&map, word, Uuid::property)?;
    map.verify_no_duplicates(&single_valued(&fields))?;

    let updates = PropertyUpdates {
        address: optional(&map, prefix::ADDRESS, Address::parse)?,
        postal_code: optional(&map, prefix::POSTAL_CODE, PostalCode::parse)?,
        floor_area: optional(&map, prefix::FLOOR_AREA, FloorArea::parse)?,
        bedrooms: optional(&map, prefix::BEDROOMS, RoomCount::parse)?,
        bathrooms: optional(&map, prefix::BATHROOMS, RoomCount::parse)?,
        price: optional(&map, prefix::PRICE, Price::parse)?,
        tags: parse_tags_for_edit(map.all_values(prefix::TAG))?,
    };
    if updates.is_empty() {
        return Err(ParseError::NoFieldsToEdit);
    }
    Ok(Command::EditProperty { id, updates })
}

fn parse_filter_properties(args: &str) -> Result<Command> {
    let word = CommandWord::FilterProperties;
    let map = tokenize(args, PROPERTY_FILTERS);
    if !map.preamble().is_empty() || map.has_no_prefixes() {
        return Err(invalid_format(word));
    }
    map.verify_no_duplicates(&single_valued(PROPERTY_FILTERS))?;

    let postal_prefix = non_empty(&map, prefix::POSTAL_CODE, word)?
        .map(|value| {
            if value.len() <= 6 && value.chars().all(|c| c.is_ascii_digit()) {
                Ok(value.to_owned())
            } else {
                Err(ParseError::InvalidNumber {
                    prefix: prefix::POSTAL_CODE.as_str(),
                    value: value.to_owned(),
                    reason: "expected the first 1 to 6 digits of a postal code",
                })
            }
        })
        .transpose()?;

    let min_price = optional(&map, prefix::PRICE_MIN, Price::parse)?;
    let max_price = optional(&map, prefix::PRICE_MAX, Price::parse)?;
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min > max {
            return Err(ParseError::InvalidRange {
                min: min.amount(),
                max: max.amount(),
            });
        }
    }

    let filter = PropertyFilter {
        address_keywords: keywords(&map, prefix::ADDRESS, word)?,
        postal_prefix,
        tags: parse_tags(map.all_values(prefix::TAG))?.into_iter().collect(),
        status: optional(&map, prefix::STATUS, PropertyStatus::from_str)?,
        min_bedrooms: optional(&map, prefix::BEDROOMS, RoomCount::parse)?,
        min_bathrooms: optional(&map, prefix::BATHROOMS, RoomCount::parse)?,
        min_price,
        max_price,
    };
    Ok(Command::FilterProperties {
        filter,
        page: parse_page(&map)?,
    })
}

// ---------------------------------------------------------------------------
// Links and status
// ---------------------------------------------------------------------------

fn parse_link(args: &str, word: CommandWord) -> Result<(Uuid, Uuid, LinkRole)> {
    let map = tokenize(args, LINK_FIELDS);
    require(&map, word, LINK_FIELDS)?;
    map.verify_no_duplicates(LINK_FIELDS)?;

    let contact = required(&map, prefix::CONTACT, |v| {
        parse_id(v).ok_or_else(|| ParseError::InvalidId(v.to_owned()))
    })?;
    let property = required(&map, prefix::PROPERTY, |v| {
        parse_id(v).ok_or_else(|| ParseError::InvalidId(v.to_owned()))
    })?;
    let role = required(&map, prefix::ROLE, LinkRole::from_str)?;
    Ok((Uuid::contact(contact), Uuid::property(property), role))
}

fn parse_mark<S>(args: &str, word: CommandWord, make_id: fn(u32) -> Uuid) -> Result<(Uuid, S)>
where
    S: FromStr,
    ParseError: From<S::Err>,
{
    let map = tokenize(args, &[prefix::STATUS]);
    let id = parse_preamble_id(&map, word, make_id)?;
    if !map.contains(prefix::STATUS) {
        return Err(invalid_format(word));
    }
    map.verify_no_duplicates(&[prefix::STATUS])?;
    let status = required(&map, prefix::STATUS, S::from_str)?;
    Ok((id, status))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_format(word: CommandWord) -> ParseError {
    ParseError::InvalidFormat {
        usage: word.usage(),
    }
}

fn no_arguments(args: &str, word: CommandWord, command: Command) -> Result<Command> {
    if args.trim().is_empty() {
        Ok(command)
    } else {
        Err(invalid_format(word))
    }
}

/// Every prefix in `prefixes` except the repeatable `t/`.
fn single_valued(prefixes: &[Prefix]) -> Vec<Prefix> {
    prefixes
        .iter()
        .copied()
        .filter(|p| *p != prefix::TAG)
        .collect()
}

/// The preamble must be empty and every prefix in `prefixes` present.
fn require(map: &ArgumentMultimap, word: CommandWord, prefixes: &[Prefix]) -> Result<()> {
    if map.preamble().is_empty() && prefixes.iter().all(|p| map.contains(*p)) {
        Ok(())
    } else {
        Err(invalid_format(word))
    }
}

/// A command whose whole argument string is a single id.
fn parse_target(args: &str, word: CommandWord, make_id: fn(u32) -> Uuid) -> Result<Uuid> {
    let raw = args.trim();
    if raw.is_empty() {
        return Err(invalid_format(word));
    }
    parse_id(raw)
        .map(make_id)
        .ok_or_else(|| ParseError::InvalidId(raw.to_owned()))
}

fn parse_preamble_id(
    map: &ArgumentMultimap,
    word: CommandWord,
    make_id: fn(u32) -> Uuid,
) -> Result<Uuid> {
    parse_target(map.preamble(), word, make_id)
}

fn required<T, E>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
) -> Result<T>
where
    ParseError: From<E>,
{
    let value = map.value(prefix).unwrap_or_default();
    Ok(parse(value)?)
}

fn optional<T, E>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
) -> Result<Option<T>>
where
    ParseError: From<E>,
{
    map.value(prefix)
        .map(parse)
        .transpose()
        .map_err(ParseError::from)
}

/// Like [`optional`], but an empty value means "clear the field".
fn clearable<T, E>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
) -> Result<Option<Option<T>>>
where
    ParseError: From<E>,
{
    match map.value(prefix) {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(value) => Ok(Some(Some(parse(value)?))),
    }
}

/// A filter value that must not be blank when given.
fn non_empty<'a>(
    map: &'a ArgumentMultimap,
    prefix: Prefix,
    word: CommandWord,
) -> Result<Option<&'a str>> {
    match map.value(prefix) {
        Some("") => Err(invalid_format(word)),
        other => Ok(other),
    }
}

fn keywords(map: &ArgumentMultimap, prefix: Prefix, word: CommandWord) -> Result<Vec<String>> {
    Ok(non_empty(map, prefix, word)?
        .map(|value| value.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default())
}

fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>> {
    Ok(values
        .iter()
        .map(|v| Tag::parse(v))
        .collect::<std::result::Result<_, _>>()?)
}

/// `None` when no `t/` was given; a single empty `t/` clears all tags.
fn parse_tags_for_edit(values: &[String]) -> Result<Option<BTreeSet<Tag>>> {
    match values {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        _ => parse_tags(values).map(Some),
    }
}

fn parse_page(map: &ArgumentMultimap) -> Result<Page> {
    let limit = map
        .value(prefix::LIMIT)
        .map(|v| parse_count(prefix::LIMIT, v, 1, "expected a positive whole number"))
        .transpose()?;
    let offset = map
        .value(prefix::OFFSET)
        .map(|v| parse_count(prefix::OFFSET, v, 0, "expected a non-negative whole number"))
        .transpose()?
        .unwrap_or(0);
    Ok(Page::new(limit, offset))
}

fn parse_count(prefix: Prefix, value: &str, min: usize, reason: &'static str) -> Result<usize> {
    let digits_only = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    match value.parse::<usize>() {
        Ok(n) if digits_only && n >= min => Ok(n),
        _ => Err(ParseError::InvalidNumber {
            prefix: prefix.as_str(),
            value: value.to_owned(),
            reason,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::validation::ValidationError;
    use pretty_assertions::assert_eq;

    fn tags(values: &[&str]) -> BTreeSet<Tag> {
        values.iter().map(|t| Tag::parse(t).unwrap()).collect()
    }

    #[test]
    fn blank_and_unknown_commands() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(
            parse("addcontact n/x"),
            Err(ParseError::UnknownCommand("addcontact".into()))
        );
    }

    #[test]
    fn add_contact_with_all_fields() {
        let command = parse(
            "addc n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2 bmin/300000 bmax/$800,000 t/friends t/buyer",
        )
        .unwrap();
        let Command::AddContact(new) = command else {
            panic!("expected AddContact");
        };
        assert_eq!(new.name.as_str(), "John Doe");
        assert_eq!(new.address.unwrap().as_str(), "311, Clementi Ave 2");
        assert_eq!(new.budget.min().unwrap().amount(), 300_000);
        assert_eq!(new.budget.max().unwrap().amount(), 800_000);
        assert_eq!(new.tags, tags(&["friends", "buyer"]));
    }

    #[test]
    fn add_contact_requires_fields_and_no_preamble() {
        let usage = CommandWord::AddContact.usage();
        assert_eq!(
            parse("addc n/John p/123"),
            Err(ParseError::InvalidFormat { usage })
        );
        assert_eq!(
            parse("addc junk n/John p/123 e/j@example.com"),
            Err(ParseError::InvalidFormat { usage })
        );
    }

    #[test]
    fn add_contact_rejects_repeated_fields() {
        let err = parse("addc n/A n/B p/123 p/456 e/a@example.com").unwrap_err();
        assert_eq!(err, ParseError::DuplicatePrefixes(vec!["n/", "p/"]));
        assert_eq!(
            err.to_string(),
            "Multiple values specified for the following single-valued field(s): n/ p/"
        );
    }

    #[test]
    fn add_contact_reports_field_errors() {
        assert_eq!(
            parse("addc n/John p/12 e/j@example.com"),
            Err(ParseError::InvalidValue(ValidationError::Phone))
        );
        assert_eq!(
            parse("addc n/John p/123 e/j@example.com bmin/9 bmax/3"),
            Err(ParseError::InvalidValue(ValidationError::BudgetRange {
                min: 9,
                max: 3
            }))
        );
        assert_eq!(
            parse("addc n/John p/123 e/j@example.com t/two words"),
            Err(ParseError::InvalidValue(ValidationError::Tag(
                "two words".into()
            )))
        );
    }

    #[test]
    fn add_property_defaults_to_available() {
        let command =
            parse("addp a/12 Marine Parade Road pc/449283 fa/110 bed/3 bath/2 pr/1250000").unwrap();
        let Command::AddProperty(new) = command else {
            panic!("expected AddProperty");
        };
        assert_eq!(new.status, PropertyStatus::Available);
        assert_eq!(new.floor_area.square_metres(), 110);
        assert!(new.tags.is_empty());

        let command =
            parse("addp a/1 Road pc/123456 fa/50 bed/1 bath/1 pr/1 s/Pending t/new").unwrap();
        let Command::AddProperty(new) = command else {
            panic!("expected AddProperty");
        };
        assert_eq!(new.status, PropertyStatus::Pending);
    }

    #[test]
    fn add_property_missing_price_shows_usage() {
        assert_eq!(
            parse("addp a/1 Road pc/123456 fa/50 bed/1 bath/1"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::AddProperty.usage()
            })
        );
    }

    #[test]
    fn signed_counts_are_rejected() {
        assert_eq!(
            parse("addp a/1 Road pc/123456 fa/+50 bed/1 bath/1 pr/1"),
            Err(ParseError::InvalidValue(ValidationError::FloorArea))
        );
        assert_eq!(
            parse("filterp bed/+1"),
            Err(ParseError::InvalidValue(ValidationError::RoomCount))
        );
    }

    #[test]
    fn edit_contact_clears_values() {
        let command = parse("editc #2 a/ bmax/ t/").unwrap();
        assert_eq!(
            command,
            Command::EditContact {
                id: Uuid::contact(2),
                updates: ContactUpdates {
                    address: Some(None),
                    budget_max: Some(None),
                    tags: Some(BTreeSet::new()),
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn edit_contact_needs_id_and_fields() {
        assert_eq!(
            parse("editc n/John"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::EditContact.usage()
            })
        );
        assert_eq!(parse("editc 0 n/John"), Err(ParseError::InvalidId("0".into())));
        assert_eq!(parse("editc 3"), Err(ParseError::NoFieldsToEdit));
        // An empty tag among others is an invalid tag, not a clear.
        assert_eq!(
            parse("editc 3 t/a t/"),
            Err(ParseError::InvalidValue(ValidationError::Tag(String::new())))
        );
    }

    #[test]
    fn edit_property_ignores_status_prefix() {
        let command = parse("editp 1 pr/990000 t/reno").unwrap();
        assert_eq!(
            command,
            Command::EditProperty {
                id: Uuid::property(1),
                updates: PropertyUpdates {
                    price: Some(Price::new(990_000).unwrap()),
                    tags: Some(tags(&["reno"])),
                    ..Default::default()
                },
            }
        );
        // `s/` is not an editp prefix, so it stays in the address value.
        let Command::EditProperty { updates, .. } = parse("editp 1 a/1 Road s/sold").unwrap() else {
            panic!("expected EditProperty");
        };
        assert_eq!(updates.address.unwrap().as_str(), "1 Road s/sold");
    }

    #[test]
    fn id_commands() {
        assert_eq!(parse("deletec 4"), Ok(Command::DeleteContact(Uuid::contact(4))));
        assert_eq!(parse("deletep #7"), Ok(Command::DeleteProperty(Uuid::property(7))));
        assert_eq!(parse("showc 1"), Ok(Command::ShowContact(Uuid::contact(1))));
        assert_eq!(parse("showp 2"), Ok(Command::ShowProperty(Uuid::property(2))));
        assert_eq!(parse("deletec abc"), Err(ParseError::InvalidId("abc".into())));
        assert_eq!(
            parse("showp"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::ShowProperty.usage()
            })
        );
    }

    #[test]
    fn commands_without_arguments() {
        assert_eq!(parse("listc"), Ok(Command::ListContacts));
        assert_eq!(parse("  listp  "), Ok(Command::ListProperties));
        assert_eq!(parse("clear"), Ok(Command::Clear));
        assert_eq!(parse("exit"), Ok(Command::Exit));
        assert_eq!(
            parse("listc all"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::ListContacts.usage()
            })
        );
    }

    #[test]
    fn filter_contacts() {
        let command = parse("filterc n/alice  bob t/vip s/active pr/500000 limit/5 offset/10").unwrap();
        assert_eq!(
            command,
            Command::FilterContacts {
                filter: ContactFilter {
                    name_keywords: vec!["alice".into(), "bob".into()],
                    tags: vec![Tag::parse("vip").unwrap()],
                    status: Some(ContactStatus::Active),
                    affordable: Some(Price::new(500_000).unwrap()),
                    ..Default::default()
                },
                page: Page::new(Some(5), 10),
            }
        );
    }

    #[test]
    fn filter_requires_some_criterion() {
        let usage = CommandWord::FilterContacts.usage();
        assert_eq!(parse("filterc"), Err(ParseError::InvalidFormat { usage }));
        assert_eq!(parse("filterc alice"), Err(ParseError::InvalidFormat { usage }));
        assert_eq!(parse("filterc n/"), Err(ParseError::InvalidFormat { usage }));
        // Paging alone is enough.
        assert_eq!(
            parse("filterc limit/2"),
            Ok(Command::FilterContacts {
                filter: ContactFilter::default(),
                page: Page::new(Some(2), 0),
            })
        );
    }

    #[test]
    fn filter_paging_bounds() {
        assert!(matches!(
            parse("filterp limit/0"),
            Err(ParseError::InvalidNumber { prefix: "limit/", .. })
        ));
        assert!(matches!(
            parse("filterp offset/-1"),
            Err(ParseError::InvalidNumber { prefix: "offset/", .. })
        ));
        assert!(matches!(
            parse("filterc limit/+3"),
            Err(ParseError::InvalidNumber { prefix: "limit/", .. })
        ));
        assert!(matches!(
            parse("filterc s/active offset/+1"),
            Err(ParseError::InvalidNumber { prefix: "offset/", .. })
        ));
        assert!(parse("filterp offset/0").is_ok());
    }

    #[test]
    fn filter_properties() {
        let command = parse("filterp a/marine pc/44 bed/3 prmin/1,000,000 prmax/1500000 s/available").unwrap();
        let Command::FilterProperties { filter, page } = command else {
            panic!("expected FilterProperties");
        };
        assert_eq!(filter.address_keywords, vec!["marine".to_string()]);
        assert_eq!(filter.postal_prefix.as_deref(), Some("44"));
        assert_eq!(filter.min_bedrooms, Some(RoomCount::new(3).unwrap()));
        assert_eq!(filter.min_price, Some(Price::new(1_000_000).unwrap()));
        assert_eq!(filter.status, Some(PropertyStatus::Available));
        assert_eq!(page, Page::all());
    }

    #[test]
    fn filter_properties_rejects_inverted_range() {
        assert_eq!(
            parse("filterp prmin/900 prmax/100"),
            Err(ParseError::InvalidRange { min: 900, max: 100 })
        );
        assert!(matches!(
            parse("filterp pc/44a"),
            Err(ParseError::InvalidNumber { prefix: "pc/", .. })
        ));
    }

    #[test]
    fn link_and_unlink() {
        assert_eq!(
            parse("link c/1 p/#2 r/buyer"),
            Ok(Command::Link {
                contact: Uuid::contact(1),
                property: Uuid::property(2),
                role: LinkRole::Buyer,
            })
        );
        assert_eq!(
            parse("unlink r/SELLER c/3 p/4"),
            Ok(Command::Unlink {
                contact: Uuid::contact(3),
                property: Uuid::property(4),
                role: LinkRole::Seller,
            })
        );
        assert_eq!(parse("link c/x p/2 r/buyer"), Err(ParseError::InvalidId("x".into())));
        assert!(matches!(
            parse("link c/1 p/2 r/tenant"),
            Err(ParseError::InvalidValue(ValidationError::UnknownVariant { .. }))
        ));
        assert_eq!(
            parse("link c/1 r/buyer"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::Link.usage()
            })
        );
    }

    #[test]
    fn mark_commands() {
        assert_eq!(
            parse("markc 1 s/inactive"),
            Ok(Command::MarkContact {
                id: Uuid::contact(1),
                status: ContactStatus::Inactive,
            })
        );
        assert_eq!(
            parse("markp 2 s/sold"),
            Ok(Command::MarkProperty {
                id: Uuid::property(2),
                status: PropertyStatus::Sold,
            })
        );
        assert!(matches!(
            parse("markc 1 s/sold"),
            Err(ParseError::InvalidValue(ValidationError::UnknownVariant { .. }))
        ));
        assert_eq!(
            parse("markp 2"),
            Err(ParseError::InvalidFormat {
                usage: CommandWord::MarkProperty.usage()
            })
        );
    }

    #[test]
    fn help_topics() {
        assert_eq!(parse("help"), Ok(Command::Help(None)));
        assert_eq!(parse("help addp"), Ok(Command::Help(Some(CommandWord::AddProperty))));
        assert_eq!(
            parse("help nothing"),
            Err(ParseError::UnknownCommand("nothing".into()))
        );
    }
}
