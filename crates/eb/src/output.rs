//! Output formatting for the `eb` CLI.
//!
//! Human output is a feedback line followed by a table or a detail card;
//! `--json` prints one JSON object per command instead.

use std::io::{self, Write};

use estate_core::contact::Contact;
use estate_core::enums::{ContactStatus, PropertyStatus};
use estate_core::filter::Paged;
use estate_core::property::Property;
use estate_ui::pager;
use estate_ui::styles::{
    render_bold, render_category, render_contact_status, render_dimmed_line, render_id,
    render_fail, render_muted, render_pass, render_property_status, render_separator,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::actions::{CommandResult, ContactDetail, PropertyDetail, View};
use crate::context::RuntimeContext;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{json}");
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {e}");
            std::process::exit(1);
        }
    }
}

/// A table row; dimmed rows are rendered muted as a whole.
pub struct Row {
    pub cells: Vec<String>,
    pub dimmed: bool,
}

/// Formats a table with headers, a dash separator and aligned columns.
///
/// Returns an empty string when there are no rows.
pub fn format_table(headers: &[&str], rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let join = |cells: &mut dyn Iterator<Item = String>| -> String {
        cells.collect::<Vec<_>>().join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_bold(&join(
        &mut headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| format!("{h:<w$}")),
    )));
    lines.push(render_muted(&join(
        &mut widths.iter().map(|w| "-".repeat(*w)),
    )));
    for row in rows {
        let line = join(
            &mut row
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(&w) => format!("{cell:<w$}"),
                    None => cell.clone(),
                }),
        );
        lines.push(if row.dimmed {
            render_dimmed_line(&line)
        } else {
            line
        });
    }
    lines.join("\n")
}

fn join_tags<'a>(tags: impl IntoIterator<Item = &'a estate_core::fields::Tag>) -> String {
    tags.into_iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub const CONTACT_HEADERS: &[&str] = &["ID", "NAME", "PHONE", "EMAIL", "BUDGET", "STATUS", "TAGS"];

pub const PROPERTY_HEADERS: &[&str] = &[
    "ID", "ADDRESS", "POSTAL", "PRICE", "BED/BATH", "AREA", "STATUS", "TAGS",
];

pub fn contact_row(contact: &Contact) -> Row {
    Row {
        cells: vec![
            contact.id().to_string(),
            contact.name.to_string(),
            contact.phone.to_string(),
            contact.email.to_string(),
            contact.budget.to_string(),
            contact.status.to_string(),
            join_tags(&contact.tags),
        ],
        dimmed: contact.status == ContactStatus::Inactive,
    }
}

pub fn property_row(property: &Property) -> Row {
    Row {
        cells: vec![
            property.id().to_string(),
            property.address.to_string(),
            property.postal_code.to_string(),
            property.price.to_string(),
            format!("{}/{}", property.bedrooms, property.bathrooms),
            property.floor_area.to_string(),
            property.status.to_string(),
            join_tags(&property.tags),
        ],
        dimmed: property.status == PropertyStatus::Sold,
    }
}

fn contact_line(contact: &Contact) -> String {
    format!(
        "  {} {} ({})",
        render_id(contact.id()),
        contact.name,
        contact.phone
    )
}

fn property_line(property: &Property) -> String {
    format!(
        "  {} {}, {} ({})",
        render_id(property.id()),
        property.address,
        property.postal_code,
        render_property_status(property.status)
    )
}

fn linked_section<T>(title: &str, items: &[T], line: impl Fn(&T) -> String) -> Vec<String> {
    let mut lines = vec![render_separator(), render_category(title)];
    if items.is_empty() {
        lines.push(render_muted("  (none)"));
    } else {
        lines.extend(items.iter().map(line));
    }
    lines
}

/// Multi-line card for `showc` and contact changes.
pub fn format_contact_detail(detail: &ContactDetail) -> String {
    let c = &detail.contact;
    let mut lines = vec![
        format!(
            "{} {} [{}]",
            render_id(c.id()),
            render_bold(c.name.as_str()),
            render_contact_status(c.status)
        ),
        format!("Phone: {}", c.phone),
        format!("Email: {}", c.email),
    ];
    if let Some(address) = &c.address {
        lines.push(format!("Address: {address}"));
    }
    if !c.budget.is_unbounded() {
        lines.push(format!("Budget: {}", c.budget));
    }
    if !c.tags.is_empty() {
        lines.push(format!("Tags: {}", join_tags(&c.tags)));
    }
    lines.extend(linked_section("Buying", &detail.buying_properties, property_line));
    lines.extend(linked_section("Selling", &detail.selling_properties, property_line));
    lines.join("\n")
}

/// Multi-line card for `showp` and property changes.
pub fn format_property_detail(detail: &PropertyDetail) -> String {
    let p = &detail.property;
    let mut lines = vec![
        format!(
            "{} {} [{}]",
            render_id(p.id()),
            render_bold(p.address.as_str()),
            render_property_status(p.status)
        ),
        format!("Postal code: {}", p.postal_code),
        format!("Price: {}", p.price),
        format!("Floor area: {}", p.floor_area),
        format!("Bedrooms: {}  Bathrooms: {}", p.bedrooms, p.bathrooms),
    ];
    if !p.tags.is_empty() {
        lines.push(format!("Tags: {}", join_tags(&p.tags)));
    }
    lines.extend(linked_section("Buyers", &detail.buyer_contacts, contact_line));
    lines.extend(linked_section("Sellers", &detail.seller_contacts, contact_line));
    lines.join("\n")
}

fn paged_json<T: Serialize>(key: &str, page: &Paged<T>) -> Value {
    json!({
        key: page.items,
        "total": page.total,
        "offset": page.offset,
    })
}

/// Builds the JSON object printed for one command under `--json`.
pub fn result_json(result: &CommandResult) -> Value {
    let mut value = match &result.view {
        View::None => json!({}),
        View::Contacts(page) => paged_json("contacts", page),
        View::Properties(page) => paged_json("properties", page),
        View::Contact(detail) => json!({ "contact": detail }),
        View::Property(detail) => json!({ "property": detail }),
        View::Help(text) => json!({ "help": text }),
    };
    if let Value::Object(map) = &mut value {
        if !result.feedback.is_empty() {
            map.insert("message".to_string(), Value::String(result.feedback.clone()));
        }
    }
    value
}

/// Renders the view part of a result for a terminal.
pub fn format_view(view: &View) -> String {
    match view {
        View::None => String::new(),
        View::Contacts(page) => {
            let rows: Vec<Row> = page.items.iter().map(contact_row).collect();
            format_table(CONTACT_HEADERS, &rows)
        }
        View::Properties(page) => {
            let rows: Vec<Row> = page.items.iter().map(property_row).collect();
            format_table(PROPERTY_HEADERS, &rows)
        }
        View::Contact(detail) => format_contact_detail(detail),
        View::Property(detail) => format_property_detail(detail),
        View::Help(text) => text.clone(),
    }
}

/// Prints a command result in the format `ctx` asks for.
///
/// Long tables go through the pager in one-shot mode only; the shell keeps
/// everything inline.
pub fn print_result(ctx: &RuntimeContext, result: &CommandResult, use_pager: bool) {
    if ctx.json {
        output_json(&result_json(result));
        return;
    }

    if !ctx.quiet && !result.feedback.is_empty() {
        println!("{}", render_pass(&result.feedback));
    }
    let body = format_view(&result.view);
    if body.is_empty() {
        return;
    }
    let is_list = matches!(result.view, View::Contacts(_) | View::Properties(_));
    if use_pager && is_list {
        pager::page(&format!("{body}\n"));
    } else {
        println!("{body}");
    }
}

/// Prints an error to stderr: `Error: ...`, or `{"error": ...}` under `--json`.
pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let err_json = json!({
            "error": format!("{err:#}"),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{s}");
        }
    } else {
        eprintln!("{} {err:#}", render_fail("Error:"));
    }
}
