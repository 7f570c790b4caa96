//! Ayu color theme and styling functions for estatebook output.
//!
//! Uses the Ayu Dark palette. Only states that need attention get color:
//! pending listings are highlighted, sold listings and inactive contacts are
//! dimmed, and ids are accented so they are easy to copy into commands.

use estate_core::enums::{ContactStatus, PropertyStatus};
use estate_core::ids::Uuid;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// Ayu Dark palette
const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff

/// Light horizontal rule used between detail sections.
pub const SEPARATOR_LIGHT: &str = "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}";

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase, bold and accented.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_separator() -> String {
    render_muted(SEPARATOR_LIGHT)
}

/// Renders an entity id such as `#3`.
pub fn render_id(id: Uuid) -> String {
    render_accent(&id.to_string())
}

/// Active contacts are green; inactive ones are dimmed.
pub fn render_contact_status(status: ContactStatus) -> String {
    match status {
        ContactStatus::Active => render_pass(status.as_str()),
        ContactStatus::Inactive => render_muted(status.as_str()),
    }
}

pub fn render_property_status(status: PropertyStatus) -> String {
    match status {
        PropertyStatus::Available => render_pass(status.as_str()),
        PropertyStatus::Pending => render_warn(status.as_str()),
        PropertyStatus::Sold => render_muted(status.as_str()),
    }
}

/// Renders a whole table row dimmed, for sold listings and inactive contacts.
pub fn render_dimmed_line(line: &str) -> String {
    render_muted(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::set_color_override;
    use pretty_assertions::assert_eq;

    #[test]
    fn styles_keep_the_text() {
        assert!(render_property_status(PropertyStatus::Pending).contains("pending"));
        assert!(render_contact_status(ContactStatus::Inactive).contains("inactive"));
        assert!(render_id(Uuid::contact(12)).contains("#12"));
        assert!(render_category("buying").contains("BUYING"));
    }

    #[test]
    fn color_can_be_forced() {
        set_color_override(Some(false));
        assert_eq!(render_property_status(PropertyStatus::Sold), "sold");
        set_color_override(Some(true));
        assert!(render_property_status(PropertyStatus::Sold).contains("\u{1b}["));
        set_color_override(None);
    }
}
