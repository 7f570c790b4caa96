//! Prefix definitions and the `prefix/value` argument tokenizer.
//!
//! Arguments such as `n/John Doe p/98765432 t/vip t/friend` are split at
//! every recognised prefix. A prefix only counts when it starts a
//! whitespace-separated token, so `e/john@a.com` inside a value or an
//! unknown `x/` stays part of the surrounding text.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ParseError, Result};

/// An argument prefix such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const NAME: Prefix = Prefix("n/");
pub const PHONE: Prefix = Prefix("p/");
pub const EMAIL: Prefix = Prefix("e/");
pub const ADDRESS: Prefix = Prefix("a/");
pub const POSTAL_CODE: Prefix = Prefix("pc/");
pub const FLOOR_AREA: Prefix = Prefix("fa/");
pub const BEDROOMS: Prefix = Prefix("bed/");
pub const BATHROOMS: Prefix = Prefix("bath/");
pub const PRICE: Prefix = Prefix("pr/");
pub const BUDGET_MIN: Prefix = Prefix("bmin/");
pub const BUDGET_MAX: Prefix = Prefix("bmax/");
pub const PRICE_MIN: Prefix = Prefix("prmin/");
pub const PRICE_MAX: Prefix = Prefix("prmax/");
pub const STATUS: Prefix = Prefix("s/");
pub const TAG: Prefix = Prefix("t/");
pub const CONTACT: Prefix = Prefix("c/");
/// Property id in `link`/`unlink` (same text as [`PHONE`]).
pub const PROPERTY: Prefix = Prefix("p/");
pub const ROLE: Prefix = Prefix("r/");
pub const LIMIT: Prefix = Prefix("limit/");
pub const OFFSET: Prefix = Prefix("offset/");

/// Values found for each prefix, plus the preamble before the first prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if `prefix` appeared at least once.
    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Returns `true` if no prefix appeared.
    pub fn has_no_prefixes(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails if any of `prefixes` appeared more than once.
    pub fn verify_no_duplicates(&self, prefixes: &[Prefix]) -> Result<()> {
        let repeated: Vec<&'static str> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(|p| p.as_str())
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(repeated))
        }
    }
}

/// Splits `args` at every occurrence of one of `prefixes`.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    // Longest first so that `prmin/` is never mistaken for a shorter prefix.
    let mut ordered: Vec<Prefix> = prefixes.to_vec();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.as_str().len()));

    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    let mut prev_is_space = true;
    for (i, ch) in args.char_indices() {
        if prev_is_space && !ch.is_whitespace() {
            let rest = &args[i..];
            if let Some(prefix) = ordered.iter().find(|p| rest.starts_with(p.as_str())) {
                positions.push((i, *prefix));
            }
        }
        prev_is_space = ch.is_whitespace();
    }

    let preamble_end = positions.first().map_or(args.len(), |(i, _)| *i);
    let mut map = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_owned(),
        values: HashMap::new(),
    };
    for (n, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions.get(n + 1).map_or(args.len(), |(i, _)| *i);
        map.values
            .entry(*prefix)
            .or_default()
            .push(args[value_start..value_end].trim().to_owned());
    }
    map
}
