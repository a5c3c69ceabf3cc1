//! Selector parsing

use std::fmt;
use std::str::FromStr;

use crate::{SelectorError, CLASS_WEIGHT, ID_WEIGHT};

/// Parsed selector
///
/// Qualifier tokens keep their sigil as written (`"#first"`, `".radv"`).
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    raw: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    weight: u32,
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl Selector {
    /// Parse `raw` against `tag? ([#.] ident)*`.
    ///
    /// The empty string is valid and matches every element. When several
    /// `#id` qualifiers are present only the first is kept.
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let tag_end = raw.find(|c: char| !is_ident_char(c)).unwrap_or(raw.len());
        let tag = (tag_end > 0).then(|| raw[..tag_end].to_string());

        let mut id = None;
        let mut classes = Vec::new();
        let mut rest = &raw[tag_end..];
        let mut position = tag_end;

        while let Some(sigil) = rest.chars().next() {
            if sigil != '#' && sigil != '.' {
                return Err(SelectorError::InvalidCharacter {
                    selector: raw.to_string(),
                    position,
                    found: sigil,
                });
            }
            let name_len = rest[1..].find(|c: char| !is_ident_char(c)).unwrap_or(rest.len() - 1);
            if name_len == 0 {
                return Err(SelectorError::EmptyQualifier {
                    selector: raw.to_string(),
                    position,
                });
            }

            let token = &rest[..=name_len];
            if sigil == '#' {
                id.get_or_insert_with(|| token.to_string());
            } else {
                classes.push(token.to_string());
            }
            rest = &rest[token.len()..];
            position += token.len();
        }

        let mut weight = 0;
        if id.is_some() {
            weight += ID_WEIGHT;
        }
        weight += CLASS_WEIGHT * classes.len() as u32;
        weight += tag.as_ref().map_or(0, |t| t.chars().count() as u32);

        Ok(Self {
            raw: raw.to_string(),
            tag,
            id,
            classes,
            weight,
        })
    }

    /// The string this selector was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tag filter
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Id filter as written, including `#`
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class filters as written, including `.`, in encounter order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Specificity: id 1000, each class 10, plus the tag length
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// True when no filter is set
    pub fn is_universal(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    pub(crate) fn id_name(&self) -> Option<&str> {
        self.id.as_deref().map(|t| &t[1..])
    }

    pub(crate) fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|t| &t[1..])
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
