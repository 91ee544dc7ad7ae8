//! Custom organization attribute definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of an attribute name after trimming.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 100;

/// Value type of a custom attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    Text,
    Number,
    SingleSelect,
    MultiSelect,
}

impl AttributeType {
    /// All variants, in the order the settings form lists them.
    pub const ALL: [AttributeType; 4] = [
        AttributeType::Text,
        AttributeType::Number,
        AttributeType::SingleSelect,
        AttributeType::MultiSelect,
    ];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Text => "TEXT",
            AttributeType::Number => "NUMBER",
            AttributeType::SingleSelect => "SINGLE_SELECT",
            AttributeType::MultiSelect => "MULTI_SELECT",
        }
    }

    /// Human-readable label for select inputs.
    pub fn label(self) -> &'static str {
        match self {
            AttributeType::Text => "Text",
            AttributeType::Number => "Number",
            AttributeType::SingleSelect => "Single Select",
            AttributeType::MultiSelect => "Multi Select",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown attribute type: '{s}'")))
    }
}

/// Trim and validate an attribute name, returning the normalized form.
pub fn normalize_attribute_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Attribute name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_ATTRIBUTE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Attribute name must be at most {MAX_ATTRIBUTE_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Derive a slug from an attribute name.
///
/// Keeps Unicode letters and digits, lowercased, and collapses every
/// other run of characters into a single `-`. A name without any letter
/// or digit falls back to its code points in hex, so a non-empty name
/// never yields an empty slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        return name
            .trim()
            .chars()
            .map(|c| format!("{:x}", u32::from(c)))
            .collect::<Vec<_>>()
            .join("-");
    }
    slug
}

/// Normalize a raw attribute name and derive its slug.
pub fn attribute_name_and_slug(raw: &str) -> Result<(String, String), CoreError> {
    let name = normalize_attribute_name(raw)?;
    let slug = slugify(&name);
    Ok((name, slug))
}
