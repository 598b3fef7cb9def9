//! Shared enums used by more than one crate.

use serde::Serialize;

/// Line terminator used when rendering generated sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineFeed => "\n",
            Self::CarriageReturnLineFeed => "\r\n",
        }
    }
}

/// Name the candidate selector looks for as written in source.
pub const DESCRIPTION_NAME: &str = "Description";

/// Class name the emitter looks for after attribute resolution.
pub const DESCRIPTION_ATTRIBUTE_CLASS: &str = "DescriptionAttribute";

/// How attribute names are compared against the description attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AttributeMatch {
    /// The selector requires the written name to be exactly `Description`
    /// and the emitter requires the resolved class `DescriptionAttribute`.
    #[default]
    Exact,
    /// Both sides strip qualifiers, `@` and the `Attribute` suffix, so
    /// `Description`, `DescriptionAttribute` and
    /// `System.ComponentModel.Description` all match.
    Normalized,
}

impl AttributeMatch {
    /// Whether an attribute written as `written` marks a member as described.
    #[must_use]
    pub fn matches_written_name(self, written: &str) -> bool {
        match self {
            Self::Exact => written == DESCRIPTION_NAME,
            Self::Normalized => normalize_attribute_name(written) == DESCRIPTION_NAME,
        }
    }

    /// Whether an attribute bound to `class_name` supplies a member's label.
    #[must_use]
    pub fn matches_class_name(self, class_name: &str) -> bool {
        match self {
            Self::Exact => class_name == DESCRIPTION_ATTRIBUTE_CLASS,
            Self::Normalized => normalize_attribute_name(class_name) == DESCRIPTION_NAME,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
        }
    }
}

/// `global::System.ComponentModel.@DescriptionAttribute` -> `Description`.
#[must_use]
pub fn normalize_attribute_name(name: &str) -> &str {
    let name = name.rsplit("::").next().unwrap_or(name);
    let name = name.split('<').next().unwrap_or(name);
    let name = name.rsplit('.').next().unwrap_or(name);
    let name = name.strip_prefix('@').unwrap_or(name);
    match name.strip_suffix("Attribute") {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}
