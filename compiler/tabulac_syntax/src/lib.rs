//! Contains the declaration tree the semantic pass consumes and the purely
//! syntactic predicates over it.
//!
//! The parser hands the semantic pass a [`tree::CompileUnit`]: a flat,
//! arena-backed forest of element declarations. Nothing in this crate
//! judges meaning; shape classification (what counts as a name, what a
//! setting entry's name is) lives in [`predicate`], and every judgement
//! about *legality* lives in the semantic crate.

use strum_macros::EnumIter;

pub mod predicate;
pub mod tree;

/// Represents the closed set of element kinds the language knows about.
///
/// The parser resolves every declaration keyword to one of these tags;
/// anything it doesn't recognize becomes [`ElementKind::Custom`] rather
/// than failing, so the semantic pass gets to see (and report) unknown
/// element types itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter,
)]
pub enum ElementKind {
    /// The `Project` declaration carrying schema-wide properties.
    Project,

    /// The `Table` declaration.
    Table,

    /// The `TableGroup` declaration bundling tables together.
    TableGroup,

    /// The `Enum` declaration.
    Enum,

    /// The `Ref` declaration relating columns of two tables.
    Ref,

    /// The free-standing or nested `Note` declaration.
    Note,

    /// The `Indexes` block inside a table.
    Indexes,

    /// Any declaration whose keyword names no known kind.
    Custom,
}

impl ElementKind {
    /// Resolves a declaration keyword to its kind, case-insensitively.
    ///
    /// Unrecognized keywords resolve to [`ElementKind::Custom`]; resolution
    /// is total.
    #[must_use]
    pub fn resolve(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "project" => Self::Project,
            "table" => Self::Table,
            "tablegroup" => Self::TableGroup,
            "enum" => Self::Enum,
            "ref" => Self::Ref,
            "note" => Self::Note,
            "indexes" => Self::Indexes,
            _ => Self::Custom,
        }
    }

    /// Returns the lowercase, human-readable name of the kind for use in
    /// diagnostic messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Table => "table",
            Self::TableGroup => "table group",
            Self::Enum => "enum",
            Self::Ref => "ref",
            Self::Note => "note",
            Self::Indexes => "indexes",
            Self::Custom => "custom element",
        }
    }
}

#[cfg(test)]
mod tests;
