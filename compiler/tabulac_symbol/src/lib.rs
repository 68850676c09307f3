//! Contains the definition of [`Symbol`], [`SymbolTable`] and
//! [`SymbolFactory`], the compile unit's registry of every named entity the
//! validation pass discovers.
//!
//! The registry is a flat [`Arena`] of [`Symbol`]s wired into a tree:
//! namespace-like symbols own a [`SymbolTable`] mapping `(name, kind)` keys
//! to the [`ID`]s of their members. Keying by kind as well as name lets a
//! table and an enum legally share a name in the same schema.

use std::collections::HashMap;

use derive_new::new;
use getset::CopyGetters;
use strum_macros::EnumIter;
use tabulac_arena::{Arena, ID};
use tabulac_source_file::Span;

/// Represents the kind of entity a [`Symbol`] stands for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter,
)]
pub enum SymbolKind {
    /// A namespace segment of a qualified name, materialized on demand.
    Schema,

    /// A `Project` declaration.
    Project,

    /// A `Table` declaration.
    Table,

    /// A `TableGroup` declaration.
    TableGroup,

    /// An `Enum` declaration.
    Enum,

    /// A `Ref` declaration.
    Ref,

    /// A `Note` declaration.
    Note,

    /// An `Indexes` block.
    Indexes,

    /// A custom element declaration.
    Custom,

    /// A column defined inside a table body.
    Column,

    /// A member defined inside an enum body.
    EnumMember,

    /// A table listed inside a table group body.
    TableGroupMember,
}

impl SymbolKind {
    /// Returns `true` if symbols of this kind own a [`SymbolTable`] of
    /// members.
    #[must_use]
    pub const fn owns_members(self) -> bool {
        matches!(
            self,
            Self::Schema | Self::Table | Self::Enum | Self::TableGroup
        )
    }

    /// Returns the lowercase, human-readable name of the kind for use in
    /// diagnostic messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Project => "project",
            Self::Table => "table",
            Self::TableGroup => "table group",
            Self::Enum => "enum",
            Self::Ref => "ref",
            Self::Note => "note",
            Self::Indexes => "indexes",
            Self::Custom => "element",
            Self::Column => "column",
            Self::EnumMember => "enum member",
            Self::TableGroupMember => "table group member",
        }
    }
}

/// Represents the `(name, kind)` pair under which a member is registered in
/// a [`SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct SymbolKey {
    /// The plain (unqualified) name of the member.
    pub name: String,

    /// The kind of the member.
    pub kind: SymbolKind,
}

/// Represents the member index owned by a namespace-like [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTable {
    member_ids_by_key: HashMap<SymbolKey, ID<Symbol>>,
}

impl SymbolTable {
    /// Creates a new empty [`SymbolTable`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the number of members registered in the table.
    #[must_use]
    pub fn len(&self) -> usize { self.member_ids_by_key.len() }

    /// Returns `true` if no member has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.member_ids_by_key.is_empty() }

    /// Looks up the member registered under the given key.
    #[must_use]
    pub fn get(&self, key: &SymbolKey) -> Option<ID<Symbol>> {
        self.member_ids_by_key.get(key).copied()
    }

    /// Registers a member under the given key.
    ///
    /// # Errors
    ///
    /// Returns `Err` with the [`ID`] of the existing member if the key is
    /// already occupied; the table is left unchanged.
    pub fn insert(
        &mut self,
        key: SymbolKey,
        member: ID<Symbol>,
    ) -> Result<(), ID<Symbol>> {
        match self.member_ids_by_key.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                Err(*entry.get())
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(member);
                Ok(())
            }
        }
    }

    /// Returns an iterator over the `(key, member)` pairs of the table.
    ///
    /// The order of the pairs is **not** maintained.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolKey, ID<Symbol>)> {
        self.member_ids_by_key.iter().map(|(key, id)| (key, *id))
    }
}

/// Represents a named entity discovered during validation.
///
/// A symbol doesn't store its own name: names live in the owning
/// [`SymbolTable`]'s keys, which is what lets an alias and a primary name
/// point at the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, CopyGetters)]
pub struct Symbol {
    /// Gets the kind of entity this symbol stands for.
    #[get_copy = "pub"]
    kind: SymbolKind,

    /// Gets the span of the defining occurrence, if the symbol was created
    /// from source code rather than synthesized.
    #[get_copy = "pub"]
    origin: Option<Span>,

    members: Option<SymbolTable>,
}

impl Symbol {
    /// Gets the member table of this symbol, if its kind owns one.
    #[must_use]
    pub const fn members(&self) -> Option<&SymbolTable> {
        self.members.as_ref()
    }
}

/// Creates and stores every [`Symbol`] of a compile unit.
///
/// All symbols live in one flat arena; the namespace tree exists only
/// through the [`SymbolTable`]s of member-owning symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolFactory {
    symbols: Arena<Symbol>,
}

impl SymbolFactory {
    /// Creates a new empty [`SymbolFactory`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the number of symbols created so far.
    #[must_use]
    pub fn len(&self) -> usize { self.symbols.len() }

    /// Returns `true` if no symbol has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.symbols.is_empty() }

    /// Creates a fresh symbol of the given kind.
    ///
    /// Kinds that own members start with an empty [`SymbolTable`]; the rest
    /// carry none.
    pub fn create(
        &mut self,
        kind: SymbolKind,
        origin: Option<Span>,
    ) -> ID<Symbol> {
        let members = kind.owns_members().then(SymbolTable::new);

        self.symbols.insert(Symbol { kind, origin, members })
    }

    /// Returns a reference to the symbol with the given [`ID`].
    #[must_use]
    pub fn get(&self, id: ID<Symbol>) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Looks up a member of `owner` registered under the given key.
    ///
    /// Returns [`None`] if `owner` owns no member table or the key is
    /// unoccupied.
    #[must_use]
    pub fn member_of(
        &self,
        owner: ID<Symbol>,
        key: &SymbolKey,
    ) -> Option<ID<Symbol>> {
        self.symbols[owner].members()?.get(key)
    }

    /// Registers `member` in the member table of `owner`.
    ///
    /// # Panics
    ///
    /// Panics if `owner`'s kind doesn't own members or if the key is
    /// already occupied; callers look the key up first and report the
    /// clash as a diagnostic.
    pub fn add_member(
        &mut self,
        owner: ID<Symbol>,
        key: SymbolKey,
        member: ID<Symbol>,
    ) {
        let owner_kind = self.symbols[owner].kind;
        let Some(table) = self.symbols[owner].members.as_mut() else {
            panic!("a {} symbol cannot own members", owner_kind.describe())
        };

        assert!(
            table.insert(key, member).is_ok(),
            "duplication detected, but it should've already been checked"
        );
    }

    /// Walks a dotted path of namespace segments from `root` down to a leaf
    /// of the given kind.
    ///
    /// Every segment but the last is looked up as a [`SymbolKind::Schema`];
    /// the last is looked up as `kind`.
    #[must_use]
    pub fn resolve_path(
        &self,
        root: ID<Symbol>,
        path: &[&str],
        kind: SymbolKind,
    ) -> Option<ID<Symbol>> {
        let (leaf, namespaces) = path.split_last()?;

        let mut current = root;
        for segment in namespaces {
            current = self.member_of(
                current,
                &SymbolKey::new((*segment).to_string(), SymbolKind::Schema),
            )?;
        }

        self.member_of(current, &SymbolKey::new((*leaf).to_string(), kind))
    }
}

impl std::ops::Index<ID<Symbol>> for SymbolFactory {
    type Output = Symbol;

    fn index(&self, id: ID<Symbol>) -> &Self::Output { &self.symbols[id] }
}

#[cfg(test)]
mod tests;
