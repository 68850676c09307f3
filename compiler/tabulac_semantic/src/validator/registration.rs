//! Contains the symbol-registration half of the [`ElementValidator`]:
//! qualified element names, aliases and sub-field names all land in the
//! symbol tables here, after the shape checks accepted them.

use tabulac_arena::ID;
use tabulac_diagnostic::Diagnostic;
use tabulac_source_file::SourceElement;
use tabulac_symbol::{Symbol, SymbolKey, SymbolKind};
use tabulac_syntax::{
    predicate,
    tree::{ElementDeclaration, Expression, FunctionApplication},
};

use super::{active_code, ElementValidator};
use crate::config::SubFieldRule;

impl ElementValidator<'_> {
    /// Registers the element's symbol under its (possibly qualified) name.
    ///
    /// A leading `public` segment is stripped: `public.users` and `users`
    /// are the same table. The remaining namespace segments materialize
    /// (or reuse) one `Schema` symbol each under the public root; the
    /// leaf inserts under the key `(leaf, symbol kind)`. On a duplicate
    /// the element adopts the already-registered symbol, so later passes
    /// still find a symbol on the node.
    pub(super) fn register_name(
        &mut self,
        element: ID<ElementDeclaration>,
        name: &Expression,
    ) -> bool {
        let Some(segments) = predicate::destructure_name(name) else {
            panic!("a checked name should destructure cleanly")
        };

        let path = match segments.split_first() {
            Some((first, rest)) if *first == "public" && !rest.is_empty() => {
                rest
            }
            _ => &segments[..],
        };

        let (leaf, namespaces) = path
            .split_last()
            .expect("a checked name always has a leaf segment");
        assert!(!leaf.is_empty(), "a checked name can't have an empty leaf");

        let mut owner = self.public_schema;
        for namespace in namespaces {
            owner = self.ensure_schema(owner, namespace);
        }

        let key = SymbolKey::new((*leaf).to_owned(), self.config.symbol_kind);

        if let Some(existing) = self.symbols.member_of(owner, &key) {
            let mut diagnostic = Diagnostic::error(
                active_code(self.config.name.duplicate_error_code),
                name.span(),
                format!(
                    "{} name '{leaf}' is already defined",
                    self.config.symbol_kind.describe()
                ),
            );

            if let Some(first) = self.symbols[existing].origin() {
                diagnostic = diagnostic.with_related(first, "first defined here");
            }

            self.handler.receive(diagnostic);
            self.unit.elements_mut()[element].set_symbol(existing);

            return false;
        }

        let symbol = self.unit.elements()[element]
            .symbol()
            .expect("the symbol is assigned at the start of the name stage");
        self.symbols.add_member(owner, key, symbol);

        true
    }

    /// Finds or creates the `Schema` symbol for one namespace segment
    /// under `owner`.
    fn ensure_schema(&mut self, owner: ID<Symbol>, segment: &str) -> ID<Symbol> {
        let key = SymbolKey::new(segment.to_owned(), SymbolKind::Schema);

        if let Some(existing) = self.symbols.member_of(owner, &key) {
            return existing;
        }

        let schema = self.symbols.create(SymbolKind::Schema, None);
        self.symbols.add_member(owner, key, schema);

        schema
    }

    /// Registers the element's symbol a second time under its alias.
    ///
    /// Aliases are unqualified shorthand, so they always land in the
    /// public root table, whatever schema the element's name went into.
    pub(super) fn register_alias(
        &mut self,
        element: ID<ElementDeclaration>,
        alias: &Expression,
    ) -> bool {
        let name = predicate::extract_variable_name(alias)
            .expect("a checked alias is a plain identifier");
        let key = SymbolKey::new(name.to_owned(), self.config.symbol_kind);

        if let Some(existing) = self.symbols.member_of(self.public_schema, &key)
        {
            let mut diagnostic = Diagnostic::error(
                active_code(self.config.alias.duplicate_error_code),
                alias.span(),
                format!(
                    "alias '{name}' collides with an existing {} name",
                    self.config.symbol_kind.describe()
                ),
            );

            if let Some(first) = self.symbols[existing].origin() {
                diagnostic = diagnostic.with_related(first, "first defined here");
            }

            self.handler.receive(diagnostic);

            return false;
        }

        let symbol = self.unit.elements()[element]
            .symbol()
            .expect("the symbol is assigned at the start of the name stage");
        self.symbols.add_member(self.public_schema, key, symbol);

        true
    }

    /// Registers one applied body line (a column, an enum member, a table
    /// group entry) in the owning element's member table.
    ///
    /// A line whose name expression isn't a plain identifier registers
    /// nothing and counts as fine here; the positional validators already
    /// judged the shape. On a duplicate the line stays unsymbolized.
    pub(super) fn register_sub_field(
        &mut self,
        owner: ID<ElementDeclaration>,
        line: ID<FunctionApplication>,
        name: &Expression,
        rule: &SubFieldRule,
    ) -> bool {
        let Some(text) = predicate::extract_variable_name(name) else {
            return true;
        };

        let kind = rule
            .register_kind
            .expect("a registering sub-field rule names its symbol kind");
        let owner_symbol = self.unit.elements()[owner]
            .symbol()
            .expect("the owner got its symbol during the name stage");
        let key = SymbolKey::new(text.to_owned(), kind);

        if let Some(existing) = self.symbols.member_of(owner_symbol, &key) {
            let mut diagnostic = Diagnostic::error(
                active_code(rule.duplicate_error_code),
                name.span(),
                format!("{} '{text}' is already defined", kind.describe()),
            );

            if let Some(first) = self.symbols[existing].origin() {
                diagnostic = diagnostic.with_related(first, "first defined here");
            }

            self.handler.receive(diagnostic);

            return false;
        }

        let symbol = self.symbols.create(kind, Some(name.span()));
        self.symbols.add_member(owner_symbol, key, symbol);
        self.unit.applications_mut()[line].set_symbol(symbol);

        true
    }
}
