//! Contains the semantic pass of the Tabula schema language.
//!
//! The pass walks a parsed [`CompileUnit`], checks every element
//! declaration against the rule table of its kind ([`config`]) and
//! registers the symbols well-formed names introduce. Problems in the
//! source surface as [`Diagnostic`]s through the supplied
//! [`Handler`]; problems in a rule table itself are panics, never
//! diagnostics.

use std::collections::HashMap;

use getset::{CopyGetters, Getters};
use tabulac_arena::ID;
use tabulac_diagnostic::Diagnostic;
use tabulac_handler::Handler;
use tabulac_symbol::{Symbol, SymbolFactory, SymbolKind};
use tabulac_syntax::tree::CompileUnit;

use crate::{
    config::config_of, context::ContextStack, validator::ElementValidator,
};

pub mod config;
pub mod context;
pub mod validator;

/// Represents the outcome of [`analyze`]: the symbols discovered and the
/// per-root pipeline outcomes.
#[derive(Debug, Getters, CopyGetters)]
pub struct Analysis {
    /// Gets the symbols created during validation.
    #[get = "pub"]
    symbols: SymbolFactory,

    /// Gets the symbol standing for the implicit `public` schema root.
    #[get_copy = "pub"]
    public_schema: ID<Symbol>,

    root_results: Vec<bool>,
}

impl Analysis {
    /// Gets the pipeline outcome of each top-level element, in source
    /// order.
    #[must_use]
    pub fn root_results(&self) -> &[bool] { &self.root_results }

    /// Returns `true` if every top-level element came through its
    /// pipeline without a stopping failure.
    ///
    /// Note that a non-stopping failure still leaves this `true`; the
    /// handler the analysis ran with is the source of truth for whether
    /// the source was clean.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.root_results.iter().all(|ok| *ok) }

    /// Resolves a dotted path from the public root to a symbol of the
    /// given kind.
    #[must_use]
    pub fn resolve(
        &self,
        path: &[&str],
        kind: SymbolKind,
    ) -> Option<ID<Symbol>> {
        self.symbols.resolve_path(self.public_schema, path, kind)
    }
}

/// Validates every top-level element of the compile unit and registers
/// the symbols it declares.
///
/// Roots validate in source order against the configuration of their
/// kind tag; a root without a kind tag counts as failed without a
/// diagnostic, since the parser already reported the unreadable
/// declaration. The unit itself gets annotated along the way: `parent`
/// back-links and `symbol` assignments on declarations and registered
/// sub-field lines.
pub fn analyze(
    unit: &mut CompileUnit,
    handler: &dyn Handler<Diagnostic>,
) -> Analysis {
    let mut symbols = SymbolFactory::new();
    let public_schema = symbols.create(SymbolKind::Schema, None);

    let mut context = ContextStack::new();
    let mut global_kinds = HashMap::new();

    // The top level behaves as one scope, shared by all roots.
    let mut top_level_kinds = HashMap::new();

    let roots = unit.roots().to_vec();
    let mut root_results = Vec::with_capacity(roots.len());

    for root in roots {
        let Some(kind) = unit.elements()[root].kind() else {
            root_results.push(false);
            continue;
        };

        let mut validator = ElementValidator::new(
            unit,
            &mut symbols,
            public_schema,
            &mut context,
            &mut global_kinds,
            &mut top_level_kinds,
            handler,
            config_of(kind),
        );

        root_results.push(validator.validate(root));
    }

    assert!(
        context.is_empty(),
        "the context stack must balance after validation"
    );

    Analysis { symbols, public_schema, root_results }
}
