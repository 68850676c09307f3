//! Contains the [`ElementValidator`], the pipeline that checks one element
//! declaration against the [`ValidatorConfig`] of its kind and registers
//! the symbols well-formed names introduce.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use tabulac_arena::ID;
use tabulac_diagnostic::{Diagnostic, ErrorCode};
use tabulac_handler::Handler;
use tabulac_source_file::{SourceElement, Span};
use tabulac_symbol::{Symbol, SymbolFactory};
use tabulac_syntax::{
    predicate,
    tree::{
        BodyEntry, CompileUnit, ElementBody, ElementDeclaration, Expression,
        FunctionApplication, SettingList,
    },
    ElementKind,
};

use crate::{
    config::{self, SettingValidity, SettingsRule, ValidatorConfig},
    context::ContextStack,
};

mod registration;

/// Decides whether the pipeline continues after a rule group finished.
///
/// The two outcomes are deliberately separate: `passed` says whether the
/// group found problems, `stop_on_error` says whether found problems
/// abort the remaining groups.
const fn proceed(passed: bool, stop_on_error: bool) -> bool {
    passed || !stop_on_error
}

/// Resolves the error code a rule reports with.
///
/// A rule that can fire must carry a code; a missing one is a defect in
/// the configuration, not in the validated source, so it panics instead
/// of producing a diagnostic.
fn active_code(code: Option<ErrorCode>) -> ErrorCode {
    code.expect("an active rule must carry the error code it reports with")
}

/// Validates one element declaration, walking its body recursively.
///
/// The validator borrows every piece of shared state of the pass: the
/// compile unit being annotated, the symbol factory, the kind stack, the
/// per-unit and per-scope kind sets and the diagnostic handler. Entering
/// a nested element reborrows the same state with the configuration of
/// the nested kind and a kind set local to the enclosing body.
pub struct ElementValidator<'a> {
    unit: &'a mut CompileUnit,
    symbols: &'a mut SymbolFactory,
    public_schema: ID<Symbol>,
    context: &'a mut ContextStack,
    global_kinds: &'a mut HashMap<ElementKind, Span>,
    local_kinds: &'a mut HashMap<ElementKind, Span>,
    handler: &'a dyn Handler<Diagnostic>,
    config: &'static ValidatorConfig,
}

impl std::fmt::Debug for ElementValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementValidator")
            .field("kind", &self.config.kind)
            .field("depth", &self.context.depth())
            .finish_non_exhaustive()
    }
}

impl<'a> ElementValidator<'a> {
    /// Creates a validator for elements of the kind `config` describes.
    ///
    /// `local_kinds` is the kind set of the scope the validated element
    /// sits in; the driver passes the top-level set, nested dispatch the
    /// set of the enclosing body.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        unit: &'a mut CompileUnit,
        symbols: &'a mut SymbolFactory,
        public_schema: ID<Symbol>,
        context: &'a mut ContextStack,
        global_kinds: &'a mut HashMap<ElementKind, Span>,
        local_kinds: &'a mut HashMap<ElementKind, Span>,
        handler: &'a dyn Handler<Diagnostic>,
        config: &'static ValidatorConfig,
    ) -> Self {
        Self {
            unit,
            symbols,
            public_schema,
            context,
            global_kinds,
            local_kinds,
            handler,
            config,
        }
    }

    /// Runs the whole pipeline over the given element declaration.
    ///
    /// Diagnostics go to the handler; the returned flag is the
    /// conjunction of the continue-decisions of the rule groups, so a
    /// group that found problems but doesn't stop still yields `true`
    /// here. The handler is the source of truth for whether the source
    /// was clean.
    #[must_use]
    pub fn validate(&mut self, element: ID<ElementDeclaration>) -> bool {
        self.context.push(self.config.kind);

        let passed = self.check_context(element)
            && self.check_uniqueness(element)
            && self.check_name(element)
            && self.check_alias(element)
            && self.check_setting_list(element)
            && self.check_body(element);

        self.context.pop();

        passed
    }

    fn check_context(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.context;
        let kind = self.config.kind;
        let parent = self.context.parent();

        if config::can_contain(parent, kind) {
            return true;
        }

        let node = &self.unit.elements()[element];
        let message = if kind == ElementKind::Custom {
            format!("unknown element type '{}'", node.keyword().value())
        } else if let Some(parent) = parent {
            format!(
                "'{}' can't be declared inside '{}'",
                kind.describe(),
                parent.describe()
            )
        } else {
            format!(
                "'{}' can't be declared at the top level of a schema",
                kind.describe()
            )
        };

        self.handler.receive(Diagnostic::error(
            active_code(rule.error_code),
            node.span(),
            message,
        ));

        proceed(false, rule.stop_on_error)
    }

    fn check_uniqueness(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.unique;
        let kind = self.config.kind;
        let keyword_span = self.unit.elements()[element].keyword().span();
        let mut passed = true;

        if rule.globally_unique {
            match self.global_kinds.entry(kind) {
                Entry::Occupied(entry) => {
                    passed = false;
                    self.handler.receive(
                        Diagnostic::error(
                            active_code(rule.global_error_code),
                            keyword_span,
                            format!(
                                "a {} is already defined in this file",
                                kind.describe()
                            ),
                        )
                        .with_related(*entry.get(), "first defined here"),
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(keyword_span);
                }
            }
        }

        if rule.locally_unique {
            match self.local_kinds.entry(kind) {
                Entry::Occupied(entry) => {
                    passed = false;
                    self.handler.receive(
                        Diagnostic::error(
                            active_code(rule.local_error_code),
                            keyword_span,
                            format!(
                                "a {} is already defined in this scope",
                                kind.describe()
                            ),
                        )
                        .with_related(*entry.get(), "first defined here"),
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(keyword_span);
                }
            }
        }

        proceed(passed, rule.stop_on_error)
    }

    /// Checks the name of the element and, when the configuration asks for
    /// it, registers the element's symbol under that name.
    ///
    /// Every element gets a symbol at the top of this stage, before any
    /// sub-check, so later stages (and sub-field registration) can rely
    /// on one being present even when the name turned out broken.
    fn check_name(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.name;
        let kind = self.config.kind;
        let node = &self.unit.elements()[element];
        let name = node.name().clone();
        let keyword_span = node.keyword().span();
        let origin =
            name.as_ref().map_or_else(|| node.span(), SourceElement::span);

        let symbol =
            self.symbols.create(self.config.symbol_kind, Some(origin));
        self.unit.elements_mut()[element].set_symbol(symbol);

        let passed = 'name: {
            let Some(name) = name else {
                if rule.presence.is_required() {
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.missing_error_code),
                        keyword_span,
                        format!(
                            "missing a name for this {}",
                            kind.describe()
                        ),
                    ));

                    break 'name false;
                }

                break 'name true;
            };

            if !predicate::is_valid_name(&name) {
                self.handler.receive(Diagnostic::error(
                    active_code(rule.invalid_error_code),
                    name.span(),
                    format!("invalid name for this {}", kind.describe()),
                ));

                break 'name false;
            }

            if !rule.presence.is_allowed() {
                self.handler.receive(Diagnostic::error(
                    active_code(rule.unexpected_error_code),
                    name.span(),
                    format!("'{}' doesn't take a name", kind.describe()),
                ));

                break 'name false;
            }

            if predicate::is_qualified(&name) && !rule.allow_qualified {
                self.handler.receive(
                    Diagnostic::error(
                        active_code(rule.qualified_error_code),
                        name.span(),
                        format!(
                            "the name of a {} can't be qualified",
                            kind.describe()
                        ),
                    )
                    .with_help("only a simple identifier is allowed here"),
                );

                break 'name false;
            }

            if rule.should_register {
                break 'name self.register_name(element, &name);
            }

            true
        };

        proceed(passed, rule.stop_on_error)
    }

    fn check_alias(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.alias;
        let kind = self.config.kind;
        let node = &self.unit.elements()[element];
        let alias = node.alias().clone();
        let keyword_span = node.keyword().span();

        let passed = 'alias: {
            let Some(alias) = alias else {
                if rule.presence.is_required() {
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.missing_error_code),
                        keyword_span,
                        format!(
                            "missing an alias for this {}",
                            kind.describe()
                        ),
                    ));

                    break 'alias false;
                }

                break 'alias true;
            };

            if !predicate::is_valid_alias(&alias) {
                self.handler.receive(Diagnostic::error(
                    active_code(rule.invalid_error_code),
                    alias.span(),
                    "an alias must be a plain identifier",
                ));

                break 'alias false;
            }

            if !rule.presence.is_allowed() {
                self.handler.receive(Diagnostic::error(
                    active_code(rule.unexpected_error_code),
                    alias.span(),
                    format!("'{}' doesn't take an alias", kind.describe()),
                ));

                break 'alias false;
            }

            // An alias is a second key for the symbol the name registered;
            // without name registration there is nothing for it to point
            // at.
            if rule.should_register && self.config.name.should_register {
                break 'alias self.register_alias(element, &alias);
            }

            true
        };

        proceed(passed, rule.stop_on_error)
    }

    fn check_setting_list(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.settings;
        let kind = self.config.kind;
        let node = &self.unit.elements()[element];
        let settings = node.settings().clone();
        let keyword_span = node.keyword().span();

        let passed = match settings {
            None => {
                if rule.presence.is_required() {
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.missing_error_code),
                        keyword_span,
                        format!(
                            "missing a setting list on this {}",
                            kind.describe()
                        ),
                    ));

                    false
                } else {
                    true
                }
            }
            Some(list) if !rule.presence.is_allowed() => {
                self.handler.receive(Diagnostic::error(
                    active_code(rule.unexpected_error_code),
                    list.span(),
                    format!(
                        "'{}' doesn't take a setting list",
                        kind.describe()
                    ),
                ));

                false
            }
            Some(list) => {
                self.check_settings_content(&list, &rule, kind.describe())
            }
        };

        proceed(passed, rule.stop_on_error)
    }

    /// Judges the entries of one setting list: value validity first, then
    /// illegal repetition. An entry whose name can't be extracted is
    /// skipped; the parser already reported the malformed entry.
    fn check_settings_content(
        &mut self,
        list: &SettingList,
        rule: &SettingsRule,
        owner: &'static str,
    ) -> bool {
        let mut passed = true;
        let mut seen = HashSet::new();

        for setting in list.settings() {
            let Some(name) = predicate::extract_setting_name(setting.name())
            else {
                continue;
            };

            match (rule.validator)(&name, setting.value().as_ref()) {
                SettingValidity::Valid => {}
                SettingValidity::Invalid => {
                    passed = false;
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.invalid_value_error_code),
                        setting
                            .value()
                            .as_ref()
                            .map_or_else(|| setting.span(), SourceElement::span),
                        format!("invalid value for setting '{name}'"),
                    ));
                }
                SettingValidity::Unknown => {
                    passed = false;
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.unknown_error_code),
                        setting.name().span(),
                        format!("unknown setting '{name}' on this {owner}"),
                    ));
                }
            }

            if !seen.insert(name.clone()) && !(rule.allow_duplicates)(&name) {
                passed = false;
                self.handler.receive(Diagnostic::error(
                    active_code(rule.duplicate_error_code),
                    setting.span(),
                    format!("setting '{name}' is given more than once"),
                ));
            }
        }

        passed
    }

    /// Checks the body form and, when the form is acceptable, its content.
    ///
    /// A declaration with no body at all fails the stage outright without
    /// a diagnostic (the parser already reported the malformed
    /// declaration), and that failure propagates regardless of the
    /// rule's continuation policy.
    fn check_body(&mut self, element: ID<ElementDeclaration>) -> bool {
        let rule = self.config.body;
        let kind = self.config.kind;

        let Some(body) = self.unit.elements()[element].body().clone() else {
            return false;
        };

        let mut form_ok = true;

        if body.as_simple().is_some() && !rule.allow_simple {
            form_ok = false;
            self.handler.receive(Diagnostic::error(
                active_code(rule.simple_error_code),
                body.span(),
                format!(
                    "'{}' takes a braced body, not a 'key: value' entry",
                    kind.describe()
                ),
            ));
        }

        if body.as_complex().is_some() && !rule.allow_complex {
            form_ok = false;
            self.handler.receive(Diagnostic::error(
                active_code(rule.complex_error_code),
                body.span(),
                format!(
                    "'{}' takes a single 'key: value' body, not a braced \
                     block",
                    kind.describe()
                ),
            ));
        }

        let passed =
            if form_ok { self.check_body_content(element, &body) } else { false };

        proceed(passed, rule.stop_on_error)
    }

    /// Dispatches every entry of the body: nested declarations restart the
    /// pipeline under this element's scope, applied lines go through the
    /// sub-field rule. All entries are visited; one bad entry doesn't
    /// shadow its siblings.
    ///
    /// A simple body holds exactly one applied line; a declaration in that
    /// position has the wrong shape outright and is never entered.
    fn check_body_content(
        &mut self,
        element: ID<ElementDeclaration>,
        body: &ElementBody,
    ) -> bool {
        match body {
            ElementBody::Simple(simple) => match simple.entry() {
                BodyEntry::Application(line) => {
                    self.check_sub_field(element, line, 0)
                }
                BodyEntry::Element(_) => {
                    self.handler.receive(Diagnostic::error(
                        active_code(self.config.sub_field.arity_error_code),
                        simple.span(),
                        self.config.sub_field.arity_message,
                    ));

                    false
                }
            },
            ElementBody::Complex(complex) => {
                // Fresh per body: local uniqueness resets in every scope.
                let mut locals = HashMap::new();
                let mut passed = true;

                // Applied lines alone advance the position counter.
                let mut index = 0;

                for entry in complex.entries() {
                    let entry_ok = match *entry {
                        BodyEntry::Element(child) => {
                            self.validate_nested(element, child, &mut locals)
                        }
                        BodyEntry::Application(line) => {
                            let line_ok =
                                self.check_sub_field(element, line, index);
                            index += 1;

                            line_ok
                        }
                    };

                    passed &= entry_ok;
                }

                passed
            }
        }
    }

    /// Validates a nested element declaration under this element's scope.
    ///
    /// A nested declaration without a kind tag counts as failed without a
    /// diagnostic; the parser already reported it, and recursing into a
    /// kindless node would validate it against nothing.
    fn validate_nested(
        &mut self,
        parent: ID<ElementDeclaration>,
        child: ID<ElementDeclaration>,
        locals: &mut HashMap<ElementKind, Span>,
    ) -> bool {
        self.unit.elements_mut()[child].set_parent(parent);

        let Some(kind) = self.unit.elements()[child].kind() else {
            return false;
        };

        nested_validator(self, locals, config::config_of(kind)).validate(child)
    }

    /// Judges one applied expression line of the body.
    ///
    /// The line's expressions are its callee followed by its arguments; a
    /// trailing setting list is split off and judged first, then the
    /// remaining expressions must match the positional validators
    /// one-to-one. Each validator also receives `index`, the line's
    /// zero-based position among the applied lines of its body.
    /// Registration only happens when every positional check passed.
    fn check_sub_field(
        &mut self,
        owner: ID<ElementDeclaration>,
        line: ID<FunctionApplication>,
        index: usize,
    ) -> bool {
        let rule = self.config.sub_field;
        let application = &self.unit.applications()[line];
        let span = application.span();

        let mut parts: Vec<Expression> =
            Vec::with_capacity(application.args().len() + 1);
        parts.push(application.callee().clone());
        parts.extend(application.args().iter().cloned());

        let mut passed = true;

        let trailing = if matches!(parts.last(), Some(Expression::SettingList(_)))
        {
            parts.pop().and_then(|part| part.into_setting_list().ok())
        } else {
            None
        };

        match trailing {
            Some(list) if rule.settings.presence.is_allowed() => {
                passed &=
                    self.check_settings_content(&list, &rule.settings, rule.noun);
            }
            Some(list) => {
                passed = false;
                self.handler.receive(Diagnostic::error(
                    active_code(rule.settings.unexpected_error_code),
                    list.span(),
                    format!("a {} can't carry a setting list", rule.noun),
                ));
            }
            None => {
                if rule.settings.presence.is_required() {
                    passed = false;
                    self.handler.receive(Diagnostic::error(
                        active_code(rule.settings.missing_error_code),
                        span,
                        format!("a {} must carry a setting list", rule.noun),
                    ));
                }
            }
        }

        if parts.len() != rule.arg_validators.len() {
            self.handler.receive(Diagnostic::error(
                active_code(rule.arity_error_code),
                span,
                rule.arity_message,
            ));

            return false;
        }

        let mut args_ok = true;

        for (validator, part) in rule.arg_validators.iter().zip(&parts) {
            let diagnostics = validator(part, index);
            args_ok &= diagnostics.is_empty();

            for diagnostic in diagnostics {
                self.handler.receive(diagnostic);
            }
        }

        passed &= args_ok;

        if rule.should_register && args_ok {
            passed &= self.register_sub_field(owner, line, &parts[0], &rule);
        }

        passed
    }
}

/// Reborrows the shared state of `outer` into a validator for a nested
/// element, configured for the nested kind and scoped to the kind set of
/// the enclosing body.
fn nested_validator<'v>(
    outer: &'v mut ElementValidator<'_>,
    locals: &'v mut HashMap<ElementKind, Span>,
    config: &'static ValidatorConfig,
) -> ElementValidator<'v> {
    ElementValidator {
        unit: &mut *outer.unit,
        symbols: &mut *outer.symbols,
        public_schema: outer.public_schema,
        context: &mut *outer.context,
        global_kinds: &mut *outer.global_kinds,
        local_kinds: locals,
        handler: outer.handler,
        config,
    }
}
