//! Contains the validation-rule model: one [`ValidatorConfig`] per element
//! kind drives everything the validator does.
//!
//! A configuration is plain `const` data: booleans, error codes and
//! function pointers. The validator owns the control flow; the
//! configuration owns every judgement call, which is what keeps the
//! validator free of per-kind special cases. [`builtin`] carries the
//! configurations of the language's own kinds; [`config_of`] resolves a
//! kind tag to its table.

use tabulac_diagnostic::{Diagnostic, ErrorCode};
use tabulac_symbol::SymbolKind;
use tabulac_syntax::{tree::Expression, ElementKind};

pub mod builtin;

/// Represents the verdict of a [`SettingValidator`] on one setting entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingValidity {
    /// The setting is known and its value has the right shape.
    Valid,

    /// The setting is known but its value has the wrong shape.
    Invalid,

    /// The setting name isn't known to this declaration kind.
    Unknown,
}

/// Represents whether an optional part of a declaration (name, alias,
/// setting list) may, must or must not appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// The part must not appear.
    Forbidden,

    /// The part may appear or stay away.
    Optional,

    /// The part must appear.
    Required,
}

impl Presence {
    /// Returns `true` if the part may appear.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        !matches!(self, Self::Forbidden)
    }

    /// Returns `true` if the part must appear.
    #[must_use]
    pub const fn is_required(self) -> bool { matches!(self, Self::Required) }
}

/// Judges one setting entry by its normalized name and optional value.
pub type SettingValidator =
    fn(name: &str, value: Option<&Expression>) -> SettingValidity;

/// Decides whether a setting name may legally appear more than once in the
/// same list.
pub type DuplicateSettingPolicy = fn(name: &str) -> bool;

/// Judges one positional sub-field argument, given the line's zero-based
/// position among the applied lines of its body, returning the diagnostics
/// it found (an empty vector means the argument is fine).
pub type ArgValidator =
    fn(argument: &Expression, index: usize) -> Vec<Diagnostic>;

/// Rule group: where an element of this kind may appear.
///
/// Legality itself comes from [`can_contain`]; the rule only supplies the
/// code to report with and the continuation policy.
#[derive(Debug, Clone, Copy)]
pub struct ContextRule {
    /// The code reported when the element appears somewhere illegal.
    pub error_code: Option<ErrorCode>,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: how many elements of this kind may exist.
#[derive(Debug, Clone, Copy)]
pub struct UniqueRule {
    /// At most one element of this kind per compile unit.
    pub globally_unique: bool,

    /// At most one element of this kind per enclosing body.
    pub locally_unique: bool,

    /// The code reported when the per-unit bound is violated.
    pub global_error_code: Option<ErrorCode>,

    /// The code reported when the per-body bound is violated.
    pub local_error_code: Option<ErrorCode>,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: whether and what kind of name the element takes, and
/// whether the name registers a symbol.
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    /// Whether a name may, must or must not appear.
    pub presence: Presence,

    /// Whether a dotted, schema-qualified name is accepted.
    pub allow_qualified: bool,

    /// Whether a well-formed name registers the element's symbol.
    pub should_register: bool,

    /// The code reported when a required name is missing.
    pub missing_error_code: Option<ErrorCode>,

    /// The code reported when a forbidden name is present.
    pub unexpected_error_code: Option<ErrorCode>,

    /// The code reported when the name expression has the wrong shape.
    pub invalid_error_code: Option<ErrorCode>,

    /// The code reported when a dotted name appears but isn't accepted.
    pub qualified_error_code: Option<ErrorCode>,

    /// The code reported when registration hits an occupied key.
    pub duplicate_error_code: Option<ErrorCode>,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: whether the element takes an `as`-alias, and whether the
/// alias registers alongside the name.
#[derive(Debug, Clone, Copy)]
pub struct AliasRule {
    /// Whether an alias may, must or must not appear.
    pub presence: Presence,

    /// Whether a well-formed alias registers the element's symbol under a
    /// second key.
    pub should_register: bool,

    /// The code reported when a required alias is missing.
    pub missing_error_code: Option<ErrorCode>,

    /// The code reported when a forbidden alias is present.
    pub unexpected_error_code: Option<ErrorCode>,

    /// The code reported when the alias expression has the wrong shape.
    pub invalid_error_code: Option<ErrorCode>,

    /// The code reported when registration hits an occupied key.
    pub duplicate_error_code: Option<ErrorCode>,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: whether a setting list may ride on the element (or on a
/// sub-field line), and how its entries are judged.
#[derive(Debug, Clone, Copy)]
pub struct SettingsRule {
    /// Whether a setting list may, must or must not appear.
    pub presence: Presence,

    /// The code reported when a required list is missing.
    pub missing_error_code: Option<ErrorCode>,

    /// The code reported when a forbidden list is present.
    pub unexpected_error_code: Option<ErrorCode>,

    /// The code reported for a setting name the kind doesn't know.
    pub unknown_error_code: Option<ErrorCode>,

    /// The code reported for a known setting with a malformed value.
    pub invalid_value_error_code: Option<ErrorCode>,

    /// The code reported for an illegally repeated setting.
    pub duplicate_error_code: Option<ErrorCode>,

    /// Judges each entry of the list.
    pub validator: SettingValidator,

    /// Decides which setting names may repeat.
    pub allow_duplicates: DuplicateSettingPolicy,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: which body forms the element accepts.
///
/// A declaration with no body at all fails this stage outright without a
/// diagnostic, since the parser has already reported the malformed
/// declaration. That failure ignores [`BodyRule::stop_on_error`].
#[derive(Debug, Clone, Copy)]
pub struct BodyRule {
    /// Whether a `key: value` style single-entry body is accepted.
    pub allow_simple: bool,

    /// Whether a braced multi-entry body is accepted.
    pub allow_complex: bool,

    /// The code reported when a simple body appears but isn't accepted.
    pub simple_error_code: Option<ErrorCode>,

    /// The code reported when a complex body appears but isn't accepted.
    pub complex_error_code: Option<ErrorCode>,

    /// Whether a failed check aborts the remaining stages.
    pub stop_on_error: bool,
}

/// Rule group: how the applied expression lines inside the element's body
/// are judged and registered.
///
/// A line's expressions are its callee followed by its arguments; a
/// trailing setting list is split off first and judged by `settings`. The
/// remaining expressions must match `arg_validators` one-to-one, position
/// by position.
#[derive(Debug, Clone, Copy)]
pub struct SubFieldRule {
    /// What a line of this body is called in diagnostics.
    pub noun: &'static str,

    /// The positional validators; their count is the expected arity.
    pub arg_validators: &'static [ArgValidator],

    /// The policy for the line's trailing setting list.
    pub settings: SettingsRule,

    /// The code reported when the line has the wrong number of
    /// expressions.
    pub arity_error_code: Option<ErrorCode>,

    /// The message reported alongside [`SubFieldRule::arity_error_code`].
    pub arity_message: &'static str,

    /// Whether a line that passes its positional checks registers a symbol
    /// in the owning element's member table.
    pub should_register: bool,

    /// The symbol kind registered for each line.
    pub register_kind: Option<SymbolKind>,

    /// The code reported when registration hits an occupied key.
    pub duplicate_error_code: Option<ErrorCode>,
}

/// Represents the full rule table of one element kind.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// The element kind this configuration validates.
    pub kind: ElementKind,

    /// The symbol kind created for elements of this kind.
    pub symbol_kind: SymbolKind,

    /// Where the element may appear.
    pub context: ContextRule,

    /// How many elements of this kind may exist.
    pub unique: UniqueRule,

    /// Whether and what kind of name the element takes.
    pub name: NameRule,

    /// Whether the element takes an alias.
    pub alias: AliasRule,

    /// Whether the element carries a setting list.
    pub settings: SettingsRule,

    /// Which body forms the element accepts.
    pub body: BodyRule,

    /// How the element's applied body lines are judged.
    pub sub_field: SubFieldRule,
}

/// Resolves an element kind to its builtin configuration.
///
/// The mapping is total: every kind, including [`ElementKind::Custom`],
/// has a table.
#[must_use]
pub const fn config_of(kind: ElementKind) -> &'static ValidatorConfig {
    match kind {
        ElementKind::Project => &builtin::PROJECT,
        ElementKind::Table => &builtin::TABLE,
        ElementKind::TableGroup => &builtin::TABLE_GROUP,
        ElementKind::Enum => &builtin::ENUM,
        ElementKind::Ref => &builtin::REF,
        ElementKind::Note => &builtin::NOTE,
        ElementKind::Indexes => &builtin::INDEXES,
        ElementKind::Custom => &builtin::CUSTOM,
    }
}

/// Returns `true` if an element of `child` kind may appear directly inside
/// an element of `parent` kind ([`None`] meaning the top level of the
/// compile unit).
#[must_use]
pub const fn can_contain(
    parent: Option<ElementKind>,
    child: ElementKind,
) -> bool {
    match (parent, child) {
        (
            None,
            ElementKind::Project
            | ElementKind::Table
            | ElementKind::TableGroup
            | ElementKind::Enum
            | ElementKind::Ref
            | ElementKind::Note,
        )
        | (
            Some(ElementKind::Project),
            ElementKind::Note | ElementKind::Custom,
        )
        | (
            Some(ElementKind::Table),
            ElementKind::Note | ElementKind::Indexes,
        )
        | (Some(ElementKind::TableGroup), ElementKind::Note) => true,

        _ => false,
    }
}
