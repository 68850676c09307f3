//! Contains the builtin [`ValidatorConfig`] tables of the language's
//! element kinds.
//!
//! Everything here is `const` data plus the free functions the tables
//! point at. The shape conventions the validators rely on come from the
//! parser: multi-word bare tokens such as `primary key` or `set null`
//! arrive as a single [`Variable`](Expression::Variable), and the value of
//! an inline `ref` setting arrives as a [`Relation`](Expression::Relation)
//! whose left operand may be a placeholder standing for the column the
//! setting rides on.

use tabulac_diagnostic::{Diagnostic, ErrorCode};
use tabulac_source_file::SourceElement;
use tabulac_symbol::SymbolKind;
use tabulac_syntax::{predicate, tree::Expression, ElementKind};

use super::{
    AliasRule, BodyRule, ContextRule, NameRule, Presence, SettingValidity,
    SettingsRule, SubFieldRule, UniqueRule, ValidatorConfig,
};

/// The value names a `ref` action may take.
const REF_ACTIONS: [&str; 5] =
    ["cascade", "restrict", "set null", "set default", "no action"];

/// The index access methods an index `type` setting may name.
const INDEX_TYPES: [&str; 2] = ["btree", "hash"];

fn no_settings(_: &str, _: Option<&Expression>) -> SettingValidity {
    SettingValidity::Unknown
}

fn no_duplicate_settings(_: &str) -> bool { false }

fn column_setting_may_repeat(name: &str) -> bool { name == "ref" }

fn string_valued(value: Option<&Expression>) -> SettingValidity {
    match value {
        Some(expression) if predicate::extract_string(expression).is_some() => {
            SettingValidity::Valid
        }
        _ => SettingValidity::Invalid,
    }
}

/// A flag setting takes no value at all or an explicit boolean.
fn flag_valued(value: Option<&Expression>) -> SettingValidity {
    match value {
        None => SettingValidity::Valid,
        Some(Expression::Literal(literal)) => {
            if literal.value().as_boolean().is_some() {
                SettingValidity::Valid
            } else {
                SettingValidity::Invalid
            }
        }
        Some(_) => SettingValidity::Invalid,
    }
}

fn color_valued(value: Option<&Expression>) -> SettingValidity {
    let color_ok = value
        .and_then(Expression::as_literal)
        .and_then(|literal| literal.value().as_color())
        .is_some_and(|text| color_text_ok(text));

    if color_ok { SettingValidity::Valid } else { SettingValidity::Invalid }
}

fn color_text_ok(text: &str) -> bool {
    let Some(digits) = text.strip_prefix('#') else { return false };

    matches!(digits.len(), 3 | 6)
        && digits.chars().all(|character| character.is_ascii_hexdigit())
}

/// The value must be a bare word drawn from `options` (compared
/// case-insensitively).
fn enumerated(
    value: Option<&Expression>,
    options: &[&str],
) -> SettingValidity {
    let word_ok =
        value.and_then(predicate::extract_variable_name).is_some_and(|word| {
            options.iter().any(|option| option.eq_ignore_ascii_case(word))
        });

    if word_ok { SettingValidity::Valid } else { SettingValidity::Invalid }
}

fn validate_table_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "headercolor" => color_valued(value),
        "note" => string_valued(value),
        _ => SettingValidity::Unknown,
    }
}

fn validate_table_group_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "color" => color_valued(value),
        "note" => string_valued(value),
        _ => SettingValidity::Unknown,
    }
}

fn validate_column_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "note" => string_valued(value),
        "ref" => match value {
            Some(Expression::Relation(_)) => SettingValidity::Valid,
            _ => SettingValidity::Invalid,
        },
        "pk" | "primary key" | "unique" | "increment" | "null"
        | "not null" => flag_valued(value),
        "default" => match value {
            Some(Expression::Literal(_) | Expression::Functional(_)) => {
                SettingValidity::Valid
            }
            _ => SettingValidity::Invalid,
        },
        _ => SettingValidity::Unknown,
    }
}

fn validate_enum_member_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "note" => string_valued(value),
        _ => SettingValidity::Unknown,
    }
}

fn validate_ref_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "update" | "delete" => enumerated(value, &REF_ACTIONS),
        _ => SettingValidity::Unknown,
    }
}

fn validate_index_setting(
    name: &str,
    value: Option<&Expression>,
) -> SettingValidity {
    match name {
        "pk" | "unique" => flag_valued(value),
        "name" | "note" => string_valued(value),
        "type" => enumerated(value, &INDEX_TYPES),
        _ => SettingValidity::Unknown,
    }
}

fn validate_column_name(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    if predicate::extract_variable_name(argument).is_some() {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidColumnDefinition,
        argument.span(),
        "a column name must be a plain identifier",
    )]
}

fn validate_column_type(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    let shape_ok = match argument {
        Expression::Call(call) => predicate::is_valid_name(call.callee()),
        _ => predicate::is_valid_name(argument),
    };

    if shape_ok {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidColumnDefinition,
        argument.span(),
        "a column type must be a type name, optionally parameterized",
    )]
}

fn validate_table_group_entry(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    if predicate::is_valid_name(argument) {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidTableGroupEntry,
        argument.span(),
        "a table group entry must name a table",
    )]
}

fn validate_enum_member(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    if predicate::extract_variable_name(argument).is_some() {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidEnumMemberName,
        argument.span(),
        "an enum member must be a plain identifier",
    )]
}

/// A relation endpoint must spell at least `table.column`, or group
/// several such paths in a tuple.
fn column_path_ok(expression: &Expression) -> bool {
    match expression {
        Expression::QualifiedName(qualified_name) => {
            qualified_name.segments().len() >= 2
        }
        Expression::Tuple(tuple) => {
            !tuple.elements().is_empty()
                && tuple.elements().iter().all(|element| {
                    element.as_qualified_name().is_some_and(|qualified_name| {
                        qualified_name.segments().len() >= 2
                    })
                })
        }
        _ => false,
    }
}

fn validate_ref_relation(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    let Some(relation) = argument.as_relation() else {
        return vec![Diagnostic::error(
            ErrorCode::InvalidRefRelation,
            argument.span(),
            "a ref body must relate two column paths",
        )];
    };

    let mut diagnostics = Vec::new();

    if !column_path_ok(relation.left()) {
        diagnostics.push(Diagnostic::error(
            ErrorCode::InvalidRefRelation,
            relation.left().span(),
            "the left side of a relation must be a column path",
        ));
    }

    if !column_path_ok(relation.right()) {
        diagnostics.push(Diagnostic::error(
            ErrorCode::InvalidRefRelation,
            relation.right().span(),
            "the right side of a relation must be a column path",
        ));
    }

    diagnostics
}

fn validate_note_content(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    if predicate::extract_string(argument).is_some() {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidNoteContent,
        argument.span(),
        "a note body must be a string",
    )]
}

fn validate_index_entry(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    let entry_ok = match argument {
        Expression::Variable(_) | Expression::Functional(_) => true,
        Expression::Tuple(tuple) => {
            !tuple.elements().is_empty()
                && tuple.elements().iter().all(|element| {
                    matches!(
                        element,
                        Expression::Variable(_) | Expression::Functional(_)
                    )
                })
        }
        _ => false,
    };

    if entry_ok {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidIndexEntry,
        argument.span(),
        "an index entry must be a column, a backtick expression or a \
         parenthesized group of them",
    )]
}

fn validate_custom_value(
    argument: &Expression,
    _index: usize,
) -> Vec<Diagnostic> {
    if argument.as_literal().is_some() {
        return Vec::new();
    }

    vec![Diagnostic::error(
        ErrorCode::InvalidCustomValue,
        argument.span(),
        "a custom element's value must be a literal",
    )]
}

const NOT_UNIQUE: UniqueRule = UniqueRule {
    globally_unique: false,
    locally_unique: false,
    global_error_code: None,
    local_error_code: None,
    stop_on_error: false,
};

const NO_ALIAS: AliasRule = AliasRule {
    presence: Presence::Forbidden,
    should_register: false,
    missing_error_code: None,
    unexpected_error_code: Some(ErrorCode::UnexpectedAlias),
    // Shape is judged before the presence policy, so even a forbidden
    // alias needs the shape code.
    invalid_error_code: Some(ErrorCode::InvalidAlias),
    duplicate_error_code: None,
    stop_on_error: false,
};

const NO_SETTINGS: SettingsRule = SettingsRule {
    presence: Presence::Forbidden,
    missing_error_code: None,
    unexpected_error_code: Some(ErrorCode::UnexpectedSettingList),
    unknown_error_code: None,
    invalid_value_error_code: None,
    duplicate_error_code: None,
    validator: no_settings,
    allow_duplicates: no_duplicate_settings,
    stop_on_error: false,
};

const COMPLEX_BODY_ONLY: BodyRule = BodyRule {
    allow_simple: false,
    allow_complex: true,
    simple_error_code: Some(ErrorCode::UnexpectedSimpleBody),
    complex_error_code: None,
    stop_on_error: true,
};

const ANY_BODY: BodyRule = BodyRule {
    allow_simple: true,
    allow_complex: true,
    simple_error_code: None,
    complex_error_code: None,
    stop_on_error: true,
};

const SIMPLE_BODY_ONLY: BodyRule = BodyRule {
    allow_simple: true,
    allow_complex: false,
    simple_error_code: None,
    complex_error_code: Some(ErrorCode::UnexpectedComplexBody),
    stop_on_error: true,
};

/// An optional plain name that labels the element without registering
/// anything, e.g. the `Ref` of `Ref label: …`.
const OPTIONAL_LABEL_NAME: NameRule = NameRule {
    presence: Presence::Optional,
    allow_qualified: false,
    should_register: false,
    missing_error_code: None,
    unexpected_error_code: None,
    invalid_error_code: Some(ErrorCode::InvalidName),
    qualified_error_code: Some(ErrorCode::QualifiedNameNotAllowed),
    duplicate_error_code: None,
    stop_on_error: true,
};

/// A mandatory, possibly schema-qualified name that registers the
/// element's symbol.
const REGISTERED_NAME: NameRule = NameRule {
    presence: Presence::Required,
    allow_qualified: true,
    should_register: true,
    missing_error_code: Some(ErrorCode::NameNotFound),
    unexpected_error_code: None,
    invalid_error_code: Some(ErrorCode::InvalidName),
    qualified_error_code: None,
    duplicate_error_code: Some(ErrorCode::DuplicateName),
    stop_on_error: true,
};

const NO_NAME: NameRule = NameRule {
    presence: Presence::Forbidden,
    allow_qualified: false,
    should_register: false,
    missing_error_code: None,
    unexpected_error_code: Some(ErrorCode::UnexpectedName),
    // Shape is judged before the presence policy, so even a forbidden
    // name needs the shape code.
    invalid_error_code: Some(ErrorCode::InvalidName),
    qualified_error_code: None,
    duplicate_error_code: None,
    stop_on_error: true,
};

/// The configuration of `Project` elements.
pub const PROJECT: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Project,
    symbol_kind: SymbolKind::Project,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidProjectContext),
        stop_on_error: true,
    },
    unique: UniqueRule {
        globally_unique: true,
        locally_unique: false,
        global_error_code: Some(ErrorCode::ProjectRedefined),
        local_error_code: None,
        stop_on_error: false,
    },
    name: OPTIONAL_LABEL_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: COMPLEX_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "project property",
        arg_validators: &[],
        settings: NO_SETTINGS,
        arity_error_code: Some(ErrorCode::InvalidProjectEntry),
        arity_message: "a project property must be declared as its own \
                        'key: value' element",
        should_register: false,
        register_kind: None,
        duplicate_error_code: None,
    },
};

/// The configuration of `Table` elements.
pub const TABLE: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Table,
    symbol_kind: SymbolKind::Table,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidTableContext),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: REGISTERED_NAME,
    alias: AliasRule {
        presence: Presence::Optional,
        should_register: true,
        missing_error_code: None,
        unexpected_error_code: None,
        invalid_error_code: Some(ErrorCode::InvalidAlias),
        duplicate_error_code: Some(ErrorCode::DuplicateAlias),
        stop_on_error: false,
    },
    settings: SettingsRule {
        presence: Presence::Optional,
        missing_error_code: None,
        unexpected_error_code: None,
        unknown_error_code: Some(ErrorCode::UnknownSetting),
        invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
        duplicate_error_code: Some(ErrorCode::DuplicateSetting),
        validator: validate_table_setting,
        allow_duplicates: no_duplicate_settings,
        stop_on_error: false,
    },
    body: COMPLEX_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "column",
        arg_validators: &[validate_column_name, validate_column_type],
        settings: SettingsRule {
            presence: Presence::Optional,
            missing_error_code: None,
            unexpected_error_code: None,
            unknown_error_code: Some(ErrorCode::UnknownSetting),
            invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
            duplicate_error_code: Some(ErrorCode::DuplicateSetting),
            validator: validate_column_setting,
            allow_duplicates: column_setting_may_repeat,
            stop_on_error: false,
        },
        arity_error_code: Some(ErrorCode::InvalidColumnDefinition),
        arity_message: "a column must be a name followed by a type",
        should_register: true,
        register_kind: Some(SymbolKind::Column),
        duplicate_error_code: Some(ErrorCode::DuplicateColumnName),
    },
};

/// The configuration of `TableGroup` elements.
pub const TABLE_GROUP: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::TableGroup,
    symbol_kind: SymbolKind::TableGroup,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidTableGroupContext),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: REGISTERED_NAME,
    alias: NO_ALIAS,
    settings: SettingsRule {
        presence: Presence::Optional,
        missing_error_code: None,
        unexpected_error_code: None,
        unknown_error_code: Some(ErrorCode::UnknownSetting),
        invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
        duplicate_error_code: Some(ErrorCode::DuplicateSetting),
        validator: validate_table_group_setting,
        allow_duplicates: no_duplicate_settings,
        stop_on_error: false,
    },
    body: COMPLEX_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "table group entry",
        arg_validators: &[validate_table_group_entry],
        settings: NO_SETTINGS,
        arity_error_code: Some(ErrorCode::InvalidTableGroupEntry),
        arity_message: "a table group entry must be a single table name",
        should_register: true,
        register_kind: Some(SymbolKind::TableGroupMember),
        duplicate_error_code: Some(ErrorCode::DuplicateTableGroupEntry),
    },
};

/// The configuration of `Enum` elements.
pub const ENUM: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Enum,
    symbol_kind: SymbolKind::Enum,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidEnumContext),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: REGISTERED_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: COMPLEX_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "enum member",
        arg_validators: &[validate_enum_member],
        settings: SettingsRule {
            presence: Presence::Optional,
            missing_error_code: None,
            unexpected_error_code: None,
            unknown_error_code: Some(ErrorCode::UnknownSetting),
            invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
            duplicate_error_code: Some(ErrorCode::DuplicateSetting),
            validator: validate_enum_member_setting,
            allow_duplicates: no_duplicate_settings,
            stop_on_error: false,
        },
        arity_error_code: Some(ErrorCode::InvalidEnumMemberName),
        arity_message: "an enum member must be a single identifier",
        should_register: true,
        register_kind: Some(SymbolKind::EnumMember),
        duplicate_error_code: Some(ErrorCode::DuplicateEnumMemberName),
    },
};

/// The configuration of `Ref` elements.
pub const REF: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Ref,
    symbol_kind: SymbolKind::Ref,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidRefContext),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: OPTIONAL_LABEL_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: ANY_BODY,
    sub_field: SubFieldRule {
        noun: "relation",
        arg_validators: &[validate_ref_relation],
        settings: SettingsRule {
            presence: Presence::Optional,
            missing_error_code: None,
            unexpected_error_code: None,
            unknown_error_code: Some(ErrorCode::UnknownSetting),
            invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
            duplicate_error_code: Some(ErrorCode::DuplicateSetting),
            validator: validate_ref_setting,
            allow_duplicates: no_duplicate_settings,
            stop_on_error: false,
        },
        arity_error_code: Some(ErrorCode::InvalidRefRelation),
        arity_message: "a ref body must hold exactly one relation",
        should_register: false,
        register_kind: None,
        duplicate_error_code: None,
    },
};

/// The configuration of `Note` elements.
pub const NOTE: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Note,
    symbol_kind: SymbolKind::Note,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidNoteContext),
        stop_on_error: true,
    },
    unique: UniqueRule {
        globally_unique: false,
        locally_unique: true,
        global_error_code: None,
        local_error_code: Some(ErrorCode::NoteRedefined),
        stop_on_error: false,
    },
    name: OPTIONAL_LABEL_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: ANY_BODY,
    sub_field: SubFieldRule {
        noun: "note content",
        arg_validators: &[validate_note_content],
        settings: NO_SETTINGS,
        arity_error_code: Some(ErrorCode::InvalidNoteContent),
        arity_message: "a note body must hold exactly one string",
        should_register: false,
        register_kind: None,
        duplicate_error_code: None,
    },
};

/// The configuration of `Indexes` elements.
pub const INDEXES: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Indexes,
    symbol_kind: SymbolKind::Indexes,
    context: ContextRule {
        error_code: Some(ErrorCode::InvalidIndexesContext),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: NO_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: COMPLEX_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "index entry",
        arg_validators: &[validate_index_entry],
        settings: SettingsRule {
            presence: Presence::Optional,
            missing_error_code: None,
            unexpected_error_code: None,
            unknown_error_code: Some(ErrorCode::UnknownSetting),
            invalid_value_error_code: Some(ErrorCode::InvalidSettingValue),
            duplicate_error_code: Some(ErrorCode::DuplicateSetting),
            validator: validate_index_setting,
            allow_duplicates: no_duplicate_settings,
            stop_on_error: false,
        },
        arity_error_code: Some(ErrorCode::InvalidIndexEntry),
        arity_message: "an index entry must be a single column, backtick \
                        expression or group",
        should_register: false,
        register_kind: None,
        duplicate_error_code: None,
    },
};

/// The configuration of custom elements, i.e. declarations whose keyword
/// names no builtin kind.
///
/// The context rule is what reports the unknown keyword: a custom element
/// is only ever legal directly inside a project.
pub const CUSTOM: ValidatorConfig = ValidatorConfig {
    kind: ElementKind::Custom,
    symbol_kind: SymbolKind::Custom,
    context: ContextRule {
        error_code: Some(ErrorCode::UnknownElementType),
        stop_on_error: true,
    },
    unique: NOT_UNIQUE,
    name: OPTIONAL_LABEL_NAME,
    alias: NO_ALIAS,
    settings: NO_SETTINGS,
    body: SIMPLE_BODY_ONLY,
    sub_field: SubFieldRule {
        noun: "value",
        arg_validators: &[validate_custom_value],
        settings: NO_SETTINGS,
        arity_error_code: Some(ErrorCode::InvalidCustomValue),
        arity_message: "a custom element's body must hold exactly one value",
        should_register: false,
        register_kind: None,
        duplicate_error_code: None,
    },
};
