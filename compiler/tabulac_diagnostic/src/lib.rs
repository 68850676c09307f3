//! Contains the definition of [`Diagnostic`], the record every semantic
//! check produces when it finds a problem in the user's schema, along with
//! the stable [`ErrorCode`] table.

use std::fmt::Display;

use derive_new::new;
use strum_macros::EnumIter;
use tabulac_log::{Message, Severity};
use tabulac_source_file::{Location, SourceFile, Span};

/// Represents the stable numeric code attached to every [`Diagnostic`].
///
/// Codes are grouped by the validation rule family that produces them:
/// `1000`s for context, `1100`s for element uniqueness, `1200`s for names,
/// `1300`s for aliases, `1400`s for setting lists, `1500`s for body shapes
/// and `1600`s for sub-fields. The discriminants are part of the tool's
/// output contract and never get reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter,
)]
#[repr(u16)]
pub enum ErrorCode {
    /// A declaration keyword that doesn't name any known element kind.
    UnknownElementType = 1000,

    /// A `Project` declared somewhere a project can't appear.
    InvalidProjectContext = 1001,

    /// A `Table` declared somewhere a table can't appear.
    InvalidTableContext = 1002,

    /// A `TableGroup` declared somewhere a table group can't appear.
    InvalidTableGroupContext = 1003,

    /// An `Enum` declared somewhere an enum can't appear.
    InvalidEnumContext = 1004,

    /// A `Ref` declared somewhere a ref can't appear.
    InvalidRefContext = 1005,

    /// A `Note` declared somewhere a note can't appear.
    InvalidNoteContext = 1006,

    /// An `Indexes` block declared outside of a table.
    InvalidIndexesContext = 1007,

    /// A second `Project` declared in the same compile unit.
    ProjectRedefined = 1100,

    /// A second `Note` declared in the same enclosing body.
    NoteRedefined = 1101,

    /// A declaration of this kind requires a name but none was given.
    NameNotFound = 1200,

    /// A declaration of this kind doesn't take a name but one was given.
    UnexpectedName = 1201,

    /// The given name expression isn't a valid element name.
    InvalidName = 1202,

    /// A dotted name was given where only a simple identifier is allowed.
    QualifiedNameNotAllowed = 1203,

    /// The given name clashes with an earlier declaration of the same kind.
    DuplicateName = 1204,

    /// A declaration of this kind requires an alias but none was given.
    AliasNotFound = 1300,

    /// A declaration of this kind doesn't take an alias but one was given.
    UnexpectedAlias = 1301,

    /// The given alias expression isn't a valid element alias.
    InvalidAlias = 1302,

    /// The given alias clashes with an earlier declaration of the same kind.
    DuplicateAlias = 1303,

    /// A declaration of this kind requires a setting list but none was
    /// given.
    SettingListNotFound = 1400,

    /// A declaration of this kind doesn't take a setting list but one was
    /// given.
    UnexpectedSettingList = 1401,

    /// A setting name that this declaration kind doesn't recognize.
    UnknownSetting = 1402,

    /// A recognized setting carrying a value of the wrong shape.
    InvalidSettingValue = 1403,

    /// The same setting given twice where repetition isn't allowed.
    DuplicateSetting = 1404,

    /// A `key: value` style body where this kind requires a braced block.
    UnexpectedSimpleBody = 1500,

    /// A braced block where this kind requires a `key: value` style body.
    UnexpectedComplexBody = 1501,

    /// A malformed column definition inside a table body.
    InvalidColumnDefinition = 1600,

    /// A malformed member name inside an enum body.
    InvalidEnumMemberName = 1601,

    /// A malformed entry inside an `Indexes` block.
    InvalidIndexEntry = 1602,

    /// A malformed relation inside a `Ref` declaration.
    InvalidRefRelation = 1603,

    /// A malformed content value inside a `Note` declaration.
    InvalidNoteContent = 1604,

    /// A malformed table reference inside a `TableGroup` body.
    InvalidTableGroupEntry = 1605,

    /// A malformed property inside a `Project` body.
    InvalidProjectEntry = 1606,

    /// A malformed value carried by a custom element.
    InvalidCustomValue = 1607,

    /// Two columns of the same table sharing a name.
    DuplicateColumnName = 1610,

    /// Two members of the same enum sharing a name.
    DuplicateEnumMemberName = 1611,

    /// The same table listed twice in one table group.
    DuplicateTableGroupEntry = 1612,
}

impl ErrorCode {
    /// Returns the numeric value of the code.
    #[must_use]
    pub const fn number(self) -> u16 { self as u16 }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.number())
    }
}

/// Represents a secondary location attached to a [`Diagnostic`], pointing
/// at source code related to the reported problem (typically the first of
/// two clashing definitions).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Related {
    /// The location of the related source code.
    pub span: Span,

    /// The message explaining how the location relates to the problem.
    pub message: String,
}

/// Represents a single problem diagnosed in the user's schema.
///
/// Diagnostics are plain data; producing one never aborts the analysis.
/// They are pushed into a `Handler` in the order the checks run, so a
/// storage-backed handler observes them deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic {
    /// The stable code identifying the kind of problem.
    pub code: ErrorCode,

    /// The severity of the problem.
    pub severity: Severity,

    /// The human-readable description of the problem.
    pub message: String,

    /// The location of the offending source code.
    pub span: Span,

    /// The optional hint on how to fix the problem.
    pub help_message: Option<String>,

    /// The secondary locations related to the problem.
    pub related: Vec<Related>,
}

impl Diagnostic {
    /// Creates a new error-severity [`Diagnostic`] with no help message and
    /// no related locations.
    #[must_use]
    pub fn error(
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            span,
            help_message: None,
            related: Vec::new(),
        }
    }

    /// Attaches a related location to the diagnostic.
    #[must_use]
    pub fn with_related(
        mut self,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        self.related.push(Related::new(span, message.into()));
        self
    }

    /// Attaches a fix hint to the diagnostic.
    #[must_use]
    pub fn with_help(mut self, help_message: impl Into<String>) -> Self {
        self.help_message = Some(help_message.into());
        self
    }

    /// Translates the start of the diagnostic's span into a line/column
    /// [`Location`] within the given source file.
    #[must_use]
    pub fn start_location(&self, source: &SourceFile) -> Option<Location> {
        source.get_location(self.span.start)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Message::new(
            self.severity,
            format_args!("{}: {}", self.code, self.message),
        )
        .fmt(f)
    }
}
