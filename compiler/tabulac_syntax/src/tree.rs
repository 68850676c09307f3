//! Contains the definition of the declaration-tree nodes making up a
//! [`CompileUnit`].
//!
//! The tree is deliberately loose: names, aliases and sub-field arguments
//! are all plain [`Expression`]s, and a declaration may miss any of its
//! parts. The parser records whatever shape it managed to read; deciding
//! which shapes are legal for which element kind is the semantic pass's
//! job.

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use tabulac_arena::{Arena, ID};
use tabulac_source_file::{SourceElement, Span};
use tabulac_symbol::Symbol;

use crate::ElementKind;

/// Represents a single identifier carried by the tree, with its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Identifier {
    /// Gets the text of the identifier.
    #[get = "pub"]
    value: String,

    span: Span,
}

impl Identifier {
    /// Creates a new [`Identifier`] with the given text and span.
    #[must_use]
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self { value: value.into(), span }
    }
}

impl SourceElement for Identifier {
    fn span(&self) -> Span { self.span }
}

/// Represents the payload of a [`Literal`] expression.
///
/// Numbers keep their raw text: the semantic pass only ever judges the
/// shape of a value, never computes with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
pub enum LiteralValue {
    /// A quoted string.
    String(String),

    /// A numeric literal, as written.
    Number(String),

    /// A `true`/`false` keyword.
    Boolean(bool),

    /// A `#rrggbb` color literal.
    Color(String),

    /// The `null` keyword.
    Null,
}

/// Represents a literal expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Literal {
    /// Gets the value of the literal.
    #[get = "pub"]
    value: LiteralValue,

    span: Span,
}

impl Literal {
    /// Creates a new [`Literal`] with the given value and span.
    #[must_use]
    pub const fn new(value: LiteralValue, span: Span) -> Self {
        Self { value, span }
    }
}

impl SourceElement for Literal {
    fn span(&self) -> Span { self.span }
}

/// Represents a dotted chain of identifiers, e.g. `inventory.users.id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct QualifiedName {
    /// Gets the identifier segments of the chain, in source order.
    #[get = "pub"]
    segments: Vec<Identifier>,

    span: Span,
}

impl QualifiedName {
    /// Creates a new [`QualifiedName`] from its segments and overall span.
    #[must_use]
    pub fn new(segments: Vec<Identifier>, span: Span) -> Self {
        Self { segments, span }
    }
}

impl SourceElement for QualifiedName {
    fn span(&self) -> Span { self.span }
}

/// Represents the operator of a [`Relation`] between two column paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationOperator {
    /// `<`: one row on the left relates to many on the right.
    OneToMany,

    /// `>`: many rows on the left relate to one on the right.
    ManyToOne,

    /// `-`: one-to-one.
    OneToOne,

    /// `<>`: many-to-many.
    ManyToMany,
}

impl RelationOperator {
    /// Returns the source token of the operator.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::OneToMany => "<",
            Self::ManyToOne => ">",
            Self::OneToOne => "-",
            Self::ManyToMany => "<>",
        }
    }
}

/// Represents a binary relation between two expressions, e.g.
/// `users.id < posts.author_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct Relation {
    /// Gets the relation operator.
    #[get_copy = "pub"]
    operator: RelationOperator,

    /// Gets the left operand.
    #[get = "pub"]
    left: Box<Expression>,

    /// Gets the right operand.
    #[get = "pub"]
    right: Box<Expression>,

    span: Span,
}

impl Relation {
    /// Creates a new [`Relation`] from its operator and operands.
    #[must_use]
    pub fn new(
        operator: RelationOperator,
        left: Expression,
        right: Expression,
        span: Span,
    ) -> Self {
        Self { operator, left: Box::new(left), right: Box::new(right), span }
    }
}

impl SourceElement for Relation {
    fn span(&self) -> Span { self.span }
}

/// Represents a parenthesized, comma-separated group of expressions, e.g.
/// the `(last_name, first_name)` of a composite index entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Tuple {
    /// Gets the grouped expressions in source order.
    #[get = "pub"]
    elements: Vec<Expression>,

    span: Span,
}

impl Tuple {
    /// Creates a new [`Tuple`] from its elements and overall span.
    #[must_use]
    pub fn new(elements: Vec<Expression>, span: Span) -> Self {
        Self { elements, span }
    }
}

impl SourceElement for Tuple {
    fn span(&self) -> Span { self.span }
}

/// Represents a parameterized application of a name to arguments, e.g. the
/// `varchar(255)` of a column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Call {
    /// Gets the expression being applied.
    #[get = "pub"]
    callee: Box<Expression>,

    /// Gets the arguments in source order.
    #[get = "pub"]
    args: Vec<Expression>,

    span: Span,
}

impl Call {
    /// Creates a new [`Call`] from its callee, arguments and overall span.
    #[must_use]
    pub fn new(callee: Expression, args: Vec<Expression>, span: Span) -> Self {
        Self { callee: Box::new(callee), args, span }
    }
}

impl SourceElement for Call {
    fn span(&self) -> Span { self.span }
}

/// Represents a backtick-quoted raw expression passed through to the
/// database verbatim, e.g. `` `now()` ``.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Functional {
    /// Gets the raw content between the backticks.
    #[get = "pub"]
    content: String,

    span: Span,
}

impl Functional {
    /// Creates a new [`Functional`] with the given raw content and span.
    #[must_use]
    pub fn new(content: impl Into<String>, span: Span) -> Self {
        Self { content: content.into(), span }
    }
}

impl SourceElement for Functional {
    fn span(&self) -> Span { self.span }
}

/// Represents one entry of a [`SettingList`]: a name, optionally followed
/// by `: value`.
///
/// The name is an arbitrary [`Expression`]; the parser doesn't insist on an
/// identifier there, so the semantic pass decides what it can make sense
/// of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Setting {
    /// Gets the name expression of the setting.
    #[get = "pub"]
    name: Expression,

    /// Gets the value of the setting, if one was written.
    #[get = "pub"]
    value: Option<Expression>,

    span: Span,
}

impl Setting {
    /// Creates a new [`Setting`] from its name, optional value and span.
    #[must_use]
    pub fn new(name: Expression, value: Option<Expression>, span: Span) -> Self {
        Self { name, value, span }
    }
}

impl SourceElement for Setting {
    fn span(&self) -> Span { self.span }
}

/// Represents a bracketed `[name: value, flag, …]` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct SettingList {
    /// Gets the entries of the list in source order.
    #[get = "pub"]
    settings: Vec<Setting>,

    span: Span,
}

impl SettingList {
    /// Creates a new [`SettingList`] from its entries and overall span.
    #[must_use]
    pub fn new(settings: Vec<Setting>, span: Span) -> Self {
        Self { settings, span }
    }
}

impl SourceElement for SettingList {
    fn span(&self) -> Span { self.span }
}

/// Represents a hole the parser left behind where an expression failed to
/// parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// The span of the unparsable source code.
    pub span: Span,
}

impl SourceElement for Placeholder {
    fn span(&self) -> Span { self.span }
}

/// Represents any expression the parser can produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Expression {
    Variable(Identifier),
    Literal(Literal),
    QualifiedName(QualifiedName),
    Relation(Relation),
    Tuple(Tuple),
    Call(Call),
    Functional(Functional),
    SettingList(SettingList),
    Placeholder(Placeholder),
}

impl Expression {
    /// Creates a variable expression from raw identifier text.
    #[must_use]
    pub fn variable(value: impl Into<String>, span: Span) -> Self {
        Self::Variable(Identifier::new(value, span))
    }
}

impl SourceElement for Expression {
    fn span(&self) -> Span {
        match self {
            Self::Variable(variable) => variable.span(),
            Self::Literal(literal) => literal.span(),
            Self::QualifiedName(qualified_name) => qualified_name.span(),
            Self::Relation(relation) => relation.span(),
            Self::Tuple(tuple) => tuple.span(),
            Self::Call(call) => call.span(),
            Self::Functional(functional) => functional.span(),
            Self::SettingList(setting_list) => setting_list.span(),
            Self::Placeholder(placeholder) => placeholder.span(),
        }
    }
}

/// Represents one entry of an element body: either a nested element
/// declaration or an applied expression line (a column definition, an index
/// entry, a relation, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum BodyEntry {
    Element(ID<ElementDeclaration>),
    Application(ID<FunctionApplication>),
}

/// Represents a `: value` style body holding exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CopyGetters)]
pub struct SimpleBody {
    /// Gets the single entry of the body.
    #[get_copy = "pub"]
    entry: BodyEntry,

    span: Span,
}

impl SimpleBody {
    /// Creates a new [`SimpleBody`] with the given entry and span.
    #[must_use]
    pub const fn new(entry: BodyEntry, span: Span) -> Self {
        Self { entry, span }
    }
}

impl SourceElement for SimpleBody {
    fn span(&self) -> Span { self.span }
}

/// Represents a braced `{ … }` body holding any number of entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct ComplexBody {
    /// Gets the entries of the body in source order.
    #[get = "pub"]
    entries: Vec<BodyEntry>,

    span: Span,
}

impl ComplexBody {
    /// Creates a new [`ComplexBody`] with the given entries and span.
    #[must_use]
    pub fn new(entries: Vec<BodyEntry>, span: Span) -> Self {
        Self { entries, span }
    }
}

impl SourceElement for ComplexBody {
    fn span(&self) -> Span { self.span }
}

/// Represents the body of an element declaration, in either of its two
/// source forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum ElementBody {
    Simple(SimpleBody),
    Complex(ComplexBody),
}

impl SourceElement for ElementBody {
    fn span(&self) -> Span {
        match self {
            Self::Simple(simple) => simple.span(),
            Self::Complex(complex) => complex.span(),
        }
    }
}

/// Represents one element declaration: keyword, optional name, optional
/// alias, optional setting list and optional body.
///
/// The `parent` and `symbol` back-links start out empty; the semantic pass
/// fills them in while it walks the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct ElementDeclaration {
    /// Gets the declaration keyword as written in the source.
    #[get = "pub"]
    keyword: Identifier,

    /// Gets the resolved kind tag, if the parser managed to classify the
    /// declaration.
    #[get_copy = "pub"]
    kind: Option<ElementKind>,

    /// Gets the name expression, if one was written.
    #[get = "pub"]
    name: Option<Expression>,

    /// Gets the alias expression, if one was written.
    #[get = "pub"]
    alias: Option<Expression>,

    /// Gets the setting list attached to the declaration, if any.
    #[get = "pub"]
    settings: Option<SettingList>,

    /// Gets the body of the declaration, if one was written.
    #[get = "pub"]
    body: Option<ElementBody>,

    /// Gets the enclosing element declaration, once the semantic pass has
    /// wired it.
    #[get_copy = "pub"]
    parent: Option<ID<ElementDeclaration>>,

    /// Gets the symbol registered for this declaration, once the semantic
    /// pass has assigned one.
    #[get_copy = "pub"]
    symbol: Option<ID<Symbol>>,

    span: Span,
}

impl ElementDeclaration {
    /// Creates a new [`ElementDeclaration`] with empty `parent` and
    /// `symbol` back-links.
    #[must_use]
    pub const fn new(
        keyword: Identifier,
        kind: Option<ElementKind>,
        name: Option<Expression>,
        alias: Option<Expression>,
        settings: Option<SettingList>,
        body: Option<ElementBody>,
        span: Span,
    ) -> Self {
        Self {
            keyword,
            kind,
            name,
            alias,
            settings,
            body,
            parent: None,
            symbol: None,
            span,
        }
    }

    /// Wires the enclosing element declaration.
    pub fn set_parent(&mut self, parent: ID<ElementDeclaration>) {
        self.parent = Some(parent);
    }

    /// Assigns the symbol standing for this declaration.
    pub fn set_symbol(&mut self, symbol: ID<Symbol>) {
        self.symbol = Some(symbol);
    }
}

impl SourceElement for ElementDeclaration {
    fn span(&self) -> Span { self.span }
}

/// Represents a free-standing applied expression line inside a body: the
/// callee expression followed by its arguments.
///
/// A table body's `id integer [pk]` line arrives as callee `id` with
/// arguments `integer` and the setting list; an enum body's `active` line
/// as callee `active` with no arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct FunctionApplication {
    /// Gets the callee expression.
    #[get = "pub"]
    callee: Expression,

    /// Gets the argument expressions in source order.
    #[get = "pub"]
    args: Vec<Expression>,

    /// Gets the symbol registered for this line, once the semantic pass has
    /// assigned one.
    #[get_copy = "pub"]
    symbol: Option<ID<Symbol>>,

    span: Span,
}

impl FunctionApplication {
    /// Creates a new [`FunctionApplication`] with an empty `symbol`
    /// back-link.
    #[must_use]
    pub const fn new(
        callee: Expression,
        args: Vec<Expression>,
        span: Span,
    ) -> Self {
        Self { callee, args, symbol: None, span }
    }

    /// Assigns the symbol standing for this line.
    pub fn set_symbol(&mut self, symbol: ID<Symbol>) {
        self.symbol = Some(symbol);
    }
}

impl SourceElement for FunctionApplication {
    fn span(&self) -> Span { self.span }
}

/// Owns every node of one parsed schema file.
///
/// Declarations and applied lines live in two flat arenas; bodies refer to
/// their entries by [`ID`], which lets the semantic pass iterate a body
/// while mutating the nodes it visits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct CompileUnit {
    /// Gets the arena of element declarations.
    #[get = "pub"]
    elements: Arena<ElementDeclaration>,

    /// Gets the arena of applied expression lines.
    #[get = "pub"]
    applications: Arena<FunctionApplication>,

    roots: Vec<ID<ElementDeclaration>>,
}

impl CompileUnit {
    /// Creates a new empty [`CompileUnit`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Arena::new(),
            applications: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Gets the top-level element declarations in source order.
    #[must_use]
    pub fn roots(&self) -> &[ID<ElementDeclaration>] { &self.roots }

    /// Inserts an element declaration into the unit and returns its [`ID`].
    pub fn insert_element(
        &mut self,
        element: ElementDeclaration,
    ) -> ID<ElementDeclaration> {
        self.elements.insert(element)
    }

    /// Inserts an applied expression line into the unit and returns its
    /// [`ID`].
    pub fn insert_application(
        &mut self,
        application: FunctionApplication,
    ) -> ID<FunctionApplication> {
        self.applications.insert(application)
    }

    /// Appends a declaration to the top-level element list.
    pub fn push_root(&mut self, root: ID<ElementDeclaration>) {
        self.roots.push(root);
    }

    /// Returns a mutable reference to the arena of element declarations.
    pub fn elements_mut(&mut self) -> &mut Arena<ElementDeclaration> {
        &mut self.elements
    }

    /// Returns a mutable reference to the arena of applied expression
    /// lines.
    pub fn applications_mut(&mut self) -> &mut Arena<FunctionApplication> {
        &mut self.applications
    }
}
