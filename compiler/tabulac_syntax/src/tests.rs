use strum::IntoEnumIterator;
use tabulac_arena::ID;
use tabulac_source_file::{SourceElement, Span};

use crate::{
    predicate,
    tree::{
        BodyEntry, CompileUnit, ComplexBody, ElementBody, ElementDeclaration,
        Expression, FunctionApplication, Identifier, Literal, LiteralValue,
        QualifiedName,
    },
    ElementKind,
};

fn span(start: usize, end: usize) -> Span { Span::new(start, end) }

fn qualified(segments: &[&str], span: Span) -> Expression {
    Expression::QualifiedName(QualifiedName::new(
        segments
            .iter()
            .map(|segment| Identifier::new(*segment, span))
            .collect(),
        span,
    ))
}

#[test]
fn keyword_resolution_is_case_insensitive() {
    assert_eq!(ElementKind::resolve("Table"), ElementKind::Table);
    assert_eq!(ElementKind::resolve("TABLE"), ElementKind::Table);
    assert_eq!(ElementKind::resolve("project"), ElementKind::Project);
    assert_eq!(ElementKind::resolve("TableGroup"), ElementKind::TableGroup);
    assert_eq!(ElementKind::resolve("enum"), ElementKind::Enum);
    assert_eq!(ElementKind::resolve("Ref"), ElementKind::Ref);
    assert_eq!(ElementKind::resolve("note"), ElementKind::Note);
    assert_eq!(ElementKind::resolve("Indexes"), ElementKind::Indexes);
}

#[test]
fn unknown_keywords_resolve_to_custom() {
    assert_eq!(ElementKind::resolve("database_type"), ElementKind::Custom);
    assert_eq!(ElementKind::resolve(""), ElementKind::Custom);
    assert_eq!(ElementKind::resolve("tables"), ElementKind::Custom);
}

#[test]
fn every_kind_describes_itself() {
    for kind in ElementKind::iter() {
        assert!(!kind.describe().is_empty(), "{kind:?}");
    }
}

#[test]
fn name_shape_classification() {
    let variable = Expression::variable("users", span(0, 5));
    let qualified = qualified(&["inventory", "users"], span(0, 15));
    let literal = Expression::Literal(Literal::new(
        LiteralValue::String("users".to_string()),
        span(0, 7),
    ));

    assert!(predicate::is_valid_name(&variable));
    assert!(predicate::is_valid_name(&qualified));
    assert!(!predicate::is_valid_name(&literal));

    assert!(predicate::is_valid_alias(&variable));
    assert!(!predicate::is_valid_alias(&qualified));

    assert!(predicate::is_qualified(&qualified));
    assert!(!predicate::is_qualified(&variable));
}

#[test]
fn destructure_name_splits_segments() {
    let variable = Expression::variable("users", span(0, 5));
    let qualified = qualified(&["public", "users"], span(0, 12));
    let literal = Expression::Literal(Literal::new(
        LiteralValue::Number("42".to_string()),
        span(0, 2),
    ));

    assert_eq!(predicate::destructure_name(&variable), Some(vec!["users"]));
    assert_eq!(
        predicate::destructure_name(&qualified),
        Some(vec!["public", "users"])
    );
    assert_eq!(predicate::destructure_name(&literal), None);
}

#[test]
fn setting_names_normalize_to_lowercase() {
    let name = Expression::variable("HeaderColor", span(0, 11));
    let not_a_name = Expression::Literal(Literal::new(
        LiteralValue::Boolean(true),
        span(0, 4),
    ));

    assert_eq!(
        predicate::extract_setting_name(&name).as_deref(),
        Some("headercolor")
    );
    assert_eq!(predicate::extract_setting_name(&not_a_name), None);
}

#[test]
fn extract_string_accepts_only_string_literals() {
    let string = Expression::Literal(Literal::new(
        LiteralValue::String("a note".to_string()),
        span(0, 8),
    ));
    let number = Expression::Literal(Literal::new(
        LiteralValue::Number("1".to_string()),
        span(0, 1),
    ));

    assert_eq!(predicate::extract_string(&string), Some("a note"));
    assert_eq!(predicate::extract_string(&number), None);
}

#[test]
fn compile_unit_wires_nodes_through_ids() {
    let mut unit = CompileUnit::new();

    let line = unit.insert_application(FunctionApplication::new(
        Expression::variable("id", span(14, 16)),
        vec![Expression::variable("integer", span(17, 24))],
        span(14, 24),
    ));

    let table = unit.insert_element(ElementDeclaration::new(
        Identifier::new("Table", span(0, 5)),
        Some(ElementKind::Table),
        Some(Expression::variable("users", span(6, 11))),
        None,
        None,
        Some(ElementBody::Complex(ComplexBody::new(
            vec![BodyEntry::Application(line)],
            span(12, 26),
        ))),
        span(0, 26),
    ));
    unit.push_root(table);

    assert_eq!(unit.roots(), &[table]);
    assert_eq!(unit.elements()[table].keyword().value(), "Table");
    assert_eq!(unit.elements()[table].span(), span(0, 26));
    assert!(unit.elements()[table].symbol().is_none());

    let body = unit.elements()[table].body().as_ref().unwrap();
    let entries = body.as_complex().unwrap().entries();
    assert_eq!(entries, &[BodyEntry::Application(line)]);

    unit.elements_mut()[table].set_parent(ID::new(7));
    assert_eq!(unit.elements()[table].parent(), Some(ID::new(7)));
}
