use strum::IntoEnumIterator;
use tabulac_source_file::Span;

use crate::{SymbolFactory, SymbolKey, SymbolKind};

#[test]
fn only_namespace_like_kinds_own_members() {
    for kind in SymbolKind::iter() {
        let expected = matches!(
            kind,
            SymbolKind::Schema
                | SymbolKind::Table
                | SymbolKind::Enum
                | SymbolKind::TableGroup
        );

        assert_eq!(kind.owns_members(), expected, "{kind:?}");
    }
}

#[test]
fn create_attaches_a_table_to_member_owners() {
    let mut factory = SymbolFactory::new();

    let table = factory.create(SymbolKind::Table, Some(Span::new(0, 5)));
    let column = factory.create(SymbolKind::Column, Some(Span::new(10, 12)));

    assert!(factory[table].members().is_some());
    assert!(factory[column].members().is_none());
    assert_eq!(factory[table].origin(), Some(Span::new(0, 5)));
}

#[test]
fn add_member_then_lookup() {
    let mut factory = SymbolFactory::new();

    let table = factory.create(SymbolKind::Table, None);
    let column = factory.create(SymbolKind::Column, None);

    let key = SymbolKey::new("id".to_string(), SymbolKind::Column);
    factory.add_member(table, key.clone(), column);

    assert_eq!(factory.member_of(table, &key), Some(column));
    assert_eq!(
        factory.member_of(
            table,
            &SymbolKey::new("missing".to_string(), SymbolKind::Column)
        ),
        None
    );
}

#[test]
fn same_name_under_different_kinds_coexists() {
    let mut factory = SymbolFactory::new();

    let schema = factory.create(SymbolKind::Schema, None);
    let table = factory.create(SymbolKind::Table, None);
    let enum_ = factory.create(SymbolKind::Enum, None);

    factory.add_member(
        schema,
        SymbolKey::new("status".to_string(), SymbolKind::Table),
        table,
    );
    factory.add_member(
        schema,
        SymbolKey::new("status".to_string(), SymbolKind::Enum),
        enum_,
    );

    assert_eq!(
        factory.member_of(
            schema,
            &SymbolKey::new("status".to_string(), SymbolKind::Table)
        ),
        Some(table)
    );
    assert_eq!(
        factory.member_of(
            schema,
            &SymbolKey::new("status".to_string(), SymbolKind::Enum)
        ),
        Some(enum_)
    );
}

#[test]
#[should_panic(expected = "duplication detected")]
fn double_registration_under_one_key_panics() {
    let mut factory = SymbolFactory::new();

    let schema = factory.create(SymbolKind::Schema, None);
    let first = factory.create(SymbolKind::Table, None);
    let second = factory.create(SymbolKind::Table, None);

    let key = SymbolKey::new("users".to_string(), SymbolKind::Table);
    factory.add_member(schema, key.clone(), first);
    factory.add_member(schema, key, second);
}

#[test]
#[should_panic(expected = "cannot own members")]
fn membership_under_a_leaf_kind_panics() {
    let mut factory = SymbolFactory::new();

    let note = factory.create(SymbolKind::Note, None);
    let other = factory.create(SymbolKind::Column, None);

    factory.add_member(
        note,
        SymbolKey::new("x".to_string(), SymbolKind::Column),
        other,
    );
}

#[test]
fn resolve_path_walks_schema_segments() {
    let mut factory = SymbolFactory::new();

    let root = factory.create(SymbolKind::Schema, None);
    let inventory = factory.create(SymbolKind::Schema, None);
    let users = factory.create(SymbolKind::Table, None);

    factory.add_member(
        root,
        SymbolKey::new("inventory".to_string(), SymbolKind::Schema),
        inventory,
    );
    factory.add_member(
        inventory,
        SymbolKey::new("users".to_string(), SymbolKind::Table),
        users,
    );

    assert_eq!(
        factory.resolve_path(root, &["inventory", "users"], SymbolKind::Table),
        Some(users)
    );
    assert_eq!(
        factory.resolve_path(root, &["users"], SymbolKind::Table),
        None
    );
    assert_eq!(factory.resolve_path(root, &[], SymbolKind::Table), None);
}
