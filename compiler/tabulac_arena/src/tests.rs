use crate::{Arena, ID};

#[test]
fn insert_hands_out_sequential_ids() {
    let mut arena = Arena::new();

    let first = arena.insert("a");
    let second = arena.insert("b");
    let third = arena.insert("c");

    assert_eq!(first.into_index(), 0);
    assert_eq!(second.into_index(), 1);
    assert_eq!(third.into_index(), 2);

    assert_eq!(arena.len(), 3);
    assert_eq!(arena[first], "a");
    assert_eq!(arena[second], "b");
    assert_eq!(arena[third], "c");
}

#[test]
fn get_out_of_bound_returns_none() {
    let mut arena = Arena::new();
    arena.insert(1);

    assert!(arena.get(ID::new(1)).is_none());
    assert!(!arena.contains_id(ID::new(1)));
    assert!(arena.contains_id(ID::new(0)));
}

#[test]
fn index_mut_updates_in_place() {
    let mut arena = Arena::new();
    let id = arena.insert(1);

    arena[id] += 41;

    assert_eq!(arena[id], 42);
}

#[test]
fn iter_pairs_follow_insertion_order() {
    let mut arena = Arena::new();
    let ids = vec![arena.insert("x"), arena.insert("y")];

    let pairs = arena.iter().collect::<Vec<_>>();

    assert_eq!(pairs, vec![(ids[0], &"x"), (ids[1], &"y")]);
    assert_eq!(arena.ids().collect::<Vec<_>>(), ids);
}

#[test]
#[should_panic(expected = "invalid")]
fn index_with_dangling_id_panics() {
    let arena = Arena::<u32>::new();
    let _ = arena[ID::new(0)];
}
