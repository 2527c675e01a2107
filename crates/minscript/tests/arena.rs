use minscript::{Arena, Node, ResourceError};

#[test]
fn new_arena_starts_at_offset_zero() {
    let arena = Arena::new(1024);
    assert_eq!(arena.offset(), 0);
    assert_eq!(arena.capacity(), 1024);
}

#[test]
fn string_allocation_charges_len_plus_nul_rounded_to_eight() {
    for len in 1..=17 {
        let mut arena = Arena::new(1024);
        let text = "x".repeat(len);
        arena.alloc_str(&text).expect("alloc");
        let expected = (len + 1 + 7) & !7;
        assert_eq!(arena.offset(), expected, "len {len}");
    }
}

#[test]
fn every_offset_is_eight_byte_aligned() {
    let mut arena = Arena::new(4096);
    for (i, text) in ["a", "bc", "def", "ghijklmnop"].iter().enumerate() {
        arena.alloc_str(text).expect("alloc");
        arena.alloc_node(Node::Number(i as f64)).expect("alloc");
        assert_eq!(arena.offset() % 8, 0);
    }
}

#[test]
fn node_allocation_advances_by_node_size_rounded() {
    let mut arena = Arena::new(1024);
    arena.alloc_node(Node::Number(1.0)).expect("alloc");
    let first = arena.offset();
    assert_eq!(first, (size_of::<Node>() + 7) & !7);
    arena.alloc_node(Node::Number(2.0)).expect("alloc");
    assert_eq!(arena.offset(), first * 2);
}

#[test]
fn nodes_round_trip_through_their_handles() {
    let mut arena = Arena::new(1024);
    let a = arena.alloc_node(Node::Number(1.0)).expect("alloc");
    let b = arena.alloc_node(Node::Program(vec![a])).expect("alloc");
    assert_eq!(arena.node(a), &Node::Number(1.0));
    assert_eq!(arena.node(b), &Node::Program(vec![a]));
}

#[test]
fn equal_strings_share_one_allocation() {
    let mut arena = Arena::new(1024);
    let first = arena.alloc_str("shared").expect("alloc");
    let offset = arena.offset();
    let second = arena.alloc_str("shared").expect("alloc");
    assert_eq!(first, second);
    assert_eq!(arena.offset(), offset);
    assert_eq!(arena.get_str(first), "shared");
}

#[test]
fn distinct_strings_get_distinct_handles() {
    let mut arena = Arena::new(1024);
    let a = arena.alloc_str("a").expect("alloc");
    let b = arena.alloc_str("b").expect("alloc");
    assert_ne!(a, b);
}

#[test]
fn reset_returns_offset_to_zero() {
    let mut arena = Arena::new(1024);
    arena.alloc_str("text").expect("alloc");
    arena.alloc_node(Node::Number(1.0)).expect("alloc");
    assert_ne!(arena.offset(), 0);
    arena.reset();
    assert_eq!(arena.offset(), 0);
    // Idempotent.
    arena.reset();
    assert_eq!(arena.offset(), 0);
}

#[test]
fn reset_invalidates_dedup_state() {
    let mut arena = Arena::new(1024);
    arena.alloc_str("text").expect("alloc");
    arena.reset();
    // The same text is charged again after a reset.
    arena.alloc_str("text").expect("alloc");
    assert_eq!(arena.offset(), 8);
}

#[test]
fn allocation_beyond_capacity_is_refused() {
    let mut arena = Arena::new(8);
    arena.alloc_str("abc").expect("first fits");
    let err = arena.alloc_str("def").expect_err("second must not fit");
    assert_eq!(
        err,
        ResourceError::Memory {
            requested: 8,
            capacity: 8
        }
    );
}

#[test]
fn refused_allocation_leaves_the_offset_unchanged() {
    let mut arena = Arena::new(8);
    arena.alloc_str("abc").expect("fits");
    let before = arena.offset();
    let _ = arena.alloc_str("def");
    assert_eq!(arena.offset(), before);
}

#[test]
fn zero_capacity_refuses_everything() {
    let mut arena = Arena::new(0);
    assert!(arena.alloc_node(Node::Number(0.0)).is_err());
    assert!(arena.alloc_str("x").is_err());
}
