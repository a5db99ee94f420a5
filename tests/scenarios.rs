//! Usage scenarios for `AvlTreeSet` and its cursors through the public API.

use avl_set::AvlTreeSet;
use rstest::rstest;

fn collect(set: &AvlTreeSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

#[rstest]
fn test_insert_out_of_order_iterates_sorted() {
    let mut set = AvlTreeSet::new();
    for value in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
        set.insert(value);
    }
    assert_eq!(collect(&set), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(set.len(), 9);
}

#[rstest]
fn test_insert_twice_keeps_single_entry() {
    let mut set = AvlTreeSet::new();
    assert!(set.insert(5));
    assert!(!set.insert(5));
    assert_eq!(set.len(), 1);

    let mut cursor = set.find(&5);
    assert_eq!(cursor.value(), &5);
    cursor.move_next();
    assert!(cursor.is_end());
}

#[rstest]
fn test_erase_middle_value() {
    let mut set = AvlTreeSet::from([1, 2, 3]);
    set.remove(&2);
    assert_eq!(collect(&set), [1, 3]);
    assert_eq!(set.len(), 2);
    assert_eq!(set.find(&2), set.end());
}

#[rstest]
#[case(0, Some(1))]
#[case(4, Some(5))]
#[case(5, Some(5))]
#[case(7, Some(7))]
#[case(8, None)]
fn test_lower_bound(#[case] probe: i32, #[case] expected: Option<i32>) {
    let set = AvlTreeSet::from([1, 3, 5, 7]);
    assert_eq!(set.lower_bound(&probe).get().copied(), expected);
}

#[rstest]
fn test_copy_is_independent() {
    let a = AvlTreeSet::from([1, 2, 3]);
    let mut b = a.clone();
    b.insert(4);
    assert_eq!(collect(&a), [1, 2, 3]);
    assert_eq!(collect(&b), [1, 2, 3, 4]);

    let mut c = AvlTreeSet::from([9]);
    c.clone_from(&b);
    c.remove(&1);
    assert_eq!(collect(&b), [1, 2, 3, 4]);
    assert_eq!(collect(&c), [2, 3, 4]);
}

#[rstest]
fn test_empty_set() {
    let set = AvlTreeSet::<i32>::new();
    assert_eq!(set.begin(), set.end());
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.iter().next(), None);
}

#[rstest]
#[case(&[])]
#[case(&[4, 2])]
#[case(&[4, 4, 4])]
#[case(&[9, 1, 8, 2, 7, 3, 6, 4, 5])]
fn test_erase_absent_is_noop(#[case] values: &[i32]) {
    let mut set: AvlTreeSet<i32> = values.iter().copied().collect();
    let before = set.clone();
    assert!(!set.remove(&100));
    assert!(!set.remove(&100));
    assert_eq!(set, before);
}

#[rstest]
fn test_retreat_from_end_reaches_maximum() {
    let set = AvlTreeSet::from([10, 30, 20]);
    let mut cursor = set.end();
    cursor.move_prev();
    assert_eq!(cursor.value(), &30);
    cursor.move_prev();
    assert_eq!(cursor.value(), &20);
    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor, set.end());
}

#[rstest]
fn test_find_then_walk_both_ways() {
    let set: AvlTreeSet<i32> = (0..100).map(|i| i * 2).collect();
    let mut cursor = set.find(&50);
    cursor.move_next();
    assert_eq!(cursor.value(), &52);
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor.value(), &48);
    assert!(set.find(&51).is_end());
}

#[rstest]
fn test_owning_iteration_both_ends() {
    let set = AvlTreeSet::from([3, 1, 4, 5, 9, 2, 6]);
    let mut iter = set.into_iter();
    assert_eq!(iter.len(), 7);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(9));
    assert_eq!(iter.collect::<Vec<_>>(), [2, 3, 4, 5, 6]);
}

#[rstest]
#[should_panic]
fn test_dereference_end_panics() {
    let set = AvlTreeSet::from([1, 2, 3]);
    let _ = set.end().value();
}

#[rstest]
#[should_panic]
fn test_retreat_before_first_panics() {
    let set = AvlTreeSet::from([1, 2, 3]);
    let mut cursor = set.find(&1);
    cursor.move_prev();
}
