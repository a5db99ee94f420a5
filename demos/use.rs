use avl_set::AvlTreeSet;

fn main() {
    let mut set = AvlTreeSet::from([5, 3, 8, 1, 4]);
    set.insert(7);
    set.insert(7);
    assert_eq!(set.len(), 6);
    assert!(set.contains(&4));
    set.remove(&4);
    assert!(!set.contains(&4));

    print!("{{ ");
    for x in &set {
        print!("{x}, ");
    }
    println!("}}");

    let copy = set.clone();
    set.clear();
    println!("copy after clearing the original: {copy:?}");
}
