use avl_set::AvlTreeSet;

fn main() {
    let set: AvlTreeSet<i32> = (1..=10).map(|x| x * x).collect();

    let mut cursor = set.lower_bound(&20);
    print!("from 20 upwards:");
    while !cursor.is_end() {
        print!(" {}", cursor.value());
        cursor.move_next();
    }
    println!();

    print!("from the end downwards:");
    let mut cursor = set.end();
    while cursor != set.begin() {
        cursor.move_prev();
        print!(" {}", cursor.value());
    }
    println!();
}
