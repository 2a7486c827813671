use avl_index::{Balancing, OrderedIndex};

fn main() {
    let mut index = OrderedIndex::new();
    index.insert(0);
    index.insert(1);
    index.insert(2);
    index.insert(2);
    index.insert(3);
    index.insert(4);
    index.insert(5);
    assert!(index.contains(&1));
    index.remove(&1);
    assert!(!index.contains(&1));
    println!("{}", index);

    for key in &index {
        println!("{key}");
    }

    match index.min() {
        Ok(min) => println!("min: {min}"),
        Err(err) => println!("min: {err}"),
    }

    let mut plain = OrderedIndex::with_balancing(Balancing::Disabled);
    plain.extend(0..5);
    println!("{}", plain);
    print!("{}", plain.render_tree());
}
