use avl_index::OrderedIndex;

fn main() {
    let mut index = OrderedIndex::new();
    for key in 1..=6 {
        index.insert(key);
    }

    println!("Level-order traversal:");
    index.traverse_level_order(|key| {
        println!("Key: {}", key);
    });

    println!();
    print!("{}", index.render_tree());
}
