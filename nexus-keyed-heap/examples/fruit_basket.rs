//! Walkthrough of the basic queue operations, keyed by string length.
//!
//! Run with:
//!   cargo run --example fruit_basket

use nexus_keyed_heap::IndexedMinHeap;

fn main() {
    let mut queue = IndexedMinHeap::new(|fruit: &&str| fruit.len());

    for fruit in ["pineapple", "coco", "mango", "banana"] {
        queue.add(fruit).expect("u32 slots hold four fruits");
    }

    println!("should be coco:      {:?}", queue.pop_min());

    // Arbitrary removal by value
    println!("should be false:     {}", queue.remove("coco"));
    println!("should be true:      {}", queue.remove("banana"));
    println!("should be 2:         {}", queue.len());

    println!("should be mango:     {:?}", queue.pop_min());

    queue.add("fig").expect("room for fig");
    println!("should be fig:       {:?}", queue.pop_min());
    println!("should be pineapple: {:?}", queue.pop_min());
    println!("should be None:      {:?}", queue.pop_min());
}
