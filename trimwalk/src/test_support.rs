//! Test-only helpers for constructing object graphs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::walk_record;

/// Linked record used across graph tests.
#[derive(Debug, Default)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub next: Option<Rc<RefCell<Person>>>,
}

walk_record!(Person { name, age, next });

impl Person {
    /// Create an unlinked person with a zero age.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Create a shared person with explicit age and successor.
pub fn person(name: &str, age: u32, next: Option<Rc<RefCell<Person>>>) -> Rc<RefCell<Person>> {
    Rc::new(RefCell::new(Person {
        name: name.to_string(),
        age,
        next,
    }))
}

/// Create an unlinked shared person.
pub fn shared(name: &str) -> Rc<RefCell<Person>> {
    person(name, 0, None)
}

/// Point `from.next` at `to`.
pub fn link(from: &Rc<RefCell<Person>>, to: &Rc<RefCell<Person>>) {
    from.borrow_mut().next = Some(Rc::clone(to));
}

/// True if `from.next` is exactly the cell `to`.
pub fn links_to(from: &Rc<RefCell<Person>>, to: &Rc<RefCell<Person>>) -> bool {
    from.borrow()
        .next
        .as_ref()
        .is_some_and(|next| Rc::ptr_eq(next, to))
}

/// Build a cycle `names[0] -> names[1] -> ... -> names[0]`.
pub fn ring(names: &[&str]) -> Vec<Rc<RefCell<Person>>> {
    let nodes: Vec<_> = names.iter().map(|name| shared(name)).collect();
    for (index, node) in nodes.iter().enumerate() {
        link(node, &nodes[(index + 1) % nodes.len()]);
    }
    nodes
}

/// Build an acyclic chain of `len` people named `" n0 "`, `" n1 "`, ...
pub fn chain(len: usize) -> Rc<RefCell<Person>> {
    let head = shared(" n0 ");
    let mut tail = Rc::clone(&head);
    for index in 1..len {
        let next = shared(&format!(" n{index} "));
        link(&tail, &next);
        tail = next;
    }
    head
}

/// Break every `next` link so the graph can be dropped without recursion.
pub fn unlink(nodes: &[Rc<RefCell<Person>>]) {
    for node in nodes {
        let mut cursor = node.borrow_mut().next.take();
        while let Some(current) = cursor {
            cursor = current.borrow_mut().next.take();
        }
    }
}

/// Address plus street, used for value-typed nesting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

walk_record!(Address { street, city });

/// Record mixing sequences of records and a text map.
#[derive(Debug, Default)]
pub struct Profile {
    pub name: String,
    pub addresses: Vec<Address>,
    pub metadata: HashMap<String, String>,
}

walk_record!(Profile {
    name,
    addresses,
    metadata,
});
