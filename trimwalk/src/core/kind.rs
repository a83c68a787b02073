//! Deterministic classification of values into structural kinds.

use std::fmt;

use serde::Serialize;

use crate::core::node::{Node, Walk};

/// Structural category of a value.
///
/// Exactly one kind applies to a view. `Dynamic` only ever describes a
/// wrapper; [`classify`] looks through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Reference,
    Record,
    Text,
    Sequence,
    Map,
    Dynamic,
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Kind::Reference => "reference",
            Kind::Record => "record",
            Kind::Text => "text",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Dynamic => "dynamic",
            Kind::Opaque => "opaque",
        };
        f.write_str(label)
    }
}

/// Classify `value`, looking through boxed and optional wrappers.
///
/// Never fails: anything without a recognizable shape is `Opaque`. Never
/// returns `Dynamic`.
pub fn classify(value: &mut dyn Walk) -> Kind {
    resolve(value.node()).kind()
}

/// Strip `Dynamic` layers until a concrete view remains.
pub fn resolve(node: Node<'_>) -> Node<'_> {
    let mut node = node;
    while let Node::Dynamic(inner) = node {
        node = *inner;
    }
    node
}
