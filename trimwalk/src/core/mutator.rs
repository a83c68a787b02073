//! The trim walk: visits every reachable value once and trims text leaves.
//!
//! Descent never uses the call stack along reference chains. Shared cells go
//! onto a pending worklist once their identity is claimed, and each entered
//! cell is walked with an explicit stack of owned views. The only re-entry is
//! the map adapter, which walks each detached value before binding it back.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::kind::{Kind, classify, resolve};
use crate::core::node::{Node, Referent, TextSlot, Trimmed, Walk};
use crate::core::visited::Visited;

/// Counts collected by one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Concrete views processed (wrappers are not counted).
    pub nodes: usize,
    /// Distinct shared cells entered.
    pub referents: usize,
    /// References dropped because their identity was already claimed.
    pub revisits: usize,
    /// Shared cells that were borrowed or locked elsewhere.
    pub busy: usize,
    /// Text leaves examined.
    pub texts: usize,
    /// Text leaves rewritten.
    pub rewritten: usize,
    /// Read-only text leaves and restricted record fields.
    pub skipped: usize,
}

impl Summary {
    pub fn changed(&self) -> bool {
        self.rewritten > 0
    }
}

/// Why a strict walk refused or flagged its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrimError {
    #[error("root value is opaque; nothing can be trimmed")]
    OpaqueRoot,

    #[error("{busy} shared value(s) were borrowed elsewhere and left untouched")]
    Busy { busy: usize, summary: Summary },
}

/// Single-use walker. State lives for exactly one top-level call.
#[derive(Default)]
pub struct Trimmer {
    visited: Visited,
    pending: Vec<Box<dyn Referent>>,
    summary: Summary,
}

impl Trimmer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk everything reachable from `root`.
    pub fn run(mut self, root: &mut dyn Walk) -> Summary {
        self.walk_from(root.node());
        while let Some(referent) = self.pending.pop() {
            let identity = referent.identity();
            if referent.enter(&mut |value| self.walk_from(value.node())) {
                self.summary.referents += 1;
            } else {
                debug!(%identity, "shared value busy; skipping");
                self.summary.busy += 1;
            }
        }
        debug!(
            nodes = self.summary.nodes,
            referents = self.summary.referents,
            revisits = self.summary.revisits,
            rewritten = self.summary.rewritten,
            "trim walk finished"
        );
        self.summary
    }

    fn walk_from(&mut self, start: Node<'_>) {
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !matches!(node, Node::Dynamic(_)) {
                self.summary.nodes += 1;
            }
            match node {
                Node::Dynamic(inner) => stack.push(*inner),
                Node::Opaque | Node::Reference(None) => {}
                Node::Reference(Some(referent)) => self.claim(referent),
                Node::Text(slot) => self.trim_text(slot),
                Node::Record(fields) => {
                    for field in fields.into_iter().rev() {
                        match field.slot {
                            Some(slot) => stack.push(slot.node()),
                            None => {
                                trace!(field = field.name, "restricted field skipped");
                                self.summary.skipped += 1;
                            }
                        }
                    }
                }
                Node::Sequence(items) => {
                    for item in items.into_iter().rev() {
                        stack.push(item.node());
                    }
                }
                Node::Map(entries) => {
                    if !entries.is_empty() {
                        entries.rebind_each(&mut |value| self.rebind(value));
                    }
                }
            }
        }
    }

    /// Map values arrive detached; text is trimmed directly, anything else
    /// gets a full walk before the map commits it.
    fn rebind(&mut self, value: &mut dyn Walk) {
        match resolve(value.node()) {
            Node::Text(slot) => {
                self.summary.nodes += 1;
                self.trim_text(slot);
            }
            nested => self.walk_from(nested),
        }
    }

    fn claim(&mut self, referent: Box<dyn Referent>) {
        if self.visited.mark_if_new(referent.identity()) {
            self.pending.push(referent);
        } else {
            self.summary.revisits += 1;
        }
    }

    fn trim_text(&mut self, slot: TextSlot<'_>) {
        self.summary.texts += 1;
        match slot.trim() {
            Trimmed::Rewritten => self.summary.rewritten += 1,
            Trimmed::Unchanged => {}
            Trimmed::ReadOnly => self.summary.skipped += 1,
        }
    }
}

/// Trim every text leaf reachable from `root`, in place.
///
/// Never fails. Values that cannot be mutated in the current context are
/// left as they are.
pub fn trim_all(root: &mut dyn Walk) {
    if classify(root) == Kind::Opaque {
        warn!("trim_all called on an opaque root; nothing to do");
        return;
    }
    Trimmer::new().run(root);
}

/// Like [`trim_all`], but reports inputs a caller probably did not intend.
///
/// An opaque root is rejected before any work. Busy shared values are
/// reported after the walk; every other branch has been trimmed by then.
pub fn try_trim_all(root: &mut dyn Walk) -> Result<Summary, TrimError> {
    if classify(root) == Kind::Opaque {
        return Err(TrimError::OpaqueRoot);
    }
    let summary = Trimmer::new().run(root);
    if summary.busy > 0 {
        return Err(TrimError::Busy {
            busy: summary.busy,
            summary,
        });
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::test_support::{Person, person, shared};

    #[test]
    fn summary_counts_single_record() {
        let mut root = Person::named("  hello  ");
        let summary = Trimmer::new().run(&mut root);
        assert_eq!(root.name, "hello");
        assert_eq!(summary.texts, 1);
        assert_eq!(summary.rewritten, 1);
        assert_eq!(summary.referents, 0);
        assert!(summary.changed());
    }

    #[test]
    fn shared_value_reached_twice_is_entered_once() {
        let target = shared(" twice ");
        let mut pair = vec![Rc::clone(&target), Rc::clone(&target)];
        let summary = Trimmer::new().run(&mut pair);
        assert_eq!(target.borrow().name, "twice");
        assert_eq!(summary.referents, 1);
        assert_eq!(summary.revisits, 1);
    }

    #[test]
    fn map_values_are_rebound_under_same_keys() {
        let mut people: HashMap<String, Person> = HashMap::new();
        people.insert("p1".to_string(), Person::named(" Alice "));
        people.insert("p2".to_string(), Person::named(" Bob "));
        let summary = Trimmer::new().run(&mut people);
        assert_eq!(people["p1"].name, "Alice");
        assert_eq!(people["p2"].name, "Bob");
        assert_eq!(summary.rewritten, 2);
    }

    #[test]
    fn map_of_shared_values_keeps_the_same_cells() {
        let alice = shared(" Alice ");
        let mut index: HashMap<&'static str, Rc<RefCell<Person>>> = HashMap::new();
        index.insert("alice", Rc::clone(&alice));
        trim_all(&mut index);
        assert!(Rc::ptr_eq(&index["alice"], &alice));
        assert_eq!(alice.borrow().name, "Alice");
    }

    #[test]
    fn try_trim_all_rejects_opaque_root() {
        let mut number = 42_u32;
        assert_eq!(try_trim_all(&mut number), Err(TrimError::OpaqueRoot));
        let mut nothing: Option<Person> = None;
        assert_eq!(try_trim_all(&mut nothing), Err(TrimError::OpaqueRoot));
    }

    #[test]
    fn try_trim_all_reports_busy_root_and_trims_the_rest() {
        let held = shared(" held ");
        let mut root = vec![Rc::clone(&held), shared(" free ")];
        let guard = held.borrow();
        let err = try_trim_all(&mut root).expect_err("busy");
        drop(guard);
        let TrimError::Busy { busy, summary } = err else {
            panic!("expected busy error");
        };
        assert_eq!(busy, 1);
        assert_eq!(summary.referents, 1);
        assert_eq!(held.borrow().name, " held ");
        assert_eq!(root[1].borrow().name, "free");
    }

    #[test]
    fn trim_all_on_opaque_root_is_a_no_op() {
        let mut flag = true;
        trim_all(&mut flag);
        assert!(flag);
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            TrimError::OpaqueRoot.to_string(),
            "root value is opaque; nothing can be trimmed"
        );
        let busy = TrimError::Busy {
            busy: 2,
            summary: Summary::default(),
        };
        assert!(busy.to_string().starts_with("2 shared value(s)"));
    }

    #[test]
    fn nested_maps_walk_detached_values() {
        let mut nested: HashMap<String, HashMap<String, Vec<String>>> = HashMap::new();
        nested
            .entry("outer".to_string())
            .or_default()
            .insert("inner".to_string(), vec![" x ".to_string()]);
        trim_all(&mut nested);
        assert_eq!(nested["outer"]["inner"], vec!["x".to_string()]);
    }

    #[test]
    fn person_builder_links_nodes() {
        let tail = person(" tail ", 2, None);
        let head = person(" head ", 1, Some(Rc::clone(&tail)));
        let mut root = Rc::clone(&head);
        trim_all(&mut root);
        assert_eq!(head.borrow().name, "head");
        assert_eq!(tail.borrow().name, "tail");
        assert_eq!(tail.borrow().age, 2);
    }
}
