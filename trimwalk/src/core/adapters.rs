//! Container adapters for standard library types.
//!
//! Each impl only describes shape. Sequences expose their elements in index
//! order, maps hand out detached values through [`Entries`], and shared cells
//! become [`Referent`]s that the walker enters at most once.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex, RwLock};

use crate::core::node::{Entries, Node, Referent, TextSlot, Walk};
use crate::core::visited::Identity;

macro_rules! opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Walk for $ty {
                fn node(&mut self) -> Node<'_> {
                    Node::Opaque
                }
            }
        )*
    };
}

opaque!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    std::time::Duration,
);

// Text

impl Walk for String {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::Owned(self))
    }
}

impl Walk for Box<str> {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::Boxed(self))
    }
}

impl Walk for Cow<'static, str> {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::Cow(self))
    }
}

impl Walk for &'static str {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::ReadOnly(self))
    }
}

impl Walk for Rc<str> {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::ReadOnly(self))
    }
}

impl Walk for Arc<str> {
    fn node(&mut self) -> Node<'_> {
        Node::Text(TextSlot::ReadOnly(self))
    }
}

// Sequences

impl<T: Walk> Walk for [T] {
    fn node(&mut self) -> Node<'_> {
        Node::Sequence(self.iter_mut().map(|item| item as &mut dyn Walk).collect())
    }
}

impl<T: Walk, const N: usize> Walk for [T; N] {
    fn node(&mut self) -> Node<'_> {
        self.as_mut_slice().node()
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn node(&mut self) -> Node<'_> {
        self.as_mut_slice().node()
    }
}

impl<T: Walk> Walk for VecDeque<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Sequence(self.iter_mut().map(|item| item as &mut dyn Walk).collect())
    }
}

// Dynamic wrappers

impl<T: Walk + ?Sized> Walk for Box<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Dynamic(Box::new((**self).node()))
    }
}

impl<T: Walk> Walk for Option<T> {
    fn node(&mut self) -> Node<'_> {
        match self {
            Some(inner) => Node::Dynamic(Box::new(inner.node())),
            None => Node::Opaque,
        }
    }
}

// Maps. Set members are keys and never change.

impl<K, V, S> Walk for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Walk,
    S: BuildHasher,
{
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

impl<K, V, S> Entries for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Walk,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        let keys: Vec<K> = self.keys().cloned().collect();
        for key in keys {
            if let Some(mut value) = self.remove(&key) {
                visit(&mut value);
                self.insert(key, value);
            }
        }
    }
}

impl<K: Ord + Clone, V: Walk> Walk for BTreeMap<K, V> {
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

impl<K: Ord + Clone, V: Walk> Entries for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        let keys: Vec<K> = self.keys().cloned().collect();
        for key in keys {
            if let Some(mut value) = self.remove(&key) {
                visit(&mut value);
                self.insert(key, value);
            }
        }
    }
}

impl<T, S> Walk for HashSet<T, S> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl<T> Walk for BTreeSet<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

// Shared cells

impl<T: Walk + 'static> Walk for Rc<RefCell<T>> {
    fn node(&mut self) -> Node<'_> {
        Node::Reference(Some(Box::new(Rc::clone(self))))
    }
}

impl<T: Walk + 'static> Referent for Rc<RefCell<T>> {
    fn identity(&self) -> Identity {
        Identity::of(Rc::as_ptr(self))
    }

    fn enter(&self, visit: &mut dyn FnMut(&mut dyn Walk)) -> bool {
        let Ok(mut value) = self.try_borrow_mut() else {
            return false;
        };
        visit(&mut *value);
        true
    }
}

impl<T: Walk + 'static> Walk for Weak<RefCell<T>> {
    fn node(&mut self) -> Node<'_> {
        Node::Reference(
            self.upgrade()
                .map(|strong| Box::new(strong) as Box<dyn Referent>),
        )
    }
}

impl<T: Walk + 'static> Walk for Arc<Mutex<T>> {
    fn node(&mut self) -> Node<'_> {
        Node::Reference(Some(Box::new(Arc::clone(self))))
    }
}

impl<T: Walk + 'static> Referent for Arc<Mutex<T>> {
    fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(self))
    }

    /// A poisoned or contended lock counts as busy.
    fn enter(&self, visit: &mut dyn FnMut(&mut dyn Walk)) -> bool {
        let Ok(mut value) = self.try_lock() else {
            return false;
        };
        visit(&mut *value);
        true
    }
}

impl<T: Walk + 'static> Walk for Arc<RwLock<T>> {
    fn node(&mut self) -> Node<'_> {
        Node::Reference(Some(Box::new(Arc::clone(self))))
    }
}

impl<T: Walk + 'static> Referent for Arc<RwLock<T>> {
    fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(self))
    }

    fn enter(&self, visit: &mut dyn FnMut(&mut dyn Walk)) -> bool {
        let Ok(mut value) = self.try_write() else {
            return false;
        };
        visit(&mut *value);
        true
    }
}
