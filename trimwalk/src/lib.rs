//! In-place whitespace trimming for arbitrary, possibly cyclic object graphs.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic. Kind classification, identity
//!   tracking, container adapters, and the worklist walker. No I/O.
//! - **[`io`]**: Side-effecting operations (config files, document files,
//!   stdin).
//!
//! [`trim`] coordinates the two to implement the `trimwalk trim` command.
//! [`exchange`] is an unrelated checked swap utility that lives alongside.
//!
//! A type joins the walk by describing its shape once:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use trimwalk::{trim_all, walk_record};
//!
//! struct Node {
//!     label: String,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//! walk_record!(Node { label, next });
//!
//! let a = Rc::new(RefCell::new(Node { label: " a ".into(), next: None }));
//! a.borrow_mut().next = Some(Rc::clone(&a));
//! trim_all(&mut Rc::clone(&a));
//! assert_eq!(a.borrow().label, "a");
//! # a.borrow_mut().next = None;
//! ```

pub mod core;
pub mod exchange;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod trim;

pub use crate::core::kind::{Kind, classify};
pub use crate::core::mutator::{Summary, TrimError, Trimmer, trim_all, try_trim_all};
pub use crate::core::node::{Entries, Field, Node, Referent, TextCell, TextSlot, Walk};
pub use crate::core::visited::{Identity, Visited};
