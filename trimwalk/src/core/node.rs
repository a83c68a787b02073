//! Structural views a value exposes to the traversal.
//!
//! A type takes part in a trim walk by implementing [`Walk`] once: it says
//! which [`Kind`] it is and where its children live. It never drives the
//! traversal itself. The walker in [`crate::core::mutator`] owns all descent,
//! cycle tracking, and text rewriting.

use std::borrow::Cow;

use crate::core::kind::Kind;
use crate::core::visited::Identity;

/// A value the trim walk can descend into.
pub trait Walk {
    /// Expose the shape of `self` for one step of the walk.
    ///
    /// Implementations must be shallow: return direct children only, never
    /// recurse.
    fn node(&mut self) -> Node<'_>;
}

/// One-level view of a value, borrowed mutably from its owner.
pub enum Node<'a> {
    /// Shared cell with a stable identity. `None` is an empty reference.
    Reference(Option<Box<dyn Referent>>),
    /// Fields in declaration order.
    Record(Vec<Field<'a>>),
    Text(TextSlot<'a>),
    /// Elements in index order.
    Sequence(Vec<&'a mut dyn Walk>),
    Map(&'a mut dyn Entries),
    /// Boxed or optional wrapper around exactly one inner view.
    Dynamic(Box<Node<'a>>),
    Opaque,
}

impl Node<'_> {
    /// Kind of this view without unwrapping `Dynamic` layers.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Reference(_) => Kind::Reference,
            Node::Record(_) => Kind::Record,
            Node::Text(_) => Kind::Text,
            Node::Sequence(_) => Kind::Sequence,
            Node::Map(_) => Kind::Map,
            Node::Dynamic(_) => Kind::Dynamic,
            Node::Opaque => Kind::Opaque,
        }
    }
}

/// A record field as seen by the walk.
pub struct Field<'a> {
    pub name: &'static str,
    /// `None` for fields the record does not open for mutation.
    pub slot: Option<&'a mut dyn Walk>,
}

impl<'a> Field<'a> {
    pub fn mutable(name: &'static str, slot: &'a mut dyn Walk) -> Self {
        Self {
            name,
            slot: Some(slot),
        }
    }

    pub fn restricted(name: &'static str) -> Self {
        Self { name, slot: None }
    }
}

/// Storage behind a text leaf.
pub enum TextSlot<'a> {
    Owned(&'a mut String),
    Boxed(&'a mut Box<str>),
    Cow(&'a mut Cow<'static, str>),
    /// Text owned by a type that only accepts whole-value replacement.
    Cell(&'a mut dyn TextCell),
    /// Text the walk can read but never rewrite.
    ReadOnly(&'a str),
}

/// Text storage without direct `&mut String` access.
pub trait TextCell {
    fn text(&self) -> &str;

    /// Replace the stored text, keeping any surrounding formatting.
    fn replace(&mut self, text: String);
}

/// Result of trimming a single text leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trimmed {
    Unchanged,
    Rewritten,
    ReadOnly,
}

impl TextSlot<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            TextSlot::Owned(text) => text.as_str(),
            TextSlot::Boxed(text) => text,
            TextSlot::Cow(text) => text,
            TextSlot::Cell(cell) => cell.text(),
            TextSlot::ReadOnly(text) => text,
        }
    }

    /// Strip leading and trailing whitespace, writing back only on change.
    pub fn trim(self) -> Trimmed {
        match self {
            TextSlot::ReadOnly(_) => Trimmed::ReadOnly,
            TextSlot::Owned(text) => trim_string(text),
            TextSlot::Cell(cell) => {
                let trimmed = cell.text().trim();
                if trimmed.len() == cell.text().len() {
                    return Trimmed::Unchanged;
                }
                let trimmed = trimmed.to_string();
                cell.replace(trimmed);
                Trimmed::Rewritten
            }
            TextSlot::Boxed(text) => {
                let trimmed = text.trim();
                if trimmed.len() == text.len() {
                    return Trimmed::Unchanged;
                }
                *text = Box::from(trimmed);
                Trimmed::Rewritten
            }
            TextSlot::Cow(text) => match text {
                Cow::Owned(owned) => trim_string(owned),
                Cow::Borrowed(borrowed) => {
                    let original: &'static str = *borrowed;
                    let trimmed = original.trim();
                    if trimmed.len() == original.len() {
                        return Trimmed::Unchanged;
                    }
                    *text = Cow::Borrowed(trimmed);
                    Trimmed::Rewritten
                }
            },
        }
    }
}

/// Trim in place without reallocating.
fn trim_string(text: &mut String) -> Trimmed {
    if text.trim().len() == text.len() {
        return Trimmed::Unchanged;
    }
    let end = text.trim_end().len();
    text.truncate(end);
    let start = text.len() - text.trim_start().len();
    text.drain(..start);
    Trimmed::Rewritten
}

/// A shared cell the walk may enter at most once per call.
pub trait Referent {
    fn identity(&self) -> Identity;

    /// Run `visit` against the referent with exclusive access.
    ///
    /// Returns `false` when the cell is already borrowed or locked; `visit`
    /// is not called in that case.
    fn enter(&self, visit: &mut dyn FnMut(&mut dyn Walk)) -> bool;
}

/// Associative storage that only offers whole-value read/write.
pub trait Entries {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detach each value bound to a snapshot of the current keys, hand it to
    /// `visit`, and bind the result back under the same key.
    ///
    /// The key set is identical before and after the call.
    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_owned_strips_mixed_whitespace() {
        let mut text = "  \t\n  hello  \t\n  ".to_string();
        assert_eq!(TextSlot::Owned(&mut text).trim(), Trimmed::Rewritten);
        assert_eq!(text, "hello");
    }

    #[test]
    fn trim_owned_whitespace_only_becomes_empty() {
        let mut text = "   ".to_string();
        assert_eq!(TextSlot::Owned(&mut text).trim(), Trimmed::Rewritten);
        assert_eq!(text, "");
    }

    #[test]
    fn trim_owned_keeps_capacity_and_reports_unchanged() {
        let mut text = "hello".to_string();
        let before = text.as_ptr();
        assert_eq!(TextSlot::Owned(&mut text).trim(), Trimmed::Unchanged);
        assert_eq!(text.as_ptr(), before);
    }

    #[test]
    fn trim_handles_unicode_whitespace() {
        let mut text = "\u{3000}naïve\u{2003}".to_string();
        TextSlot::Owned(&mut text).trim();
        assert_eq!(text, "naïve");
    }

    #[test]
    fn trim_borrowed_cow_stays_borrowed() {
        let mut text: Cow<'static, str> = Cow::Borrowed("  static  ");
        assert_eq!(TextSlot::Cow(&mut text).trim(), Trimmed::Rewritten);
        assert!(matches!(text, Cow::Borrowed("static")));
    }

    #[test]
    fn trim_boxed_str() {
        let mut text: Box<str> = Box::from(" boxed ");
        assert_eq!(TextSlot::Boxed(&mut text).trim(), Trimmed::Rewritten);
        assert_eq!(&*text, "boxed");
    }

    struct Quoted {
        inner: String,
        replaced: usize,
    }

    impl TextCell for Quoted {
        fn text(&self) -> &str {
            &self.inner
        }

        fn replace(&mut self, text: String) {
            self.inner = text;
            self.replaced += 1;
        }
    }

    #[test]
    fn cell_text_is_replaced_only_on_change() {
        let mut cell = Quoted {
            inner: " padded ".to_string(),
            replaced: 0,
        };
        assert_eq!(TextSlot::Cell(&mut cell).trim(), Trimmed::Rewritten);
        assert_eq!(TextSlot::Cell(&mut cell).trim(), Trimmed::Unchanged);
        assert_eq!(cell.inner, "padded");
        assert_eq!(cell.replaced, 1);
    }

    #[test]
    fn read_only_text_is_never_rewritten() {
        let slot = TextSlot::ReadOnly("  frozen  ");
        assert_eq!(slot.as_str(), "  frozen  ");
        assert_eq!(slot.trim(), Trimmed::ReadOnly);
    }
}
