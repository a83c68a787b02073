//! Checked exchange of two values behind type-erased handles.
//!
//! Unlike the trim walk, this utility fails fast: a missing handle or a type
//! mismatch aborts the exchange before anything is touched.

use std::any::{Any, type_name};
use std::fmt;

/// Position of an argument in an exchange call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("exchange: {0} argument is null")]
    Null(Side),

    #[error("exchange: type mismatch: {left} != {right}")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
}

/// A value that can trade places with another value of the same type.
///
/// Implemented for every `'static` type.
pub trait Exchange: Any {
    fn type_label(&self) -> &'static str;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Swap contents with `other` if both have the same concrete type.
    fn exchange_with(&mut self, other: &mut (dyn Exchange + 'static))
    -> Result<(), ExchangeError>;
}

impl<T: Any> Exchange for T {
    fn type_label(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn exchange_with(
        &mut self,
        other: &mut (dyn Exchange + 'static),
    ) -> Result<(), ExchangeError> {
        // Dispatch through the trait object, not the blanket impl on the handle.
        let right = (*other).type_label();
        match (*other).as_any_mut().downcast_mut::<T>() {
            Some(other) => {
                std::mem::swap(self, other);
                Ok(())
            }
            None => Err(ExchangeError::TypeMismatch {
                left: type_name::<T>(),
                right,
            }),
        }
    }
}

/// Exchange the referents of two handles, reporting why it was refused.
///
/// The handles themselves are never moved; only the values behind them are.
pub fn try_exchange(
    first: Option<&mut (dyn Exchange + 'static)>,
    second: Option<&mut (dyn Exchange + 'static)>,
) -> Result<(), ExchangeError> {
    let first = first.ok_or(ExchangeError::Null(Side::First))?;
    let second = second.ok_or(ExchangeError::Null(Side::Second))?;
    (*first).exchange_with(second)
}

/// Exchange the referents of two handles.
///
/// # Panics
///
/// Panics with the [`ExchangeError`] diagnostic if either handle is missing
/// or the two values differ in type.
pub fn exchange(
    first: Option<&mut (dyn Exchange + 'static)>,
    second: Option<&mut (dyn Exchange + 'static)>,
) {
    if let Err(err) = try_exchange(first, second) {
        panic!("{err}");
    }
}
