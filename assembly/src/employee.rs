//! Workers with a shared-safe processed counter.

use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
pub struct Employee {
    pub id: usize,
    processed: Mutex<usize>,
}

impl Employee {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            processed: Mutex::new(0),
        }
    }

    pub fn increment(&self) {
        *self.processed.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }

    pub fn count(&self) -> usize {
        *self.processed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
