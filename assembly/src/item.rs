//! Work items and their fixed processing costs.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Small,
    Medium,
    Large,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Small, ItemKind::Medium, ItemKind::Large];

    /// Unscaled time one item of this kind takes to process.
    pub fn base_cost(self) -> Duration {
        match self {
            ItemKind::Small => Duration::from_millis(100),
            ItemKind::Medium => Duration::from_millis(150),
            ItemKind::Large => Duration::from_millis(200),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Small => "Small",
            ItemKind::Medium => "Medium",
            ItemKind::Large => "Large",
        }
    }
}

/// One unit of work. Ids are 1-based within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub kind: ItemKind,
    pub id: usize,
}

impl Item {
    pub fn new(kind: ItemKind, id: usize) -> Self {
        Self { kind, id }
    }

    /// Scaled cost. Saturates at `Duration::MAX`; negative or NaN scales cost nothing.
    pub fn cost(&self, time_scale: f64) -> Duration {
        let secs = self.kind.base_cost().as_secs_f64() * time_scale;
        match Duration::try_from_secs_f64(secs) {
            Ok(cost) => cost,
            Err(_) if secs > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        }
    }

    /// Block the calling thread for this item's scaled cost.
    pub fn process(&self, time_scale: f64) {
        thread::sleep(self.cost(time_scale));
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind.label(), self.id)
    }
}

/// `per_kind` items of every kind, grouped by kind.
pub fn build_items(per_kind: usize) -> Vec<Item> {
    ItemKind::ALL
        .into_iter()
        .flat_map(|kind| (1..=per_kind).map(move |id| Item::new(kind, id)))
        .collect()
}
