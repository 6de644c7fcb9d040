//! The two comparison slots and their contents.

use std::fmt;

use crate::catalog::models::RunId;

use super::resolver::ScenarioPayload;

/// One of the two fixed comparison positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotIndex {
    /// The left-hand slot.
    One,
    /// The right-hand slot.
    Two,
}

impl SlotIndex {
    /// Both slots in display order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Returns the 1-based slot number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Maps a 1-based slot number to a slot.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.number())
    }
}

/// A value held once per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerSlot<T> {
    one: T,
    two: T,
}

impl<T> PerSlot<T> {
    /// Returns the value for `slot`.
    #[must_use]
    pub const fn get(&self, slot: SlotIndex) -> &T {
        match slot {
            SlotIndex::One => &self.one,
            SlotIndex::Two => &self.two,
        }
    }

    /// Returns the value for `slot` mutably.
    pub const fn get_mut(&mut self, slot: SlotIndex) -> &mut T {
        match slot {
            SlotIndex::One => &mut self.one,
            SlotIndex::Two => &mut self.two,
        }
    }
}

/// Content of one slot: the empty sentinel or a whole resolved payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotContent {
    /// Nothing resolved.
    #[default]
    Empty,
    /// A resolved scenario payload.
    Populated(Box<ScenarioPayload>),
}

impl SlotContent {
    /// Returns the payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&ScenarioPayload> {
        match self {
            Self::Empty => None,
            Self::Populated(payload) => Some(payload),
        }
    }

    /// Returns the scenario identifier, or `None` for the empty sentinel.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.payload().map(|payload| payload.id.as_str())
    }

    /// Returns the run the content was resolved from.
    #[must_use]
    pub fn run_id(&self) -> Option<&RunId> {
        self.payload().map(|payload| &payload.run_id)
    }

    /// Whether the slot's panel is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Populated(_))
    }
}

/// Storage for the two slots of a comparison session.
///
/// Writes replace a slot whole and bump its revision; the other slot is
/// never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotStore {
    contents: PerSlot<SlotContent>,
    revisions: PerSlot<u64>,
}

impl SlotStore {
    /// Creates a store with both slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content of `slot`.
    #[must_use]
    pub const fn get(&self, slot: SlotIndex) -> &SlotContent {
        self.contents.get(slot)
    }

    /// Replaces the content of `slot` with `payload`.
    pub fn set(&mut self, slot: SlotIndex, payload: ScenarioPayload) {
        *self.contents.get_mut(slot) = SlotContent::Populated(Box::new(payload));
        self.bump(slot);
    }

    /// Resets `slot` to the empty sentinel.
    pub fn clear(&mut self, slot: SlotIndex) {
        *self.contents.get_mut(slot) = SlotContent::Empty;
        self.bump(slot);
    }

    /// Number of writes applied to `slot` so far.
    #[must_use]
    pub const fn revision(&self, slot: SlotIndex) -> u64 {
        *self.revisions.get(slot)
    }

    fn bump(&mut self, slot: SlotIndex) {
        let revision = self.revisions.get_mut(slot);
        *revision = revision.saturating_add(1);
    }
}
