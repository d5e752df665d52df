//! Resource registry and authorization list.
//!
//! A [`Resource`] is one controllable seat/room slot, grantable to one card
//! at a time. Occupancy is derived from the owner field, so the invariant
//! "owner is set iff occupied" holds by construction and cannot be violated
//! by any sequence of registry operations.

use seatgate_core::{CardUid, Error, Result};
use serde::{Deserialize, Serialize};

/// One controllable seat/room/actuator slot.
///
/// A resource is occupied exactly when it has an owner; there is no separate
/// occupancy flag to drift out of sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resource {
    owner: Option<CardUid>,
}

impl Resource {
    /// Whether this resource is currently assigned.
    #[must_use]
    pub fn occupied(&self) -> bool {
        self.owner.is_some()
    }

    /// The card currently holding this resource, if any.
    ///
    /// This is the only card permitted to release the resource.
    #[must_use]
    pub fn owner(&self) -> Option<&CardUid> {
        self.owner.as_ref()
    }
}

/// Ordered set of cards authorized at startup.
///
/// Card *i* is the designated requester for resource *i*. The list is
/// immutable for the process lifetime; there is no dynamic enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationList(Vec<CardUid>);

impl AuthorizationList {
    /// Create an authorization list with validation.
    ///
    /// # Errors
    /// Returns `Error::Config` if the list is empty or contains the same
    /// card twice (a card can be bound to at most one resource).
    pub fn new(cards: Vec<CardUid>) -> Result<Self> {
        if cards.is_empty() {
            return Err(Error::Config(
                "Authorization list must contain at least one card".to_string(),
            ));
        }

        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(Error::Config(format!(
                    "Card {card} appears more than once in authorization list"
                )));
            }
        }

        Ok(AuthorizationList(cards))
    }

    /// Number of authorized cards (equals the resource count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the resource this card is bound to, if authorized.
    #[must_use]
    pub fn position(&self, card: &CardUid) -> Option<usize> {
        self.0.iter().position(|c| c == card)
    }

    /// The card bound to a given resource index.
    #[must_use]
    pub fn card_for(&self, index: usize) -> Option<&CardUid> {
        self.0.get(index)
    }

    /// Iterate over enrolled cards in resource order.
    pub fn iter(&self) -> impl Iterator<Item = &CardUid> {
        self.0.iter()
    }
}

/// In-memory table of resources, indexed by position.
///
/// Created once at startup and mutated only through [`assign`](Self::assign)
/// and [`release`](Self::release), which the decision engine drives. Nothing
/// is persisted across restarts.
///
/// # Thread Safety
///
/// Not thread-safe by design: assignment is a read-then-mutate sequence, so
/// an embedding with more than one logical thread of control must serialize
/// all registry access behind a single critical section.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    /// Create a registry of `count` free resources.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            resources: vec![Resource::default(); count],
        }
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Look up a resource by index.
    #[must_use]
    pub fn resource(&self, index: usize) -> Option<&Resource> {
        self.resources.get(index)
    }

    /// Whether the resource at `index` is occupied. Out-of-range is free.
    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.resources.get(index).is_some_and(Resource::occupied)
    }

    /// The first resource owned by `card`, scanning in index order.
    #[must_use]
    pub fn owned_by(&self, card: &CardUid) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| r.owner().is_some_and(|owner| owner == card))
    }

    /// Whether every resource is currently occupied.
    #[must_use]
    pub fn all_occupied(&self) -> bool {
        self.resources.iter().all(Resource::occupied)
    }

    /// Occupancy of every resource in index order.
    ///
    /// This is the authoritative view an actuator driver must restore to
    /// after any transient flash sequence.
    pub fn occupancy(&self) -> impl Iterator<Item = bool> + '_ {
        self.resources.iter().map(Resource::occupied)
    }

    /// Assign a free resource to `card`.
    ///
    /// # Errors
    /// Returns `Error::InvalidResource` for an out-of-range index and
    /// `Error::ResourceOccupied` if the slot already has an owner; the
    /// decision engine never requests either, so seeing one indicates an
    /// internal consistency fault in the caller.
    pub fn assign(&mut self, index: usize, card: CardUid) -> Result<()> {
        let max = self.resources.len().saturating_sub(1);
        let resource = self
            .resources
            .get_mut(index)
            .ok_or(Error::InvalidResource { index, max })?;

        if resource.owner.is_some() {
            return Err(Error::ResourceOccupied { index });
        }

        resource.owner = Some(card);
        Ok(())
    }

    /// Release an occupied resource, returning the previous owner.
    ///
    /// # Errors
    /// Returns `Error::InvalidResource` for an out-of-range index and
    /// `Error::ResourceVacant` if the slot has no owner.
    pub fn release(&mut self, index: usize) -> Result<CardUid> {
        let max = self.resources.len().saturating_sub(1);
        let resource = self
            .resources
            .get_mut(index)
            .ok_or(Error::InvalidResource { index, max })?;

        resource
            .owner
            .take()
            .ok_or(Error::ResourceVacant { index })
    }
}
