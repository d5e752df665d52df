//! Access decision engine.
//!
//! [`decide`] is a pure, total function: every input, including an unknown
//! card, maps to a defined [`Outcome`]. Registry mutation happens separately
//! in [`apply`], so a caller can inspect or log a decision before committing
//! its side effects.
//!
//! # Evaluation order
//!
//! The precedence is part of the contract:
//!
//! 1. Release checks across *all* resources, in index order. A card that
//!    owns any resource releases it, regardless of what it is authorized
//!    for.
//! 2. Authorization lookup: the card bound to resource *i* gets `Assign(i)`
//!    if the resource is free, `AlreadyOccupied(i)` if not.
//! 3. Otherwise `Unauthorized`, with `all_full` set when every resource is
//!    occupied (feedback-only distinction, no state impact).
//!
//! Ownership is checked against the registry rather than inferred from the
//! card-to-resource binding, so `AlreadyOccupied` stays correct if a
//! deployment ever assigns resources outside the strict 1:1 mapping.

use crate::registry::{AuthorizationList, ResourceRegistry};
use seatgate_core::{CardUid, Result};

/// Categorical result of one card scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The card owns this resource; the scan releases it.
    Release(usize),

    /// The card is bound to this free resource; the scan assigns it.
    Assign(usize),

    /// The card is bound to this resource but a different card occupies it.
    /// Mutates nothing.
    AlreadyOccupied(usize),

    /// The card matches no authorization entry and owns no resource.
    /// Mutates nothing. `all_full` distinguishes the "every resource
    /// occupied" case, which changes feedback only.
    Unauthorized {
        all_full: bool,
    },
}

impl Outcome {
    /// The resource this outcome targets, if any.
    #[must_use]
    pub fn resource(&self) -> Option<usize> {
        match self {
            Outcome::Release(i) | Outcome::Assign(i) | Outcome::AlreadyOccupied(i) => Some(*i),
            Outcome::Unauthorized { .. } => None,
        }
    }

    /// Whether this outcome denies the request.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Outcome::AlreadyOccupied(_) | Outcome::Unauthorized { .. }
        )
    }

    /// Whether applying this outcome mutates the registry.
    #[must_use]
    pub fn mutates_registry(&self) -> bool {
        matches!(self, Outcome::Release(_) | Outcome::Assign(_))
    }
}

/// Classify a scanned card against the registry and authorization list.
///
/// Pure and total: no errors, no side effects. See the module docs for the
/// mandatory evaluation order.
#[must_use]
pub fn decide(
    scanned: &CardUid,
    registry: &ResourceRegistry,
    auth: &AuthorizationList,
) -> Outcome {
    // Release takes priority over everything: a card holding a resource
    // always gets to give it back.
    if let Some(index) = registry.owned_by(scanned) {
        return Outcome::Release(index);
    }

    if let Some(index) = auth.position(scanned) {
        return if registry.is_occupied(index) {
            Outcome::AlreadyOccupied(index)
        } else {
            Outcome::Assign(index)
        };
    }

    Outcome::Unauthorized {
        all_full: registry.all_occupied(),
    }
}

/// Commit an outcome's side effects to the registry.
///
/// `Release` clears the owner, `Assign` records `scanned` as owner,
/// rejections touch nothing.
///
/// # Errors
/// Propagates registry errors; with an outcome freshly produced by
/// [`decide`] against the same registry these cannot occur, and one
/// surfacing indicates the registry changed between decision and commit.
pub fn apply(outcome: Outcome, scanned: &CardUid, registry: &mut ResourceRegistry) -> Result<()> {
    match outcome {
        Outcome::Release(index) => {
            registry.release(index)?;
        }
        Outcome::Assign(index) => {
            registry.assign(index, *scanned)?;
        }
        Outcome::AlreadyOccupied(_) | Outcome::Unauthorized { .. } => {}
    }
    Ok(())
}
