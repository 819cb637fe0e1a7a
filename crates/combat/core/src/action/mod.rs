//! Action catalog contract.
//!
//! A catalog action is a [`CombatAction`]: a static [`ActionProfile`] plus an
//! `apply` strategy that manipulates the encounter exclusively through
//! [`ActionContext`]. [`Encounter::perform`](crate::Encounter::perform)
//! validates the user and target before the strategy runs.

mod error;
mod profile;
mod targeting;

pub use error::{ActionError, InvalidTargetReason};
pub use profile::{ActionProfile, ActionTags};
pub use targeting::{TargetConstraint, resolve_target};

use crate::encounter::ActionContext;
use crate::state::CombatantId;

/// A skill or item usable during a turn.
///
/// `target` has already been validated against the profile when `apply` is
/// called: it is `Some` whenever `requires_target` is set, and equals `user`
/// for [`TargetConstraint::SelfOnly`].
pub trait CombatAction {
    fn profile(&self) -> &ActionProfile;

    fn apply(
        &self,
        ctx: &mut ActionContext<'_>,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<(), ActionError>;

    fn name(&self) -> &str {
        &self.profile().name
    }
}

impl<T: CombatAction + ?Sized> CombatAction for &T {
    fn profile(&self) -> &ActionProfile {
        (**self).profile()
    }

    fn apply(
        &self,
        ctx: &mut ActionContext<'_>,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<(), ActionError> {
        (**self).apply(ctx, user, target)
    }
}
