//! Target constraints and validation.

use crate::state::{CombatantId, Roster};

use super::error::{ActionError, InvalidTargetReason};
use super::profile::ActionProfile;

/// Which combatants an action may be aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetConstraint {
    /// Same side as the user (the user included).
    Ally,
    /// Opposite side.
    Enemy,
    /// Anyone.
    #[default]
    Any,
    /// The user only. A supplied target is ignored.
    SelfOnly,
}

/// Resolves and validates the target of `profile` used by `user`.
///
/// - `SelfOnly` always resolves to the user.
/// - A missing target is only an error when `requires_target` is set.
/// - A supplied target must exist, be alive, and satisfy the side constraint.
pub fn resolve_target(
    roster: &Roster,
    profile: &ActionProfile,
    user: CombatantId,
    target: Option<CombatantId>,
) -> Result<Option<CombatantId>, ActionError> {
    let user_side = roster
        .get(user)
        .ok_or(ActionError::UnknownCombatant { id: user })?
        .side();

    if profile.target == TargetConstraint::SelfOnly {
        return Ok(Some(user));
    }

    let invalid = |reason| ActionError::InvalidTarget {
        user,
        target,
        reason,
    };

    let Some(id) = target else {
        return if profile.requires_target {
            Err(invalid(InvalidTargetReason::Missing))
        } else {
            Ok(None)
        };
    };

    let combatant = roster
        .get(id)
        .ok_or_else(|| invalid(InvalidTargetReason::Unknown))?;
    if combatant.is_dead() {
        return Err(invalid(InvalidTargetReason::Dead));
    }

    let side_ok = match profile.target {
        TargetConstraint::Ally => combatant.side() == user_side,
        TargetConstraint::Enemy => combatant.side() != user_side,
        TargetConstraint::Any | TargetConstraint::SelfOnly => true,
    };
    if !side_ok {
        return Err(invalid(InvalidTargetReason::WrongSide));
    }

    Ok(Some(id))
}
