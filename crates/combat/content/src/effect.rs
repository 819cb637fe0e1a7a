//! Data-defined effects.
//!
//! A catalog action is a list of [`Effect`]s resolved in order. Each effect
//! names what happens ([`EffectKind`]) and to whom ([`Recipient`]).
//! Recipient sets are computed when the effect resolves, so an earlier
//! effect that kills someone removes them from later `All*` effects.

use combat_core::{ActionContext, ActionError, CombatantId, InvalidTargetReason, StatusType};

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recipient {
    /// The validated target of the action.
    #[default]
    Target,
    /// The combatant using the action.
    User,
    /// Every living enemy of the user.
    AllEnemies,
    /// Every living ally of the user, the user included.
    AllAllies,
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// `hits` separate hits of `base × user.attack_multiplier` each.
    Damage {
        base: f32,
        #[cfg_attr(feature = "serde", serde(default = "single_hit"))]
        hits: u32,
    },
    HealHealth { amount: f32 },
    HealSanity { amount: f32 },
    /// Restores health and sanity to their maximum.
    FullRestore,
    ApplyStatus { status: StatusType, duration: u32 },
    RemoveStatus { status: StatusType },
    /// Removes every negative status, keeping buffs.
    ClearDebuffs,
    ClearStatuses,
    ResetGauge,
    FillGauge,
    /// The user guards its whole side. The recipient is ignored.
    Guard,
    /// The user guards each recipient.
    GuardTarget,
}

#[cfg(feature = "serde")]
fn single_hit() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub to: Recipient,
}

impl Effect {
    pub fn new(kind: EffectKind, to: Recipient) -> Self {
        Self { kind, to }
    }

    pub fn on_target(kind: EffectKind) -> Self {
        Self::new(kind, Recipient::Target)
    }

    /// Resolves this effect against the encounter.
    pub fn resolve(
        &self,
        ctx: &mut ActionContext<'_>,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<(), ActionError> {
        if self.kind == EffectKind::Guard {
            return ctx.activate_guard(user).map(|_| ());
        }

        for recipient in self.recipients(ctx, user, target)? {
            self.resolve_on(ctx, user, recipient)?;
        }
        Ok(())
    }

    fn recipients(
        &self,
        ctx: &ActionContext<'_>,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<Vec<CombatantId>, ActionError> {
        match self.to {
            Recipient::Target => {
                let target = target.ok_or(ActionError::InvalidTarget {
                    user,
                    target,
                    reason: InvalidTargetReason::Missing,
                })?;
                Ok(vec![target])
            }
            Recipient::User => Ok(vec![user]),
            Recipient::AllEnemies => Ok(ctx.living_enemies_of(user)),
            Recipient::AllAllies => Ok(ctx.living_allies_of(user)),
        }
    }

    fn resolve_on(
        &self,
        ctx: &mut ActionContext<'_>,
        user: CombatantId,
        recipient: CombatantId,
    ) -> Result<(), ActionError> {
        match self.kind {
            EffectKind::Damage { base, hits } => {
                for _ in 0..hits {
                    let amount = ctx.calculate_damage(base, user);
                    ctx.take_damage(recipient, amount);
                }
            }
            EffectKind::HealHealth { amount } => {
                ctx.heal_health(recipient, amount);
            }
            EffectKind::HealSanity { amount } => {
                ctx.heal_sanity(recipient, amount);
            }
            EffectKind::FullRestore => {
                if let Some(c) = ctx.combatant(recipient) {
                    let (health, sanity) =
                        (c.max_health() - c.health(), c.max_sanity() - c.sanity());
                    ctx.heal_health(recipient, health);
                    ctx.heal_sanity(recipient, sanity);
                }
            }
            EffectKind::ApplyStatus { status, duration } => {
                ctx.apply_status(recipient, status, duration);
            }
            EffectKind::RemoveStatus { status } => {
                ctx.remove_status(recipient, status);
            }
            EffectKind::ClearDebuffs => {
                ctx.clear_negative_statuses(recipient);
            }
            EffectKind::ClearStatuses => {
                ctx.clear_statuses(recipient);
            }
            EffectKind::ResetGauge => {
                ctx.reset_action(recipient);
            }
            EffectKind::FillGauge => {
                ctx.fill_action(recipient);
            }
            EffectKind::GuardTarget => {
                ctx.guard_ally(user, recipient)?;
            }
            EffectKind::Guard => {
                ctx.activate_guard(user)?;
            }
        }
        Ok(())
    }
}
