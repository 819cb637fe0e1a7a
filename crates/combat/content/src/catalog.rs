//! Action catalog: skills and items as data.

use std::collections::HashMap;

use combat_core::{
    ActionContext, ActionError, ActionProfile, ActionTags, CombatAction, CombatantId,
};

use crate::effect::{Effect, EffectKind};

/// One catalog action: a profile and the effects it resolves, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub profile: ActionProfile,
    pub effects: Vec<Effect>,
}

impl CatalogEntry {
    pub fn new(profile: ActionProfile, effects: Vec<Effect>) -> Self {
        Self { profile, effects }
    }

    /// Sum of `base × hits` over every damage effect, before multipliers.
    pub fn nominal_damage(&self) -> f32 {
        self.effects
            .iter()
            .map(|effect| match effect.kind {
                EffectKind::Damage { base, hits } => base * hits as f32,
                _ => 0.0,
            })
            .sum()
    }
}

impl CombatAction for CatalogEntry {
    fn profile(&self) -> &ActionProfile {
        &self.profile
    }

    fn apply(
        &self,
        ctx: &mut ActionContext<'_>,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<(), ActionError> {
        for effect in &self.effects {
            tracing::trace!(action = %self.profile.name, kind = ?effect.kind, "resolving effect");
            effect.resolve(ctx, user, target)?;
        }
        Ok(())
    }
}

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate action name '{0}'")]
    DuplicateName(String),

    #[error("Action '{0}' has no effects")]
    NoEffects(String),

    #[error("Action '{name}' has invalid cost {cost}")]
    InvalidCost { name: String, cost: f32 },
}

/// Actions by name, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let name = &entry.profile.name;
            if entry.effects.is_empty() {
                return Err(CatalogError::NoEffects(name.clone()));
            }
            let cost = entry.profile.cost;
            if !cost.is_finite() || cost < 0.0 {
                return Err(CatalogError::InvalidCost {
                    name: name.clone(),
                    cost,
                });
            }
            if by_name.insert(name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateName(name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.profile.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter()
    }

    /// Entries carrying every flag in `tags`.
    pub fn tagged(&self, tags: ActionTags) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.profile.tags.contains(tags))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::TargetConstraint;

    fn strike(name: &str) -> CatalogEntry {
        CatalogEntry::new(
            ActionProfile::new(name, TargetConstraint::Enemy).with_tags(ActionTags::ATTACK),
            vec![Effect::on_target(EffectKind::Damage { base: 10.0, hits: 1 })],
        )
    }

    #[test]
    fn lookup_preserves_declaration_order() {
        let catalog = Catalog::new(vec![strike("Jab"), strike("Hook")]).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Jab", "Hook"]);
        assert!(catalog.contains("Hook"));
        assert!(catalog.get("Uppercut").is_none());
        assert_eq!(catalog.tagged(ActionTags::ATTACK).count(), 2);
        assert_eq!(catalog.tagged(ActionTags::HEAL).count(), 0);
    }

    #[test]
    fn nominal_damage_counts_every_hit() {
        let mut flurry = strike("Flurry");
        flurry.effects = vec![
            Effect::on_target(EffectKind::Damage { base: 8.0, hits: 3 }),
            Effect::on_target(EffectKind::ResetGauge),
        ];
        assert_eq!(flurry.nominal_damage(), 24.0);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert_eq!(
            Catalog::new(vec![strike("Jab"), strike("Jab")]).unwrap_err(),
            CatalogError::DuplicateName("Jab".into())
        );

        let mut empty = strike("Feint");
        empty.effects.clear();
        assert_eq!(
            Catalog::new(vec![empty]).unwrap_err(),
            CatalogError::NoEffects("Feint".into())
        );

        let mut pricey = strike("Gamble");
        pricey.profile.cost = -1.0;
        assert!(matches!(
            Catalog::new(vec![pricey]),
            Err(CatalogError::InvalidCost { .. })
        ));
    }
}
