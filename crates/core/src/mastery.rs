//! Skill mastery ledger semantics.
//!
//! Completing a lesson or practice problem awards each of its attached
//! (skill, gain) pairs to the user's ledger. Gains are additive and always
//! positive, so a learning level never decreases. Levels are deliberately
//! not clamped at 1.0: content describes them as a 0-to-1 scale, but a user
//! who keeps earning gains simply keeps accumulating.

use std::collections::BTreeMap;

use crate::types::DbId;

/// A (skill, gain) pair attached to a lesson or practice problem.
///
/// `gain` is the amount added to the user's learning level on first
/// completion of the item; content validation keeps it in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkillGain {
    pub skill_id: DbId,
    pub gain: f64,
}

/// Collapse (skill name, ledger level) rows into a learning-level snapshot.
///
/// Rows carry `None` for skills the user has no ledger entry for; those
/// default to 0.0 so a brand-new user still gets a complete snapshot. Never
/// fails, whatever the user's history.
pub fn level_snapshot(
    rows: impl IntoIterator<Item = (String, Option<f64>)>,
) -> BTreeMap<String, f64> {
    rows.into_iter()
        .map(|(name, level)| (name, level.unwrap_or(0.0)))
        .collect()
}
