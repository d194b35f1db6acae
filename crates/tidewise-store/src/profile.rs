//! Learned per-profile term weights.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which a term's weight is stored: trimmed and lowercased.
fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Mapping from lowercase term to a non-negative learned weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    weights: BTreeMap<String, f64>,
}

impl PreferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `term`, `0.0` when the term has never been seen.
    pub fn weight(&self, term: &str) -> f64 {
        self.weights
            .get(&normalize_term(term))
            .copied()
            .unwrap_or(0.0)
    }

    /// Adds `amount` to the weight of `term`, creating the entry at zero first.
    pub fn bump(&mut self, term: &str, amount: f64) {
        let term = normalize_term(term);
        if term.is_empty() {
            return;
        }
        let entry = self.weights.entry(term).or_insert(0.0);
        *entry = (*entry + amount).max(0.0);
    }

    /// Sets a weight directly. Negative and non-finite values are stored as zero.
    pub fn set(&mut self, term: &str, weight: f64) {
        let term = normalize_term(term);
        if term.is_empty() {
            return;
        }
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        self.weights.insert(term, weight);
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, weight)| (term.as_str(), *weight))
    }

    /// Terms ordered by descending weight, ties broken alphabetically.
    pub fn top_terms(&self, n: usize) -> Vec<(String, f64)> {
        let mut terms: Vec<(String, f64)> = self
            .weights
            .iter()
            .map(|(term, weight)| (term.clone(), *weight))
            .collect();
        // BTreeMap iteration is alphabetical and the sort is stable.
        terms.sort_by(|a, b| b.1.total_cmp(&a.1));
        terms.truncate(n);
        terms
    }
}

/// Decay and cap applied around each learning step.
///
/// The default (`decay = 1.0`, no cap) leaves weights growing without bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightPolicy {
    /// Multiplier applied to every existing weight before new increments.
    pub decay: f64,
    /// Upper bound applied after increments.
    pub cap: Option<f64>,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            decay: 1.0,
            cap: None,
        }
    }
}

impl WeightPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Rejects a decay outside `[0, 1]` or a negative or non-finite cap.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decay) {
            bail!("weight_policy.decay must be within [0, 1], got {}", self.decay);
        }
        if let Some(cap) = self.cap
            && !(cap.is_finite() && cap >= 0.0)
        {
            bail!("weight_policy.cap must be a non-negative number, got {}", cap);
        }
        Ok(())
    }

    pub fn is_unbounded(&self) -> bool {
        self.decay >= 1.0 && self.cap.is_none()
    }

    pub fn apply_decay(&self, profile: &mut PreferenceProfile) {
        if self.decay.is_nan() || self.decay >= 1.0 {
            return;
        }
        let factor = self.decay.clamp(0.0, 1.0);
        for weight in profile.weights.values_mut() {
            *weight *= factor;
        }
    }

    pub fn apply_cap(&self, profile: &mut PreferenceProfile) {
        if let Some(cap) = self.cap
            && !cap.is_nan()
        {
            let cap = cap.max(0.0);
            for weight in profile.weights.values_mut() {
                *weight = weight.min(cap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_creates_and_accumulates() {
        let mut profile = PreferenceProfile::new();
        profile.bump("Fish", 0.1);
        profile.bump("fish", 0.1);

        assert_eq!(profile.len(), 1);
        assert!((profile.weight("FISH") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_bump_ignores_blank_terms() {
        let mut profile = PreferenceProfile::new();
        profile.bump("   ", 0.1);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_set_rejects_negative() {
        let mut profile = PreferenceProfile::new();
        profile.set("kayak", -3.0);
        profile.set("paddle", f64::NAN);
        assert_eq!(profile.weight("kayak"), 0.0);
        assert_eq!(profile.weight("paddle"), 0.0);
    }

    #[test]
    fn test_padded_terms_share_one_key() {
        let mut profile = PreferenceProfile::new();
        profile.bump(" Fishing ", 0.5);
        profile.set("  Trout", 1.0);

        assert_eq!(profile.weight("fishing"), 0.5);
        assert_eq!(profile.weight(" Fishing"), 0.5);
        assert_eq!(profile.weight("trout "), 1.0);
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn test_top_terms_order() {
        let mut profile = PreferenceProfile::new();
        profile.set("beta", 1.0);
        profile.set("alpha", 1.0);
        profile.set("gamma", 2.0);

        let top = profile.top_terms(2);
        assert_eq!(top[0].0, "gamma");
        assert_eq!(top[1].0, "alpha");
    }

    #[test]
    fn test_default_policy_is_unbounded() {
        let policy = WeightPolicy::default();
        assert!(policy.is_unbounded());

        let mut profile = PreferenceProfile::new();
        profile.set("fish", 50.0);
        policy.apply_decay(&mut profile);
        policy.apply_cap(&mut profile);
        assert_eq!(profile.weight("fish"), 50.0);
    }

    #[test]
    fn test_decay_and_cap() {
        let policy = WeightPolicy {
            decay: 0.5,
            cap: Some(3.0),
        };

        let mut profile = PreferenceProfile::new();
        profile.set("fish", 10.0);
        profile.set("lake", 2.0);

        policy.apply_decay(&mut profile);
        assert_eq!(profile.weight("fish"), 5.0);
        assert_eq!(profile.weight("lake"), 1.0);

        policy.apply_cap(&mut profile);
        assert_eq!(profile.weight("fish"), 3.0);
        assert_eq!(profile.weight("lake"), 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_policies() {
        assert!(WeightPolicy::default().validate().is_ok());
        assert!(WeightPolicy { decay: 0.5, cap: Some(3.0) }.validate().is_ok());

        assert!(WeightPolicy { decay: f64::NAN, cap: None }.validate().is_err());
        assert!(WeightPolicy { decay: 1.5, cap: None }.validate().is_err());
        assert!(WeightPolicy { decay: -0.1, cap: None }.validate().is_err());
        assert!(WeightPolicy { decay: 1.0, cap: Some(-1.0) }.validate().is_err());
        assert!(WeightPolicy { decay: 1.0, cap: Some(f64::NAN) }.validate().is_err());
    }

    #[test]
    fn test_nan_decay_leaves_weights_untouched() {
        let policy = WeightPolicy {
            decay: f64::NAN,
            cap: None,
        };

        let mut profile = PreferenceProfile::new();
        profile.set("fish", 2.0);
        policy.apply_decay(&mut profile);
        policy.apply_cap(&mut profile);
        assert_eq!(profile.weight("fish"), 2.0);
    }
}
