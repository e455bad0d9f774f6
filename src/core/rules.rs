use crate::core::SettingsRule;
use crate::domain::model::{Material, Process, RuleDefinition, Thickness, WeldSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MIG_STEEL_GAS: &str = "75% Argon / 25% CO2";

/// Every output grows linearly with thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRule {
    pub volts_per_inch: f64,
    pub amps_per_inch: f64,
    pub wire_speed_per_inch: f64,
    pub gas: String,
}

impl LinearRule {
    pub fn new(
        volts_per_inch: f64,
        amps_per_inch: f64,
        wire_speed_per_inch: f64,
        gas: impl Into<String>,
    ) -> Self {
        Self {
            volts_per_inch,
            amps_per_inch,
            wire_speed_per_inch,
            gas: gas.into(),
        }
    }
}

impl From<&RuleDefinition> for LinearRule {
    fn from(def: &RuleDefinition) -> Self {
        Self::new(
            def.volts_per_inch,
            def.amps_per_inch,
            def.wire_speed_per_inch,
            def.gas.clone(),
        )
    }
}

impl SettingsRule for LinearRule {
    fn derive(&self, thickness: Thickness) -> WeldSettings {
        let t = thickness.inches();
        WeldSettings {
            voltage: t * self.volts_per_inch,
            amperage: t * self.amps_per_inch,
            wire_speed: t * self.wire_speed_per_inch,
            gas: self.gas.clone(),
        }
    }
}

/// The shipped rule for each pair. Every pair is listed so a new process or
/// material fails to compile until it is decided here.
pub fn builtin_rule(process: Process, material: Material) -> Option<LinearRule> {
    use Material::*;
    use Process::*;

    match (process, material) {
        (Mig, Steel) => Some(LinearRule::new(4.0, 30.0, 2.0, MIG_STEEL_GAS)),
        (Mig, Aluminum) | (Mig, Stainless) => None,
        (Tig, Steel) | (Tig, Aluminum) | (Tig, Stainless) => None,
        (Stick, Steel) | (Stick, Aluminum) | (Stick, Stainless) => None,
    }
}

/// Rules keyed by `(process, material)`; at most one rule per key.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: HashMap<(Process, Material), Box<dyn SettingsRule>>,
}

impl RuleTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for process in Process::ALL {
            for material in Material::ALL {
                if let Some(rule) = builtin_rule(process, material) {
                    table.insert(process, material, rule);
                }
            }
        }
        table
    }

    /// Adds a rule, returning the one it replaced.
    pub fn insert<R>(
        &mut self,
        process: Process,
        material: Material,
        rule: R,
    ) -> Option<Box<dyn SettingsRule>>
    where
        R: SettingsRule + 'static,
    {
        self.rules.insert((process, material), Box::new(rule))
    }

    pub fn get(&self, process: Process, material: Material) -> Option<&dyn SettingsRule> {
        self.rules.get(&(process, material)).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, process: Process, material: Material) -> bool {
        self.rules.contains_key(&(process, material))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Covered pairs in process, then material order.
    pub fn keys(&self) -> Vec<(Process, Material)> {
        let mut keys: Vec<_> = self.rules.keys().copied().collect();
        keys.sort();
        keys
    }
}
