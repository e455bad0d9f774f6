use crate::core::rules::{builtin_rule, LinearRule, RuleTable};
use crate::core::{ConfigProvider, SettingsRule};
use crate::domain::model::{Material, Process, RecommendedSettings, Thickness, WeldSettings};

/// Recommends machine settings from the built-in rule table.
///
/// Never fails: pairs without a rule get [`RecommendedSettings::unavailable`].
pub fn recommend(process: Process, material: Material, thickness: Thickness) -> RecommendedSettings {
    builtin_rule(process, material)
        .map(|rule| rule.derive(thickness))
        .into()
}

#[derive(Debug)]
pub struct SettingsAdvisor {
    rules: RuleTable,
}

impl SettingsAdvisor {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn builtin() -> Self {
        Self::new(RuleTable::builtin())
    }

    /// Built-in rules plus the ones named in `config`; a configured rule
    /// replaces a built-in one for the same pair.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut rules = RuleTable::builtin();

        for def in config.rules() {
            let replaced = rules.insert(def.process, def.material, LinearRule::from(def));
            if replaced.is_some() {
                tracing::info!(
                    "Configured rule for {}/{} replaces the existing one",
                    def.process,
                    def.material
                );
            } else {
                tracing::debug!("Added rule for {}/{}", def.process, def.material);
            }
        }

        tracing::debug!("Advisor ready with {} rule(s)", rules.len());
        Self::new(rules)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn derive(
        &self,
        process: Process,
        material: Material,
        thickness: Thickness,
    ) -> Option<WeldSettings> {
        match self.rules.get(process, material) {
            Some(rule) => {
                tracing::debug!("Rule hit for {}/{} at {}", process, material, thickness);
                Some(rule.derive(thickness))
            }
            None => {
                tracing::debug!("No rule for {}/{}", process, material);
                None
            }
        }
    }

    pub fn recommend(
        &self,
        process: Process,
        material: Material,
        thickness: Thickness,
    ) -> RecommendedSettings {
        self.derive(process, material, thickness).into()
    }
}

impl Default for SettingsAdvisor {
    fn default() -> Self {
        Self::builtin()
    }
}
