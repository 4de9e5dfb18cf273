//! This module provides a struct for representing reactions
use crate::configuration::read_configuration;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "read_configuration(|c| c.lower_bound)")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "read_configuration(|c| c.upper_bound)")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::CONFIGURATION;

    #[test]
    fn default_bounds_come_from_configuration() {
        let rxn = ReactionBuilder::default()
            .id("R".to_string())
            .build()
            .unwrap();
        let config = CONFIGURATION.read().unwrap();
        assert_eq!(rxn.lower_bound, config.lower_bound);
        assert_eq!(rxn.upper_bound, config.upper_bound);
    }
}
