//! This module provides the metabolite struct representing a metabolite
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Represents a metabolite
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
}

impl Metabolite {
    /// Create a metabolite with only an id
    pub fn with_id(id: &str) -> Metabolite {
        Metabolite {
            id: id.to_string(),
            name: None,
            compartment: None,
            charge: 0,
            formula: None,
        }
    }
}

impl Display for Metabolite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.compartment {
            Some(compartment) => write!(f, "{}[{}]", self.id, compartment),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let glc = MetaboliteBuilder::default()
            .id("glc__D".to_string())
            .compartment(Some("e".to_string()))
            .build()
            .unwrap();
        assert_eq!(format!("{}", glc), "glc__D[e]");
        assert_eq!(format!("{}", Metabolite::with_id("atp")), "atp");
    }
}
