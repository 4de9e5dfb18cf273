//! This module provides the Gene struct, representing a gene and its product
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human Readable Gene Name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Molar mass of the gene product (the enzyme subunit encoded by the gene)
    #[builder(default = "None")]
    pub product_molar_mass: Option<f64>,
    /// Notes about the gene
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Gene Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Gene {
    pub fn new(id: String, name: Option<String>, product_molar_mass: Option<f64>) -> Gene {
        Gene {
            id,
            name,
            product_molar_mass,
            notes: None,
            annotation: None,
        }
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let gene = GeneBuilder::default()
            .id("b0001".to_string())
            .build()
            .unwrap();
        assert_eq!(gene.product_molar_mass, None);
        assert_eq!(gene.name, None);
        assert_eq!(format!("{}", gene), "b0001");
    }

    #[test]
    fn new_gene() {
        let gene = Gene::new("b0002".to_string(), Some("thrA".to_string()), Some(89.1));
        assert_eq!(gene.product_molar_mass, Some(89.1));
        assert_eq!(gene.name.as_deref(), Some("thrA"));
    }
}
