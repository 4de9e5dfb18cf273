//! Parameters describing the enzymes available to a model
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::enzymes::isozyme::IsozymeCatalogue;

/// Everything needed to add enzyme constraints to a model
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use ecmodel_core::enzymes::isozyme::Isozyme;
/// use ecmodel_core::enzymes::parameters::{
///     EnzymeParametersBuilder, IsozymeStrategy, MassGroups, MissingGeneBounds,
/// };
/// let params = EnzymeParametersBuilder::default()
///     .isozymes(IndexMap::from([(
///         "PGI".to_string(),
///         vec![Isozyme::new(&[("b4025", 1.0)], Some(126.), Some(126.))],
///     )]))
///     .molar_masses(IndexMap::from([("b4025".to_string(), 61.5)]))
///     .missing_gene_bounds(MissingGeneBounds::Unconstrained)
///     .mass_groups(MassGroups::single("uncategorized", 0.5))
///     .strategy(IsozymeStrategy::BestIsozyme)
///     .build()
///     .unwrap();
/// assert_eq!(params.isozymes.len(), 1);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct EnzymeParameters {
    /// Isozymes of every enzyme catalyzed reaction
    pub isozymes: IsozymeCatalogue,
    /// Map of gene ids to the molar mass of the gene product
    pub molar_masses: IndexMap<String, f64>,
    /// Map of gene ids to (lower, upper) concentration bounds of the gene product
    #[builder(default = "IndexMap::new()")]
    pub gene_product_bounds: IndexMap<String, (f64, f64)>,
    /// What to do about gene products without an entry in `gene_product_bounds`
    pub missing_gene_bounds: MissingGeneBounds,
    /// Groups of gene products whose total mass is limited
    #[builder(default = "MassGroups::new()")]
    pub mass_groups: MassGroups,
    /// How reactions with several isozymes are handled
    #[builder(default = "IsozymeStrategy::AllIsozymes")]
    pub strategy: IsozymeStrategy,
}

/// Policy for gene products without caller supplied concentration bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingGeneBounds {
    /// Bound the concentration by (0, `gene_product_upper_bound` from the configuration), which
    /// is (0, infinity) unless changed
    Unconstrained,
    /// Refuse to build the model
    Error,
}

/// How isozymes are turned into columns of the enzyme constrained model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsozymeStrategy {
    /// Every isozyme gets its own columns, the solver distributes flux among them
    AllIsozymes,
    /// Only the isozyme with the best turnover per unit mass is kept, see
    /// [`select_best_isozyme`](crate::enzymes::isozyme::select_best_isozyme)
    BestIsozyme,
}

/// Named groups of gene products with a budget on their combined mass
///
/// A typical use is a single group holding all enzymes, bounded by the measured proteome
/// fraction available to metabolism.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MassGroups {
    /// Map of gene ids to the group they belong to
    pub membership: IndexMap<String, String>,
    /// Group of gene products not listed in `membership`, None leaves them out of every group
    pub default_group: Option<String>,
    /// Map of group names to the mass budget of the group, in row order
    pub budgets: IndexMap<String, f64>,
}

impl MassGroups {
    /// No mass groups at all
    pub fn new() -> Self {
        Self::default()
    }

    /// One group containing every gene product
    pub fn single(group: &str, budget: f64) -> Self {
        Self::new()
            .with_group(group, budget)
            .with_default_group(group)
    }

    /// Add a group with a mass budget
    pub fn with_group(mut self, group: &str, budget: f64) -> Self {
        self.budgets.insert(group.to_string(), budget);
        self
    }

    /// Put every gene product not assigned explicitly in `group`
    pub fn with_default_group(mut self, group: &str) -> Self {
        self.default_group = Some(group.to_string());
        self
    }

    /// Assign a gene product to a group
    pub fn assign(mut self, gene: &str, group: &str) -> Self {
        self.membership.insert(gene.to_string(), group.to_string());
        self
    }

    /// Group of a gene product, if any
    pub fn group_of(&self, gene: &str) -> Option<&str> {
        self.membership
            .get(gene)
            .or(self.default_group.as_ref())
            .map(|g| g.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_membership() {
        let groups = MassGroups::new()
            .with_group("membrane", 10.)
            .with_group("other", 90.)
            .assign("g1", "membrane")
            .with_default_group("other");
        assert_eq!(groups.group_of("g1"), Some("membrane"));
        assert_eq!(groups.group_of("g2"), Some("other"));
        assert_eq!(groups.budgets.get_index_of("other"), Some(1));

        let no_default = MassGroups::new().with_group("membrane", 10.).assign("g1", "membrane");
        assert_eq!(no_default.group_of("g2"), None);
    }

    #[test]
    fn single_group() {
        let groups = MassGroups::single("total", 0.3);
        assert_eq!(groups.group_of("anything"), Some("total"));
        assert_eq!(groups.budgets.len(), 1);
    }

    #[test]
    fn builder_requires_policy() {
        let missing_policy = EnzymeParametersBuilder::default()
            .isozymes(IndexMap::new())
            .molar_masses(IndexMap::new())
            .build();
        assert!(missing_policy.is_err());

        let params = EnzymeParametersBuilder::default()
            .isozymes(IndexMap::new())
            .molar_masses(IndexMap::new())
            .missing_gene_bounds(MissingGeneBounds::Error)
            .build()
            .unwrap();
        assert_eq!(params.strategy, IsozymeStrategy::AllIsozymes);
        assert!(params.mass_groups.budgets.is_empty());
        assert!(params.gene_product_bounds.is_empty());
    }
}
