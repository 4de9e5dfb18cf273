//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;
use crate::metabolic_model::traits::MetabolicModel;
use crate::utils::sparse::csc_from_triplets;

use indexmap::IndexMap;
use log::warn;
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;
use thiserror::Error;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene Objects
    pub genes: IndexMap<String, Gene>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Map of coupling constraint ids to coupling constraints
    pub coupling: IndexMap<String, CouplingConstraint>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

/// A linear constraint over reaction fluxes, in addition to the mass balance
///
/// Represents `lower_bound <= sum(coefficient * flux) <= upper_bound`
#[derive(Clone, Debug, PartialEq)]
pub struct CouplingConstraint {
    /// Map of reaction ids to coefficients
    pub coefficients: IndexMap<String, f64>,
    /// The lowest value the sum can take
    pub lower_bound: f64,
    /// The highest value the sum can take
    pub upper_bound: f64,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            genes: IndexMap::new(),
            metabolites: IndexMap::new(),
            objective: IndexMap::new(),
            coupling: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add, all of its metabolites must already be in the model
    ///
    /// # Examples
    /// ```rust
    /// use ecmodel_core::metabolic_model::model::Model;
    /// use ecmodel_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if let Some(met) = reaction
            .metabolites
            .keys()
            .find(|m| !self.metabolites.contains_key(*m))
        {
            return Err(ModelError::UnknownMetabolite {
                reaction: reaction.id.clone(),
                metabolite: met.clone(),
            });
        }
        if reaction.lower_bound > reaction.upper_bound {
            return Err(ModelError::InvalidReactionBounds(reaction.id.clone()));
        }
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
        Ok(())
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Add a metabolite with no information other than its id
    pub fn add_metabolite_id(&mut self, id: &str) {
        self.add_metabolite(Metabolite::with_id(id));
    }

    /// Add a gene to the model
    ///
    /// # Parameters
    /// - gene: Gene to add
    ///
    /// # Examples
    /// ```rust
    /// use ecmodel_core::metabolic_model::gene::GeneBuilder;
    /// use ecmodel_core::metabolic_model::model::Model;
    /// let mut model=Model::new_empty();
    /// let new_gene = GeneBuilder::default().id("new_gene".to_string()).build().unwrap();
    /// model.add_gene(new_gene);
    /// ```
    pub fn add_gene(&mut self, gene: Gene) {
        let id = gene.id.clone();
        self.genes.insert(id, gene);
    }

    /// Set the objective coefficient of a reaction
    pub fn set_objective_coefficient(
        &mut self,
        reaction_id: &str,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        if !self.reactions.contains_key(reaction_id) {
            return Err(ModelError::UnknownReaction(reaction_id.to_string()));
        }
        self.objective.insert(reaction_id.to_string(), coefficient);
        Ok(())
    }

    /// Add a coupling constraint to the model
    ///
    /// # Examples
    /// ```rust
    /// use indexmap::IndexMap;
    /// use ecmodel_core::metabolic_model::model::{CouplingConstraint, Model};
    /// use ecmodel_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// model.add_reaction(ReactionBuilder::default().id("R1".to_string()).build().unwrap()).unwrap();
    /// let mut coefficients = IndexMap::new();
    /// coefficients.insert("R1".to_string(), 1.0);
    /// let constraint = CouplingConstraint { coefficients, lower_bound: 0., upper_bound: 5. };
    /// model.add_coupling_constraint("R1_cap", constraint).unwrap();
    /// ```
    pub fn add_coupling_constraint(
        &mut self,
        id: &str,
        constraint: CouplingConstraint,
    ) -> Result<(), ModelError> {
        if self.coupling.contains_key(id) {
            return Err(ModelError::CouplingConstraintAlreadyExists(id.to_string()));
        }
        if let Some(rxn) = constraint
            .coefficients
            .keys()
            .find(|r| !self.reactions.contains_key(*r))
        {
            return Err(ModelError::UnknownReaction(rxn.clone()));
        }
        if constraint.lower_bound > constraint.upper_bound {
            return Err(ModelError::InvalidCouplingBounds(id.to_string()));
        }
        self.coupling.insert(id.to_string(), constraint);
        Ok(())
    }

    /// Collect the molar masses of gene products known to the model
    ///
    /// Genes without a molar mass are skipped.
    pub fn gene_product_molar_masses(&self) -> IndexMap<String, f64> {
        self.genes
            .values()
            .filter_map(|g| g.product_molar_mass.map(|mass| (g.id.clone(), mass)))
            .collect()
    }
}

impl MetabolicModel for Model {
    fn reactions(&self) -> Vec<String> {
        self.reactions.keys().cloned().collect()
    }

    fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    fn metabolites(&self) -> Vec<String> {
        self.metabolites.keys().cloned().collect()
    }

    fn n_metabolites(&self) -> usize {
        self.metabolites.len()
    }

    fn genes(&self) -> Vec<String> {
        self.genes.keys().cloned().collect()
    }

    fn n_genes(&self) -> usize {
        self.genes.len()
    }

    fn stoichiometry(&self) -> CscMatrix<f64> {
        let mut triplets = Vec::new();
        for (col, rxn) in self.reactions.values().enumerate() {
            for (met, coef) in &rxn.metabolites {
                match self.metabolites.get_index_of(met) {
                    Some(row) => triplets.push((row, col, *coef)),
                    None => warn!(
                        "Reaction {} references metabolite {} which is not in the model, skipping it",
                        rxn.id, met
                    ),
                }
            }
        }
        csc_from_triplets(self.metabolites.len(), self.reactions.len(), triplets)
    }

    fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
        let lower = DVector::from_iterator(
            self.reactions.len(),
            self.reactions.values().map(|r| r.lower_bound),
        );
        let upper = DVector::from_iterator(
            self.reactions.len(),
            self.reactions.values().map(|r| r.upper_bound),
        );
        (lower, upper)
    }

    fn objective(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.reactions.len(),
            self.reactions
                .keys()
                .map(|id| self.objective.get(id).copied().unwrap_or(0f64)),
        )
    }

    fn coupling(&self) -> CscMatrix<f64> {
        let mut triplets = Vec::new();
        for (row, (cons_id, cons)) in self.coupling.iter().enumerate() {
            for (rxn, coef) in &cons.coefficients {
                match self.reactions.get_index_of(rxn) {
                    Some(col) => triplets.push((row, col, *coef)),
                    None => warn!(
                        "Coupling constraint {} references reaction {} which is not in the model, skipping it",
                        cons_id, rxn
                    ),
                }
            }
        }
        csc_from_triplets(self.coupling.len(), self.reactions.len(), triplets)
    }

    fn n_coupling_constraints(&self) -> usize {
        self.coupling.len()
    }

    fn coupling_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        let lower = DVector::from_iterator(
            self.coupling.len(),
            self.coupling.values().map(|c| c.lower_bound),
        );
        let upper = DVector::from_iterator(
            self.coupling.len(),
            self.coupling.values().map(|c| c.upper_bound),
        );
        (lower, upper)
    }
}

/// Errors associated with building a Model
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Error when adding a reaction which uses a metabolite not in the model
    #[error("Reaction {reaction} uses metabolite {metabolite} which is not in the model")]
    UnknownMetabolite { reaction: String, metabolite: String },
    /// Error when referring to a reaction that is not in the model
    #[error("Reaction {0} is not in the model")]
    UnknownReaction(String),
    /// Error when adding a reaction with lower_bound > upper_bound
    #[error("Tried to add reaction {0} with lower_bound > upper_bound")]
    InvalidReactionBounds(String),
    /// Error when adding a coupling constraint with the same id as an existing one
    #[error("Tried to add a coupling constraint with the same id ({0}) as an existing one")]
    CouplingConstraintAlreadyExists(String),
    /// Error when adding a coupling constraint with lower_bound > upper_bound
    #[error("Tried to add coupling constraint {0} with lower_bound > upper_bound")]
    InvalidCouplingBounds(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::gene::GeneBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use nalgebra::DMatrix;

    fn setup_model() -> Model {
        // A -> B -> (exported), with uptake of A
        let mut model = Model::new_empty();
        model.add_metabolite_id("A");
        model.add_metabolite_id("B");

        let uptake = ReactionBuilder::default()
            .id("EX_A".to_string())
            .metabolites(IndexMap::from([("A".to_string(), 1.0)]))
            .lower_bound(0.)
            .upper_bound(10.)
            .build()
            .unwrap();
        let conversion = ReactionBuilder::default()
            .id("A_to_B".to_string())
            .metabolites(IndexMap::from([("A".to_string(), -1.0), ("B".to_string(), 2.0)]))
            .lower_bound(-5.)
            .upper_bound(5.)
            .build()
            .unwrap();
        let export = ReactionBuilder::default()
            .id("EX_B".to_string())
            .metabolites(IndexMap::from([("B".to_string(), -1.0)]))
            .lower_bound(0.)
            .upper_bound(1000.)
            .build()
            .unwrap();
        model.add_reaction(uptake).unwrap();
        model.add_reaction(conversion).unwrap();
        model.add_reaction(export).unwrap();
        model.set_objective_coefficient("EX_B", 1.0).unwrap();

        model.add_gene(
            GeneBuilder::default()
                .id("g1".to_string())
                .product_molar_mass(Some(30.))
                .build()
                .unwrap(),
        );
        model.add_gene(GeneBuilder::default().id("g2".to_string()).build().unwrap());
        model
    }

    #[test]
    fn stoichiometry_layout() {
        let model = setup_model();
        let s = DMatrix::from(&model.stoichiometry());
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s[(0, 0)], 1.0);
        assert_eq!(s[(0, 1)], -1.0);
        assert_eq!(s[(1, 1)], 2.0);
        assert_eq!(s[(1, 2)], -1.0);
        assert_eq!(s[(1, 0)], 0.0);
    }

    #[test]
    fn bounds_and_objective() {
        let model = setup_model();
        let (lb, ub) = model.bounds();
        assert_eq!(lb.as_slice(), &[0., -5., 0.]);
        assert_eq!(ub.as_slice(), &[10., 5., 1000.]);
        assert_eq!(model.objective().as_slice(), &[0., 0., 1.]);
    }

    #[test]
    fn add_reaction_with_unknown_metabolite() {
        let mut model = setup_model();
        let bad = ReactionBuilder::default()
            .id("bad".to_string())
            .metabolites(IndexMap::from([("C".to_string(), 1.0)]))
            .build()
            .unwrap();
        assert_eq!(
            model.add_reaction(bad),
            Err(ModelError::UnknownMetabolite {
                reaction: "bad".to_string(),
                metabolite: "C".to_string()
            })
        );
        assert_eq!(model.n_reactions(), 3);
    }

    #[test]
    fn add_reaction_with_bad_bounds() {
        let mut model = setup_model();
        let bad = ReactionBuilder::default()
            .id("bad".to_string())
            .lower_bound(2.)
            .upper_bound(1.)
            .build()
            .unwrap();
        if let Err(ModelError::InvalidReactionBounds(id)) = model.add_reaction(bad) {
            assert_eq!(id, "bad");
        } else {
            panic!("Invalid reaction bounds not caught")
        }
    }

    #[test]
    fn coupling_constraints() {
        let mut model = setup_model();
        assert_eq!(model.n_coupling_constraints(), 0);
        let empty = model.coupling();
        assert_eq!((empty.nrows(), empty.ncols()), (0, 3));

        let cons = CouplingConstraint {
            coefficients: IndexMap::from([("EX_A".to_string(), 1.0), ("EX_B".to_string(), 0.5)]),
            lower_bound: 0.,
            upper_bound: 8.,
        };
        model.add_coupling_constraint("cap", cons.clone()).unwrap();
        assert_eq!(
            model.add_coupling_constraint("cap", cons),
            Err(ModelError::CouplingConstraintAlreadyExists("cap".to_string()))
        );

        let c = DMatrix::from(&model.coupling());
        assert_eq!(c.shape(), (1, 3));
        assert_eq!(c[(0, 0)], 1.0);
        assert_eq!(c[(0, 2)], 0.5);
        let (clb, cub) = model.coupling_bounds();
        assert_eq!(clb.as_slice(), &[0.]);
        assert_eq!(cub.as_slice(), &[8.]);
    }

    #[test]
    fn coupling_with_unknown_reaction() {
        let mut model = setup_model();
        let cons = CouplingConstraint {
            coefficients: IndexMap::from([("nope".to_string(), 1.0)]),
            lower_bound: 0.,
            upper_bound: 1.,
        };
        assert_eq!(
            model.add_coupling_constraint("c", cons),
            Err(ModelError::UnknownReaction("nope".to_string()))
        );
    }

    #[test]
    fn molar_masses() {
        let model = setup_model();
        let masses = model.gene_product_molar_masses();
        assert_eq!(masses.len(), 1);
        assert_eq!(masses.get("g1"), Some(&30.));
    }
}
