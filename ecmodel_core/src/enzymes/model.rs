//! This module provides the EnzymeConstrainedModel, a wrapper adding enzyme capacity
//! constraints on top of any metabolic model
use std::fmt::{Debug, Formatter};

use log::info;
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

use crate::enzymes::coupling;
use crate::enzymes::parameters::EnzymeParameters;
use crate::enzymes::split::{column_incidence, split_reactions, Column, SplitReactions};
use crate::enzymes::EnzymeModelError;
use crate::metabolic_model::traits::{MetabolicModel, ModelWrapper};
use crate::utils::sparse::transpose_mul;

/// A metabolic model with enzyme capacity constraints
///
/// The variables of this model are the [`Column`]s obtained by splitting the reactions of the
/// inner model into one variable per isozyme and direction. Queries about metabolites, genes
/// and fluxes are answered by the inner model, everything else is expressed in terms of the
/// columns. The model can't be changed once built, if the inner model or the enzyme data
/// change a new one has to be built.
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use ecmodel_core::enzymes::isozyme::Isozyme;
/// use ecmodel_core::enzymes::model::EnzymeConstrainedModel;
/// use ecmodel_core::enzymes::parameters::{EnzymeParametersBuilder, MassGroups, MissingGeneBounds};
/// use ecmodel_core::metabolic_model::model::Model;
/// use ecmodel_core::metabolic_model::reaction::ReactionBuilder;
/// use ecmodel_core::metabolic_model::traits::MetabolicModel;
///
/// let mut model = Model::new_empty();
/// model.add_reaction(
///     ReactionBuilder::default()
///         .id("R1".to_string())
///         .lower_bound(-10.)
///         .upper_bound(10.)
///         .build()
///         .unwrap(),
/// ).unwrap();
///
/// let params = EnzymeParametersBuilder::default()
///     .isozymes(IndexMap::from([(
///         "R1".to_string(),
///         vec![Isozyme::new(&[("g1", 2.0)], Some(100.), Some(50.))],
///     )]))
///     .molar_masses(IndexMap::from([("g1".to_string(), 30.)]))
///     .missing_gene_bounds(MissingGeneBounds::Unconstrained)
///     .mass_groups(MassGroups::single("total", 5.))
///     .build()
///     .unwrap();
///
/// let ec_model = EnzymeConstrainedModel::new(&model, &params).unwrap();
/// assert_eq!(ec_model.reactions(), vec!["R1#forward#1", "R1#reverse#1"]);
/// // One reaction arm, one gene product and one mass group row
/// assert_eq!(ec_model.n_coupling_constraints(), 3);
/// ```
pub struct EnzymeConstrainedModel<'a, M: MetabolicModel + ?Sized> {
    /// Split reactions, the variables of the model
    columns: Vec<Column>,
    /// Reaction arm row to index of the inner reaction
    coupling_row_reaction: Vec<usize>,
    /// Gene product row to (gene id, concentration bounds)
    coupling_row_gene_product: Vec<(String, (f64, f64))>,
    /// Mass group row to (group name, mass budget)
    coupling_row_mass_group: Vec<(String, f64)>,
    /// The model being constrained
    inner: &'a M,
}

impl<'a, M: MetabolicModel + ?Sized> EnzymeConstrainedModel<'a, M> {
    /// Build an enzyme constrained model on top of `inner`
    ///
    /// # Errors
    /// Fails with an [`EnzymeModelError`] if the enzyme data is inconsistent with the model or
    /// with itself. Nothing is built in that case.
    pub fn new(inner: &'a M, params: &EnzymeParameters) -> Result<Self, EnzymeModelError> {
        let SplitReactions {
            columns,
            coupling_row_reaction,
            coupling_row_gene_product,
            coupling_row_mass_group,
        } = split_reactions(inner, params)?;
        info!(
            "Split {} reactions into {} columns, adding {} reaction arm, {} gene product and {} mass group coupling rows",
            inner.n_reactions(),
            columns.len(),
            coupling_row_reaction.len(),
            coupling_row_gene_product.len(),
            coupling_row_mass_group.len()
        );
        Ok(EnzymeConstrainedModel {
            columns,
            coupling_row_reaction,
            coupling_row_gene_product,
            coupling_row_mass_group,
            inner,
        })
    }

    /// Columns (variables) of the model
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Index of the inner reaction of every reaction arm coupling row
    pub fn coupling_row_reaction(&self) -> &[usize] {
        &self.coupling_row_reaction
    }

    /// Gene id and concentration bounds of every gene product coupling row
    pub fn coupling_row_gene_product(&self) -> &[(String, (f64, f64))] {
        &self.coupling_row_gene_product
    }

    /// Group name and mass budget of every mass group coupling row
    pub fn coupling_row_mass_group(&self) -> &[(String, f64)] {
        &self.coupling_row_mass_group
    }

    /// Matrix mapping column fluxes to inner reaction fluxes, `inner.n_reactions()` x
    /// `n_columns`
    pub fn column_incidence(&self) -> CscMatrix<f64> {
        column_incidence(&self.columns, self.inner.n_reactions())
    }

    /// Gene product coupling block on its own, one row per gene product
    ///
    /// Multiplying it with column fluxes gives the amount of every gene product in use.
    pub fn gene_product_coupling(&self) -> CscMatrix<f64> {
        coupling::gene_product_block(&self.columns, self.coupling_row_gene_product.len())
    }

    /// Mass group coupling block on its own, one row per mass group
    pub fn mass_group_coupling(&self) -> CscMatrix<f64> {
        coupling::mass_group_block(&self.columns, self.coupling_row_mass_group.len())
    }

    /// Number of enzyme coupling rows added on top of the inner coupling
    fn n_enzyme_coupling_rows(&self) -> usize {
        self.coupling_row_reaction.len()
            + self.coupling_row_gene_product.len()
            + self.coupling_row_mass_group.len()
    }
}

impl<M: MetabolicModel + ?Sized> ModelWrapper for EnzymeConstrainedModel<'_, M> {
    type Inner = M;

    fn inner(&self) -> &M {
        self.inner
    }

    fn wrapped_reactions(&self) -> Vec<String> {
        let reaction_ids = self.inner.reactions();
        self.columns
            .iter()
            .map(|c| c.id(&reaction_ids[c.reaction_index]))
            .collect()
    }

    fn wrapped_n_reactions(&self) -> usize {
        self.columns.len()
    }

    fn wrapped_stoichiometry(&self) -> CscMatrix<f64> {
        &self.inner.stoichiometry() * &self.column_incidence()
    }

    fn wrapped_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_iterator(self.columns.len(), self.columns.iter().map(|c| c.lb)),
            DVector::from_iterator(self.columns.len(), self.columns.iter().map(|c| c.ub)),
        )
    }

    fn wrapped_objective(&self) -> DVector<f64> {
        transpose_mul(&self.column_incidence(), &self.inner.objective())
    }

    fn wrapped_coupling(&self) -> CscMatrix<f64> {
        let inner_coupling = &self.inner.coupling() * &self.column_incidence();
        coupling::coupling(
            &inner_coupling,
            &self.columns,
            self.coupling_row_reaction.len(),
            self.coupling_row_gene_product.len(),
            self.coupling_row_mass_group.len(),
        )
    }

    fn wrapped_n_coupling_constraints(&self) -> usize {
        self.inner.n_coupling_constraints() + self.n_enzyme_coupling_rows()
    }

    fn wrapped_coupling_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        coupling::coupling_bounds(
            &self.inner.coupling_bounds(),
            &self.inner.bounds(),
            &self.coupling_row_reaction,
            &self.coupling_row_gene_product,
            &self.coupling_row_mass_group,
        )
    }

    fn wrapped_reaction_flux(&self) -> CscMatrix<f64> {
        &self.column_incidence().transpose() * &self.inner.reaction_flux()
    }
}

impl<M: MetabolicModel + ?Sized> Debug for EnzymeConstrainedModel<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnzymeConstrainedModel")
            .field("columns", &self.columns)
            .field("coupling_row_reaction", &self.coupling_row_reaction)
            .field("coupling_row_gene_product", &self.coupling_row_gene_product)
            .field("coupling_row_mass_group", &self.coupling_row_mass_group)
            .finish_non_exhaustive()
    }
}
