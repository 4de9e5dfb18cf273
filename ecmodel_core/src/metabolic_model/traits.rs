//! This module provides the query surface shared by every metabolic model representation
//!
//! Analysis code only talks to models through [`MetabolicModel`], so a model wrapped in any
//! number of layers (see [`ModelWrapper`]) can be used wherever a plain model can.
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

/// Capability set of a constraint based metabolic model
///
/// The model describes the linear program
///
/// ```text
/// max  objective' * x
/// s.t. stoichiometry * x = 0
///      lower_bound <= x <= upper_bound
///      coupling_lower <= coupling * x <= coupling_upper
/// ```
///
/// over the variables returned by [`reactions`](MetabolicModel::reactions). Fluxes in terms of
/// the "semantic" reactions are recovered from a solution `x` as `reaction_flux' * x`.
pub trait MetabolicModel {
    /// Ids of the variables (columns) of the model
    fn reactions(&self) -> Vec<String>;

    /// Number of variables (columns) of the model
    fn n_reactions(&self) -> usize {
        self.reactions().len()
    }

    /// Ids of the metabolites (rows of the stoichiometric matrix)
    fn metabolites(&self) -> Vec<String>;

    fn n_metabolites(&self) -> usize {
        self.metabolites().len()
    }

    /// Ids of the genes in the model
    fn genes(&self) -> Vec<String>;

    fn n_genes(&self) -> usize {
        self.genes().len()
    }

    /// Stoichiometric matrix, `n_metabolites` x `n_reactions`
    fn stoichiometry(&self) -> CscMatrix<f64>;

    /// Lower and upper bounds of every variable
    fn bounds(&self) -> (DVector<f64>, DVector<f64>);

    /// Linear objective coefficients of every variable
    fn objective(&self) -> DVector<f64>;

    /// Additional linear constraints beyond mass balance, `n_coupling_constraints` x `n_reactions`
    fn coupling(&self) -> CscMatrix<f64> {
        CscMatrix::zeros(0, self.n_reactions())
    }

    fn n_coupling_constraints(&self) -> usize {
        self.coupling().nrows()
    }

    /// Lower and upper bounds of every coupling constraint, in the row order of
    /// [`coupling`](MetabolicModel::coupling)
    fn coupling_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        (DVector::zeros(0), DVector::zeros(0))
    }

    /// Ids of the fluxes recovered by [`reaction_flux`](MetabolicModel::reaction_flux)
    fn fluxes(&self) -> Vec<String> {
        self.reactions()
    }

    fn n_fluxes(&self) -> usize {
        self.fluxes().len()
    }

    /// Map from variables to fluxes, `n_reactions` x `n_fluxes`
    fn reaction_flux(&self) -> CscMatrix<f64> {
        CscMatrix::identity(self.n_reactions())
    }
}

/// A model layered on top of another model
///
/// Every `wrapped_*` hook answers one query of [`MetabolicModel`] for the wrapper, and by default
/// simply forwards it to [`inner`](ModelWrapper::inner). Implementors override exactly the hooks
/// whose answer they change, and get [`MetabolicModel`] through the blanket implementation.
pub trait ModelWrapper {
    /// Type of the wrapped model
    type Inner: MetabolicModel + ?Sized;

    /// The wrapped model
    fn inner(&self) -> &Self::Inner;

    fn wrapped_reactions(&self) -> Vec<String> {
        self.inner().reactions()
    }

    fn wrapped_n_reactions(&self) -> usize {
        self.inner().n_reactions()
    }

    fn wrapped_metabolites(&self) -> Vec<String> {
        self.inner().metabolites()
    }

    fn wrapped_n_metabolites(&self) -> usize {
        self.inner().n_metabolites()
    }

    fn wrapped_genes(&self) -> Vec<String> {
        self.inner().genes()
    }

    fn wrapped_n_genes(&self) -> usize {
        self.inner().n_genes()
    }

    fn wrapped_stoichiometry(&self) -> CscMatrix<f64> {
        self.inner().stoichiometry()
    }

    fn wrapped_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        self.inner().bounds()
    }

    fn wrapped_objective(&self) -> DVector<f64> {
        self.inner().objective()
    }

    fn wrapped_coupling(&self) -> CscMatrix<f64> {
        self.inner().coupling()
    }

    fn wrapped_n_coupling_constraints(&self) -> usize {
        self.inner().n_coupling_constraints()
    }

    fn wrapped_coupling_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        self.inner().coupling_bounds()
    }

    fn wrapped_fluxes(&self) -> Vec<String> {
        self.inner().fluxes()
    }

    fn wrapped_n_fluxes(&self) -> usize {
        self.inner().n_fluxes()
    }

    fn wrapped_reaction_flux(&self) -> CscMatrix<f64> {
        self.inner().reaction_flux()
    }
}

impl<W: ModelWrapper> MetabolicModel for W {
    fn reactions(&self) -> Vec<String> {
        self.wrapped_reactions()
    }

    fn n_reactions(&self) -> usize {
        self.wrapped_n_reactions()
    }

    fn metabolites(&self) -> Vec<String> {
        self.wrapped_metabolites()
    }

    fn n_metabolites(&self) -> usize {
        self.wrapped_n_metabolites()
    }

    fn genes(&self) -> Vec<String> {
        self.wrapped_genes()
    }

    fn n_genes(&self) -> usize {
        self.wrapped_n_genes()
    }

    fn stoichiometry(&self) -> CscMatrix<f64> {
        self.wrapped_stoichiometry()
    }

    fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
        self.wrapped_bounds()
    }

    fn objective(&self) -> DVector<f64> {
        self.wrapped_objective()
    }

    fn coupling(&self) -> CscMatrix<f64> {
        self.wrapped_coupling()
    }

    fn n_coupling_constraints(&self) -> usize {
        self.wrapped_n_coupling_constraints()
    }

    fn coupling_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        self.wrapped_coupling_bounds()
    }

    fn fluxes(&self) -> Vec<String> {
        self.wrapped_fluxes()
    }

    fn n_fluxes(&self) -> usize {
        self.wrapped_n_fluxes()
    }

    fn reaction_flux(&self) -> CscMatrix<f64> {
        self.wrapped_reaction_flux()
    }
}
