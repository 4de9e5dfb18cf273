//! Assembly of the coupling blocks added by enzyme constraints
//!
//! The coupling of an enzyme constrained model consists of four blocks stacked in a fixed order:
//!
//! 1. the coupling of the inner model, pulled through the column incidence matrix
//! 2. reaction arm rows, bounding the net flux of every split reaction by its original bounds
//! 3. gene product rows, bounding the enzyme usage of every gene product by its concentration
//! 4. mass group rows, bounding the total enzyme mass of every group by its budget
//!
//! [`coupling`] and [`coupling_bounds`] must always agree on this order.
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

use crate::enzymes::split::Column;
use crate::utils::sparse::{csc_from_triplets, vcat, vstack};

/// Reaction arm block, `n_rows` x `n_columns`, the direction sign of every split column in the
/// row of its reaction
pub(crate) fn reaction_arm_block(columns: &[Column], n_rows: usize) -> CscMatrix<f64> {
    csc_from_triplets(
        n_rows,
        columns.len(),
        columns.iter().enumerate().filter_map(|(col, c)| {
            c.reaction_coupling_row
                .map(|row| (row, col, f64::from(c.direction.sign())))
        }),
    )
}

/// Gene product block, `n_rows` x `n_columns`
pub(crate) fn gene_product_block(columns: &[Column], n_rows: usize) -> CscMatrix<f64> {
    csc_from_triplets(
        n_rows,
        columns.len(),
        columns.iter().enumerate().flat_map(|(col, c)| {
            c.gene_product_coupling
                .iter()
                .map(move |&(row, coef)| (row, col, coef))
        }),
    )
}

/// Mass group block, `n_rows` x `n_columns`
pub(crate) fn mass_group_block(columns: &[Column], n_rows: usize) -> CscMatrix<f64> {
    csc_from_triplets(
        n_rows,
        columns.len(),
        columns.iter().enumerate().flat_map(|(col, c)| {
            c.mass_group_coupling
                .iter()
                .map(move |&(row, coef)| (row, col, coef))
        }),
    )
}

/// Stack the inner coupling (already in column space) and the three enzyme blocks
pub(crate) fn coupling(
    inner_coupling: &CscMatrix<f64>,
    columns: &[Column],
    n_reaction_rows: usize,
    n_gene_product_rows: usize,
    n_mass_group_rows: usize,
) -> CscMatrix<f64> {
    vstack(
        &[
            inner_coupling,
            &reaction_arm_block(columns, n_reaction_rows),
            &gene_product_block(columns, n_gene_product_rows),
            &mass_group_block(columns, n_mass_group_rows),
        ],
        columns.len(),
    )
}

/// Bounds matching the rows of [`coupling`]
///
/// `reaction_bounds` are the bounds of the inner reactions, looked up for every reaction arm
/// row through `coupling_row_reaction`.
pub(crate) fn coupling_bounds(
    inner_bounds: &(DVector<f64>, DVector<f64>),
    reaction_bounds: &(DVector<f64>, DVector<f64>),
    coupling_row_reaction: &[usize],
    coupling_row_gene_product: &[(String, (f64, f64))],
    coupling_row_mass_group: &[(String, f64)],
) -> (DVector<f64>, DVector<f64>) {
    let (rxn_lbs, rxn_ubs) = reaction_bounds;
    let arm_lower = DVector::from_iterator(
        coupling_row_reaction.len(),
        coupling_row_reaction.iter().map(|&r| rxn_lbs[r]),
    );
    let arm_upper = DVector::from_iterator(
        coupling_row_reaction.len(),
        coupling_row_reaction.iter().map(|&r| rxn_ubs[r]),
    );
    let gene_lower = DVector::from_iterator(
        coupling_row_gene_product.len(),
        coupling_row_gene_product.iter().map(|(_, (lb, _))| *lb),
    );
    let gene_upper = DVector::from_iterator(
        coupling_row_gene_product.len(),
        coupling_row_gene_product.iter().map(|(_, (_, ub))| *ub),
    );
    let mass_lower = DVector::zeros(coupling_row_mass_group.len());
    let mass_upper = DVector::from_iterator(
        coupling_row_mass_group.len(),
        coupling_row_mass_group.iter().map(|(_, budget)| *budget),
    );
    (
        vcat(&[&inner_bounds.0, &arm_lower, &gene_lower, &mass_lower]),
        vcat(&[&inner_bounds.1, &arm_upper, &gene_upper, &mass_upper]),
    )
}
