//! Utility functions for assembling sparse matrices
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Build a compressed sparse column matrix from (row, column, value) triplets
///
/// Triplets landing on the same position are summed, never overwritten.
///
/// # Panics
/// If a triplet lies outside of the `nrows` x `ncols` shape, this is always a
/// construction defect of the caller.
pub(crate) fn csc_from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> CscMatrix<f64>
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let mut coo = CooMatrix::new(nrows, ncols);
    for (row, col, val) in triplets {
        coo.push(row, col, val);
    }
    CscMatrix::from(&coo)
}

/// Stack sparse blocks vertically, all blocks must have `ncols` columns
pub(crate) fn vstack(blocks: &[&CscMatrix<f64>], ncols: usize) -> CscMatrix<f64> {
    let nrows = blocks.iter().map(|b| b.nrows()).sum();
    let mut offset = 0usize;
    let mut coo = CooMatrix::new(nrows, ncols);
    for block in blocks {
        debug_assert_eq!(block.ncols(), ncols, "stacked blocks must share a column count");
        for (row, col, val) in block.triplet_iter() {
            coo.push(row + offset, col, *val);
        }
        offset += block.nrows();
    }
    CscMatrix::from(&coo)
}

/// Concatenate dense vectors end to end
pub(crate) fn vcat(parts: &[&DVector<f64>]) -> DVector<f64> {
    DVector::from_iterator(
        parts.iter().map(|p| p.len()).sum(),
        parts.iter().flat_map(|p| p.iter().copied()),
    )
}

/// Compute `matrix^T * vector` without materializing the transpose
pub(crate) fn transpose_mul(matrix: &CscMatrix<f64>, vector: &DVector<f64>) -> DVector<f64> {
    debug_assert_eq!(matrix.nrows(), vector.len());
    let mut out = DVector::zeros(matrix.ncols());
    for (row, col, val) in matrix.triplet_iter() {
        out[col] += val * vector[row];
    }
    out
}
