//! Module for adding enzyme capacity constraints to metabolic models
//!
//! Reactions catalyzed by known enzymes are split into one column per isozyme and direction,
//! and every column is charged the amount of enzyme it needs to carry a unit of flux
//! (`gene product count / kcat`). The enzyme usage is then bounded through coupling
//! constraints, per gene product and per group of gene products (by mass). The resulting
//! [`model::EnzymeConstrainedModel`] is an ordinary [`MetabolicModel`](crate::metabolic_model::traits::MetabolicModel),
//! and can be handed to any analysis that accepts one.

mod coupling;
pub mod isozyme;
pub mod model;
pub mod parameters;
pub mod split;

use thiserror::Error;

/// Errors raised while building an enzyme constrained model
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EnzymeModelError {
    /// A gene product used by an isozyme has no molar mass
    #[error("No molar mass given for gene product {gene}")]
    MissingMolarMass { gene: String },
    /// A molar mass is negative or not finite
    #[error("Molar mass {mass} of gene product {gene} is invalid")]
    InvalidMolarMass { gene: String, mass: f64 },
    /// The isozyme data refers to a reaction which is not in the model
    #[error("Isozyme data given for reaction {reaction} which is not in the model")]
    UnknownReaction { reaction: String },
    /// Bounds that can't be satisfied: lower > upper for a reaction, a split column, a gene
    /// product or a mass group, or a reaction left without columns whose bounds exclude zero
    #[error("Bounds ({lower}, {upper}) of {id} can't be satisfied")]
    DegenerateBounds { id: String, lower: f64, upper: f64 },
    /// A referenced gene product has no concentration bounds and the policy forbids defaults
    #[error("No concentration bounds given for gene product {gene}")]
    MissingGeneProductBounds { gene: String },
    /// A gene product belongs to a mass group without a budget
    #[error("Gene product {gene} belongs to mass group {group}, which has no mass budget")]
    UnknownMassGroup { gene: String, group: String },
    /// Turnover numbers or gene product counts of an isozyme are invalid
    #[error("Isozyme {isozyme} of reaction {reaction} is invalid: {reason}")]
    InvalidIsozyme {
        reaction: String,
        isozyme: usize,
        reason: String,
    },
}
