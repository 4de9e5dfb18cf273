//! Core rust implementation of enzyme constrained metabolic modeling.
//!
//! Models are described through the [`MetabolicModel`](metabolic_model::traits::MetabolicModel)
//! trait, and [`enzymes::model::EnzymeConstrainedModel`] wraps any of them to add enzyme
//! capacity constraints in the style of GECKO (every isozyme kept) or sMOMENT (only the best
//! isozyme of each reaction kept).

pub mod configuration;
pub mod enzymes;
pub mod metabolic_model;
mod utils;
