//! Module providing the Model struct for representing a metabolic model, and the traits through
//! which every model is queried.

pub mod gene;
pub mod metabolite;
pub mod model;
pub mod reaction;
pub mod traits;
