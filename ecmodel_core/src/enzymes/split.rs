//! Splitting of reactions into directional, isozyme specific columns
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::{debug, warn};
use nalgebra_sparse::CscMatrix;

use crate::configuration::read_configuration;
use crate::enzymes::isozyme::{select_best_isozyme, Isozyme};
use crate::enzymes::parameters::{EnzymeParameters, IsozymeStrategy, MissingGeneBounds};
use crate::enzymes::EnzymeModelError;
use crate::metabolic_model::traits::MetabolicModel;
use crate::utils::sparse::csc_from_triplets;

/// Direction in which a column carries the flux of its reaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Reverse part of a split reaction, the column flux is the negated reaction flux
    Reverse,
    /// Reaction that was not split, the column is the reaction itself
    PassThrough,
    /// Forward part of a split reaction
    Forward,
}

impl Direction {
    /// Sign of the direction, -1, 0 or 1
    pub fn sign(self) -> i8 {
        match self {
            Direction::Reverse => -1,
            Direction::PassThrough => 0,
            Direction::Forward => 1,
        }
    }

    /// Coefficient linking the column flux to the flux of its reaction
    pub fn incidence(self) -> f64 {
        match self {
            Direction::Reverse => -1f64,
            Direction::PassThrough | Direction::Forward => 1f64,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Reverse => write!(f, "reverse"),
            Direction::PassThrough => write!(f, "passthrough"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

/// One variable of the enzyme constrained model, a reaction restricted to one isozyme and
/// one direction
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Index of the reaction of the inner model this column belongs to
    pub reaction_index: usize,
    /// Index of the isozyme in the catalogue entry of the reaction, None for pass-through
    /// columns
    pub isozyme_index: Option<usize>,
    /// Direction of the column
    pub direction: Direction,
    /// Row of the reaction arm coupling block, None for pass-through columns
    pub reaction_coupling_row: Option<usize>,
    /// Lower bound of the column flux
    pub lb: f64,
    /// Upper bound of the column flux
    pub ub: f64,
    /// (gene product row, enzyme required per unit flux) pairs
    pub gene_product_coupling: Vec<(usize, f64)>,
    /// (mass group row, enzyme mass required per unit flux) pairs
    pub mass_group_coupling: Vec<(usize, f64)>,
}

impl Column {
    /// Id of the column, built from the id of its reaction
    ///
    /// # Note:
    /// Pass-through columns keep the reaction id, split columns are named
    /// "{reaction_id}#{direction}#{isozyme number}", with isozymes numbered from 1
    pub fn id(&self, reaction_id: &str) -> String {
        match (self.direction, self.isozyme_index) {
            (Direction::PassThrough, _) | (_, None) => reaction_id.to_string(),
            (direction, Some(isozyme)) => format!("{}#{}#{}", reaction_id, direction, isozyme + 1),
        }
    }
}

/// Result of splitting every reaction of a model
///
/// Holds the columns together with the description of every coupling row the columns refer to.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SplitReactions {
    pub columns: Vec<Column>,
    /// Reaction arm row to inner reaction index
    pub coupling_row_reaction: Vec<usize>,
    /// Gene product row to (gene id, (lower, upper)) concentration bounds
    pub coupling_row_gene_product: Vec<(String, (f64, f64))>,
    /// Mass group row to (group name, mass budget)
    pub coupling_row_mass_group: Vec<(String, f64)>,
}

/// Split the reactions of `model` according to the isozyme data in `params`
///
/// Validates all of the enzyme data before any column is produced.
///
/// # Note:
/// Every reaction with at least one split column gets a reaction arm row, also when it has a
/// single column. Column bounds always start at 0, only the arm row keeps the original
/// bounds, e.g. the lower limit of a reaction bounded by (2, 10). Arm rows are in one-to-one
/// correspondence with split reactions, whatever the strategy.
///
/// A reaction with isozymes but no column (no isozyme has a positive turnover number in a
/// direction its bounds allow) is fixed at zero flux. That is an error unless its bounds
/// contain zero.
pub(crate) fn split_reactions<M: MetabolicModel + ?Sized>(
    model: &M,
    params: &EnzymeParameters,
) -> Result<SplitReactions, EnzymeModelError> {
    let reaction_ids = model.reactions();
    validate_catalogue(&reaction_ids, params)?;
    let coupling_row_mass_group = mass_group_rows(params)?;

    let (lbs, ubs) = model.bounds();
    let mut columns = Vec::with_capacity(reaction_ids.len());
    let mut coupling_row_reaction = Vec::new();
    // Genes get a row the first time a column references them
    let mut gene_rows: IndexMap<String, ()> = IndexMap::new();

    for (reaction_index, reaction_id) in reaction_ids.iter().enumerate() {
        let (lb, ub) = (lbs[reaction_index], ubs[reaction_index]);
        if !(lb <= ub) {
            return Err(EnzymeModelError::DegenerateBounds {
                id: reaction_id.clone(),
                lower: lb,
                upper: ub,
            });
        }
        let isozymes = match params.isozymes.get(reaction_id) {
            Some(isozymes) if !isozymes.is_empty() => isozymes,
            _ => {
                columns.push(Column {
                    reaction_index,
                    isozyme_index: None,
                    direction: Direction::PassThrough,
                    reaction_coupling_row: None,
                    lb,
                    ub,
                    gene_product_coupling: Vec::new(),
                    mass_group_coupling: Vec::new(),
                });
                continue;
            }
        };
        let chosen: Vec<(usize, &Isozyme)> = match params.strategy {
            IsozymeStrategy::AllIsozymes => isozymes.iter().enumerate().collect(),
            IsozymeStrategy::BestIsozyme => {
                match select_best_isozyme(isozymes, &params.molar_masses)? {
                    Some(best) => {
                        debug!("Selected isozyme {} for reaction {}", best + 1, reaction_id);
                        vec![(best, &isozymes[best])]
                    }
                    None => Vec::new(),
                }
            }
        };
        let directions: Vec<Direction> = [
            (ub > 0f64).then_some(Direction::Forward),
            (lb < 0f64).then_some(Direction::Reverse),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut reaction_coupling_row = None;
        for (isozyme_index, isozyme) in chosen {
            for &direction in &directions {
                let kcat = match isozyme.kcat(direction) {
                    Some(kcat) => kcat,
                    None => {
                        debug!(
                            "Isozyme {} of reaction {} has no {} turnover number, skipping the direction",
                            isozyme_index + 1,
                            reaction_id,
                            direction
                        );
                        continue;
                    }
                };
                let (col_lb, col_ub) = match direction {
                    Direction::Forward => (0f64, ub),
                    _ => (0f64, -lb),
                };
                if !(col_lb <= col_ub) {
                    return Err(EnzymeModelError::DegenerateBounds {
                        id: format!("{}#{}", reaction_id, direction),
                        lower: col_lb,
                        upper: col_ub,
                    });
                }
                let row = *reaction_coupling_row.get_or_insert_with(|| {
                    coupling_row_reaction.push(reaction_index);
                    coupling_row_reaction.len() - 1
                });
                let gene_product_coupling =
                    gene_product_coupling(isozyme, kcat, &mut gene_rows);
                let mass_group_coupling = mass_group_coupling(isozyme, kcat, params)?;
                columns.push(Column {
                    reaction_index,
                    isozyme_index: Some(isozyme_index),
                    direction,
                    reaction_coupling_row: Some(row),
                    lb: col_lb,
                    ub: col_ub,
                    gene_product_coupling,
                    mass_group_coupling,
                });
            }
        }
        if reaction_coupling_row.is_none() {
            // Without columns the reaction flux is fixed at 0, which its bounds must allow
            if !(lb <= 0f64 && 0f64 <= ub) {
                return Err(EnzymeModelError::DegenerateBounds {
                    id: reaction_id.clone(),
                    lower: lb,
                    upper: ub,
                });
            }
            if lb != 0f64 || ub != 0f64 {
                warn!(
                    "Reaction {} has isozymes but none can catalyze a direction allowed by its bounds, it will carry no flux",
                    reaction_id
                );
            }
        }
    }

    let coupling_row_gene_product = gene_product_rows(gene_rows, params)?;
    Ok(SplitReactions {
        columns,
        coupling_row_reaction,
        coupling_row_gene_product,
        coupling_row_mass_group,
    })
}

/// Check that the catalogue only refers to known reactions, that every isozyme is sensible and
/// that every gene product has a molar mass
fn validate_catalogue(
    reaction_ids: &[String],
    params: &EnzymeParameters,
) -> Result<(), EnzymeModelError> {
    for (reaction, isozymes) in &params.isozymes {
        if !reaction_ids.contains(reaction) {
            return Err(EnzymeModelError::UnknownReaction {
                reaction: reaction.clone(),
            });
        }
        for (index, isozyme) in isozymes.iter().enumerate() {
            isozyme.validate(reaction, index)?;
            for gene in isozyme.gene_product_count.keys() {
                match params.molar_masses.get(gene) {
                    None => {
                        return Err(EnzymeModelError::MissingMolarMass { gene: gene.clone() })
                    }
                    Some(mass) if !(mass.is_finite() && *mass >= 0f64) => {
                        return Err(EnzymeModelError::InvalidMolarMass {
                            gene: gene.clone(),
                            mass: *mass,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
    }
    Ok(())
}

/// Enzyme amount needed per unit of flux, `count / kcat` for every gene product
fn gene_product_coupling(
    isozyme: &Isozyme,
    kcat: f64,
    gene_rows: &mut IndexMap<String, ()>,
) -> Vec<(usize, f64)> {
    isozyme
        .gene_product_count
        .iter()
        .map(|(gene, count)| {
            let (row, _) = gene_rows.insert_full(gene.clone(), ());
            (row, count / kcat)
        })
        .collect()
}

/// Enzyme mass needed per unit of flux, summed per mass group
fn mass_group_coupling(
    isozyme: &Isozyme,
    kcat: f64,
    params: &EnzymeParameters,
) -> Result<Vec<(usize, f64)>, EnzymeModelError> {
    let mut per_group: IndexMap<usize, f64> = IndexMap::new();
    for (gene, count) in &isozyme.gene_product_count {
        let group = match params.mass_groups.group_of(gene) {
            Some(group) => group,
            None => continue,
        };
        let row = params.mass_groups.budgets.get_index_of(group).ok_or_else(|| {
            EnzymeModelError::UnknownMassGroup {
                gene: gene.clone(),
                group: group.to_string(),
            }
        })?;
        // Presence was checked while validating the catalogue
        let mass = params.molar_masses.get(gene).copied().unwrap_or(0f64);
        *per_group.entry(row).or_insert(0f64) += count / kcat * mass;
    }
    Ok(per_group.into_iter().collect())
}

/// One row per mass group budget, bounded by (0, budget)
fn mass_group_rows(params: &EnzymeParameters) -> Result<Vec<(String, f64)>, EnzymeModelError> {
    params
        .mass_groups
        .budgets
        .iter()
        .map(|(group, budget)| {
            if !(*budget >= 0f64) {
                return Err(EnzymeModelError::DegenerateBounds {
                    id: group.clone(),
                    lower: 0f64,
                    upper: *budget,
                });
            }
            Ok((group.clone(), *budget))
        })
        .collect()
}

/// Concentration bounds for every referenced gene product, in row order
fn gene_product_rows(
    gene_rows: IndexMap<String, ()>,
    params: &EnzymeParameters,
) -> Result<Vec<(String, (f64, f64))>, EnzymeModelError> {
    gene_rows
        .into_keys()
        .map(|gene| {
            let (lower, upper) = match params.gene_product_bounds.get(&gene) {
                Some(bounds) => *bounds,
                None => match params.missing_gene_bounds {
                    MissingGeneBounds::Unconstrained => {
                        (0f64, read_configuration(|c| c.gene_product_upper_bound))
                    }
                    MissingGeneBounds::Error => {
                        return Err(EnzymeModelError::MissingGeneProductBounds { gene })
                    }
                },
            };
            if !(lower <= upper) {
                return Err(EnzymeModelError::DegenerateBounds {
                    id: gene,
                    lower,
                    upper,
                });
            }
            Ok((gene, (lower, upper)))
        })
        .collect()
}

/// Matrix mapping column fluxes to inner reaction fluxes, `n_reactions` x `n_columns`
///
/// Entry (r, c) is the [`Direction::incidence`] of column c if it belongs to reaction r, so
/// `incidence * column_flux` is the flux of every inner reaction.
pub(crate) fn column_incidence(columns: &[Column], n_reactions: usize) -> CscMatrix<f64> {
    csc_from_triplets(
        n_reactions,
        columns.len(),
        columns
            .iter()
            .enumerate()
            .map(|(col, c)| (c.reaction_index, col, c.direction.incidence())),
    )
}
