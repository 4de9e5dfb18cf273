//! This module provides the Isozyme struct, describing one enzyme able to catalyze a reaction,
//! and the heuristic used to pick a single isozyme per reaction
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::enzymes::split::Direction;
use crate::enzymes::EnzymeModelError;

/// Map of reaction ids to the isozymes which catalyze the reaction
pub type IsozymeCatalogue = IndexMap<String, Vec<Isozyme>>;

/// An enzyme (complex of gene products) catalyzing a reaction
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isozyme {
    /// Map of gene ids to the number of copies of the gene product in the enzyme complex
    #[builder(default = "IndexMap::new()")]
    #[serde(default)]
    pub gene_product_count: IndexMap<String, f64>,
    /// Turnover number in the forward direction, None if the enzyme can't catalyze the forward
    /// reaction
    #[builder(default = "None")]
    #[serde(default)]
    pub kcat_forward: Option<f64>,
    /// Turnover number in the reverse direction, None if the enzyme can't catalyze the reverse
    /// reaction
    #[builder(default = "None")]
    #[serde(default)]
    pub kcat_reverse: Option<f64>,
}

impl Isozyme {
    /// Create a new isozyme from (gene, count) pairs and turnover numbers
    ///
    /// # Examples
    /// ```rust
    /// use ecmodel_core::enzymes::isozyme::Isozyme;
    /// // Homodimer of the b0001 gene product
    /// let iso = Isozyme::new(&[("b0001", 2.0)], Some(100.), Some(50.));
    /// assert_eq!(iso.gene_product_count["b0001"], 2.0);
    /// ```
    pub fn new(
        gene_product_count: &[(&str, f64)],
        kcat_forward: Option<f64>,
        kcat_reverse: Option<f64>,
    ) -> Isozyme {
        Isozyme {
            gene_product_count: gene_product_count
                .iter()
                .map(|(gene, count)| (gene.to_string(), *count))
                .collect(),
            kcat_forward,
            kcat_reverse,
        }
    }

    /// Turnover number usable in the given direction
    ///
    /// Absent and zero turnover numbers both mean the direction can't be catalyzed, so both
    /// give None.
    pub fn kcat(&self, direction: Direction) -> Option<f64> {
        let kcat = match direction {
            Direction::Forward => self.kcat_forward,
            Direction::Reverse => self.kcat_reverse,
            Direction::PassThrough => None,
        };
        kcat.filter(|k| *k > 0f64)
    }

    /// Total molar mass of the enzyme complex, `sum(count * molar_mass(gene))`
    pub fn complex_mass(&self, molar_masses: &IndexMap<String, f64>) -> Result<f64, EnzymeModelError> {
        // Start at +0.0, an empty complex weighs +0.0
        self.gene_product_count
            .iter()
            .try_fold(0f64, |total, (gene, count)| match molar_masses.get(gene) {
                Some(mass) => Ok(total + count * mass),
                None => Err(EnzymeModelError::MissingMolarMass { gene: gene.clone() }),
            })
    }

    /// Check the turnover numbers and gene product counts
    pub(crate) fn validate(&self, reaction: &str, index: usize) -> Result<(), EnzymeModelError> {
        let invalid = |reason: String| EnzymeModelError::InvalidIsozyme {
            reaction: reaction.to_string(),
            isozyme: index,
            reason,
        };
        for (name, kcat) in [("forward", self.kcat_forward), ("reverse", self.kcat_reverse)] {
            if let Some(k) = kcat {
                if k.is_nan() || k < 0f64 {
                    return Err(invalid(format!("{} turnover number is {}", name, k)));
                }
            }
        }
        for (gene, count) in &self.gene_product_count {
            if !(count.is_finite() && *count > 0f64) {
                return Err(invalid(format!("gene product {} has count {}", gene, count)));
            }
        }
        Ok(())
    }
}

/// Score used to rank isozymes of one reaction, the turnover number per unit of enzyme mass
///
/// `max(kcat_forward, kcat_reverse) / sum(count * molar_mass(gene))`, absent turnover numbers count
/// as 0. An isozyme without any gene products but with a positive turnover number scores
/// infinity.
pub fn isozyme_score(
    isozyme: &Isozyme,
    molar_masses: &IndexMap<String, f64>,
) -> Result<f64, EnzymeModelError> {
    let kcat = isozyme
        .kcat_forward
        .unwrap_or(0f64)
        .max(isozyme.kcat_reverse.unwrap_or(0f64));
    let mass = isozyme.complex_mass(molar_masses)?;
    if kcat <= 0f64 {
        return Ok(0f64);
    }
    if mass == 0f64 {
        return Ok(f64::INFINITY);
    }
    Ok(kcat / mass)
}

/// Pick the index of the isozyme with the highest [`isozyme_score`]
///
/// Ties go to the isozyme listed first. Returns None for an empty list.
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use ecmodel_core::enzymes::isozyme::{select_best_isozyme, Isozyme};
/// let masses = IndexMap::from([("a".to_string(), 10.0), ("b".to_string(), 10.0)]);
/// let isozymes = vec![
///     Isozyme::new(&[("a", 1.0)], Some(20.), None), // score 2.0
///     Isozyme::new(&[("b", 2.0)], Some(70.), None), // score 3.5
/// ];
/// assert_eq!(select_best_isozyme(&isozymes, &masses).unwrap(), Some(1));
/// ```
pub fn select_best_isozyme(
    isozymes: &[Isozyme],
    molar_masses: &IndexMap<String, f64>,
) -> Result<Option<usize>, EnzymeModelError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, isozyme) in isozymes.iter().enumerate() {
        let score = isozyme_score(isozyme, molar_masses)?;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    Ok(best.map(|(index, _)| index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masses() -> IndexMap<String, f64> {
        IndexMap::from([
            ("g1".to_string(), 30.),
            ("g2".to_string(), 10.),
            ("g3".to_string(), 20.),
        ])
    }

    #[test]
    fn kcat_by_direction() {
        let iso = Isozyme::new(&[("g1", 1.)], Some(100.), Some(0.));
        assert_eq!(iso.kcat(Direction::Forward), Some(100.));
        // A zero turnover number can't carry flux
        assert_eq!(iso.kcat(Direction::Reverse), None);
        assert_eq!(iso.kcat(Direction::PassThrough), None);

        let forward_only = IsozymeBuilder::default()
            .kcat_forward(Some(5.))
            .build()
            .unwrap();
        assert_eq!(forward_only.kcat(Direction::Reverse), None);
        assert!(forward_only.gene_product_count.is_empty());
    }

    #[test]
    fn complex_mass() {
        let iso = Isozyme::new(&[("g1", 2.), ("g2", 3.)], Some(1.), None);
        assert!((iso.complex_mass(&masses()).unwrap() - 90.).abs() < 1e-12);

        let unknown = Isozyme::new(&[("g9", 1.)], Some(1.), None);
        assert_eq!(
            unknown.complex_mass(&masses()),
            Err(EnzymeModelError::MissingMolarMass {
                gene: "g9".to_string()
            })
        );
    }

    #[test]
    fn score() {
        // max(100, 50) / (2 * 30)
        let iso = Isozyme::new(&[("g1", 2.)], Some(100.), Some(50.));
        assert!((isozyme_score(&iso, &masses()).unwrap() - 100. / 60.).abs() < 1e-12);
        // Reverse turnover can be the larger one
        let iso = Isozyme::new(&[("g2", 1.)], Some(10.), Some(40.));
        assert!((isozyme_score(&iso, &masses()).unwrap() - 4.).abs() < 1e-12);
        // No turnover at all
        let iso = Isozyme::new(&[("g2", 1.)], None, None);
        assert_eq!(isozyme_score(&iso, &masses()).unwrap(), 0.);
        // No gene products
        let iso = Isozyme::new(&[], Some(1.), None);
        assert_eq!(isozyme_score(&iso, &masses()).unwrap(), f64::INFINITY);
        // Massless gene product, even when given as -0.0
        let weightless = IndexMap::from([("g0".to_string(), -0f64)]);
        let iso = Isozyme::new(&[("g0", 1.)], Some(1.), None);
        assert_eq!(isozyme_score(&iso, &weightless).unwrap(), f64::INFINITY);
    }

    #[test]
    fn selects_highest_score() {
        let isozymes = vec![
            Isozyme::new(&[("g2", 1.)], Some(20.), None), // 2.0
            Isozyme::new(&[("g3", 1.)], Some(70.), Some(10.)), // 3.5
            Isozyme::new(&[("g1", 1.)], Some(30.), None), // 1.0
        ];
        assert_eq!(select_best_isozyme(&isozymes, &masses()).unwrap(), Some(1));
    }

    #[test]
    fn isozyme_without_gene_products_wins() {
        let geneless = Isozyme::new(&[], Some(1.), None);
        assert_eq!(geneless.complex_mass(&masses()).unwrap(), 0.);
        assert!(geneless.complex_mass(&masses()).unwrap().is_sign_positive());
        let isozymes = vec![Isozyme::new(&[("g1", 1.)], Some(1.), None), geneless];
        assert_eq!(select_best_isozyme(&isozymes, &masses()).unwrap(), Some(1));
    }

    #[test]
    fn ties_go_to_first_listed() {
        let isozymes = vec![
            Isozyme::new(&[("g2", 1.)], Some(20.), None), // 2.0
            Isozyme::new(&[("g3", 1.)], Some(40.), None), // 2.0
        ];
        assert_eq!(select_best_isozyme(&isozymes, &masses()).unwrap(), Some(0));
        assert_eq!(select_best_isozyme(&[], &masses()).unwrap(), None);
    }

    #[test]
    fn validation() {
        let good = Isozyme::new(&[("g1", 1.)], Some(1.), None);
        assert!(good.validate("R", 0).is_ok());

        let negative_kcat = Isozyme::new(&[("g1", 1.)], Some(-1.), None);
        if let Err(EnzymeModelError::InvalidIsozyme { reaction, isozyme, .. }) =
            negative_kcat.validate("R", 3)
        {
            assert_eq!(reaction, "R");
            assert_eq!(isozyme, 3);
        } else {
            panic!("Negative turnover number not caught")
        }

        let zero_count = Isozyme::new(&[("g1", 0.)], Some(1.), None);
        assert!(zero_count.validate("R", 0).is_err());
    }

    #[test]
    fn deserialize_catalogue() {
        let json = r#"{
            "R1": [
                {"gene_product_count": {"g1": 2.0}, "kcat_forward": 100.0, "kcat_reverse": 50.0}
            ],
            "R2": [
                {"gene_product_count": {"g2": 1.0}, "kcat_forward": 10.0},
                {"kcat_reverse": 3.0}
            ]
        }"#;
        let catalogue: IsozymeCatalogue = serde_json::from_str(json).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(
            catalogue["R1"][0],
            Isozyme::new(&[("g1", 2.)], Some(100.), Some(50.))
        );
        assert_eq!(catalogue["R2"][0].kcat_reverse, None);
        assert!(catalogue["R2"][1].gene_product_count.is_empty());
        assert_eq!(catalogue["R2"][1].kcat_reverse, Some(3.));
    }
}
