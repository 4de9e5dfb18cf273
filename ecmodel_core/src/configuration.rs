use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Defaults used throughout the crate, read through [`CONFIGURATION`]
pub struct Configuration {
    /// Lower bound given to reactions built without an explicit one
    pub lower_bound: f64,
    /// Upper bound given to reactions built without an explicit one
    pub upper_bound: f64,
    /// Upper concentration bound used for gene products without caller supplied bounds,
    /// when the [`MissingGeneBounds::Unconstrained`](crate::enzymes::parameters::MissingGeneBounds)
    /// policy is in effect
    pub gene_product_upper_bound: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            gene_product_upper_bound: f64::INFINITY,
        }
    }
}

/// Read a value out of the global configuration, falling back to the defaults if the lock has
/// been poisoned
pub(crate) fn read_configuration<T>(f: impl FnOnce(&Configuration) -> T) -> T {
    match CONFIGURATION.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}
