//! Layout trait: database in, positioned geometry out

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
///
/// Layout is a pure function of the database and the algorithm's
/// configuration. Running it twice on the same input yields the same
/// coordinates; nothing is cached between passes.
pub trait LayoutAlgorithm<D: Database> {
    /// The positioned result of this layout algorithm
    type Output;

    /// Compute positions for every element in the database
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
