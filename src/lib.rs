#![warn(missing_docs)]
#![doc(test(no_crate_inject))]
#![doc(test(attr(deny(unused, future_incompatible))))]

//! This crate computes spatial and distributional inequality statistics over
//! numeric attribute vectors, with permutation-based significance testing, as
//! described by these papers:
//!
//! - Rey & Smith, [A spatial decomposition of the Gini coefficient][gini], 2013
//! - Theil, *Economics and Information Theory*, 1967
//! - Nijkamp & Poot, [Cultural Diversity: A Matter of Measurement][diversity], 2015
//!
//! [gini]: https://doi.org/10.1007/s12076-012-0086-z
//! [diversity]: https://www.econstor.eu/bitstream/10419/107568/1/dp8782.pdf
//!
//! Two permutation-inference engines sit at the center: [`SpatialGini`]
//! decomposes total absolute-deviation inequality into neighbor-pair and
//! non-neighbor components against a fixed [`Adjacency`] structure, and
//! [`TheilSim`] decomposes Theil's *T* into between-group and within-group
//! components against a fixed [`Partition`]. Both estimate the null
//! distribution of the structured component by repeatedly reshuffling the
//! value-to-unit assignment with a seedable generator, and derive empirical
//! p-values from the resulting draws.
//!
//! The remaining modules are closed-form index formulas: [`atkinson`],
//! [`schutz`], [`wolfson`], and the diversity/segregation suite in
//! [`indices`]. All of them operate on in-memory sequences of reals; callers
//! working with labeled or tabular data extract a plain value vector first.

pub mod adjacency;
pub mod atkinson;
pub mod gini;
pub mod indices;
pub mod partition;
mod permutation;
pub mod schutz;
pub mod theil;
pub mod wolfson;

pub use crate::adjacency::Adjacency;
pub use crate::atkinson::Atkinson;
pub use crate::gini::{gini, SpatialGini, SpatialGiniInference};
pub use crate::indices::GroupCounts;
pub use crate::partition::Partition;
pub use crate::schutz::Schutz;
pub use crate::theil::{theil, theil_decomposition, TheilDecomposition, TheilSim};
pub use crate::wolfson::{lorenz_curve, wolfson};

/// Rejected preconditions and degenerate inputs.
///
/// Every error is local to a single call; there are no partial results. Zero
/// values inside otherwise valid input are not errors: they are handled by
/// the epsilon-substitution policy documented on [`theil`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input contained no observations.
    #[error("input must contain at least one observation")]
    Empty,

    /// Two inputs that must describe the same units disagree on length.
    #[error("expected {expected} observations, found {found}")]
    LengthMismatch {
        /// Number of units the auxiliary structure describes.
        expected: usize,
        /// Number of observations actually provided.
        found: usize,
    },

    /// An adjacency edge referenced a unit outside the value vector.
    #[error("unit index {unit} out of bounds for {units} units")]
    UnitOutOfBounds {
        /// The offending unit index.
        unit: usize,
        /// Total number of units.
        units: usize,
    },

    /// A value was zero or negative where positivity is required.
    #[error("all values must be positive, found {0}")]
    NonPositive(f64),

    /// The Atkinson inequality-aversion parameter was negative.
    #[error("inequality aversion parameter must be non-negative, got {0}")]
    NegativeAversion(f64),

    /// No neighbor pair carried a nonzero deviation, so the spatial
    /// polarization ratio is undefined.
    #[error("neighbor-pair deviation sum is zero, polarization ratio is undefined")]
    DegenerateAdjacency,

    /// A count matrix was built from rows of unequal length.
    #[error("count matrix rows must all have {expected} columns, found {found}")]
    RaggedMatrix {
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },
}

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
