//! Command implementations.

pub mod rank;
pub mod scores;

pub use self::rank::execute_rank;
pub use self::scores::execute_scores;
