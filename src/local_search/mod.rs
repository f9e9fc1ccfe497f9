//! Local search operators for improving tours.
//!
//! Both operators are written for asymmetric cost matrices, which the
//! Noon–Bean reduction produces.
//!
//! - [`two_opt`] — segment reversal with exact asymmetric deltas
//! - [`or_opt`] — segment relocation without reversal

mod or_opt;
mod two_opt;

pub use or_opt::{or_opt_improve, or_opt_pass, tour_cost};
pub use two_opt::{two_opt_improve, two_opt_pass};
