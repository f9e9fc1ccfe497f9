//! Cluster reduction: from "visit one platform per station" to an
//! ordinary ATSP.
//!
//! Standard tour-search algorithms assume every node must be visited
//! exactly once. The Noon–Bean transformation bridges the gap behind a
//! single interface, so the tour solver never needs station awareness.
//!
//! - [`reduce`] — build the transformed instance from graph + cost matrix
//! - [`ReducedInstance`] — the ATSP plus decode/encode mappings and the
//!   penalty offset

mod instance;
mod noon_bean;

pub use instance::ReducedInstance;
pub use noon_bean::reduce;
