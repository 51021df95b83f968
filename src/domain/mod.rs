//! Domain entities and pure scheduling/penalty logic.
//!
//! Nothing in this module touches storage; repositories convert to and from
//! these types at the persistence boundary.

pub mod auth;
pub mod cycle;
pub mod frequency;
pub mod group;
pub mod location;
pub mod member;
pub mod penalty;
pub mod prediction;
pub mod saving;
pub mod schedule;
pub mod slot;
pub mod types;
