//! Diesel row types and their conversions to and from domain entities.

#[cfg(feature = "server")]
pub mod config;
pub mod cycle;
pub mod frequency;
pub mod group;
pub mod location;
pub mod member;
pub mod penalty;
pub mod saving;
pub mod schedule;
pub mod slot;
