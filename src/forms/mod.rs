//! Request bodies validated with `validator` and converted into typed payloads.

pub mod categories;
pub mod cycles;
pub mod locations;
pub mod predictions;
pub mod rules;
pub mod savings;
pub mod schedules;
