//! MUTCD 2009 traffic signal warrant evaluation.
//!
//! Converts hourly traffic counts and site conditions into met / not met /
//! not applicable verdicts for the nine signal warrants, with the numbers
//! behind each verdict.

pub mod curve;
pub mod engine;
pub mod output;
pub mod roles;
pub mod series;
pub mod site;
pub mod summary;
pub mod tables;
pub mod warrants;
