//! The nine MUTCD 2009 signal warrants.
//!
//! Each evaluator is a pure function from site inputs to a
//! [`WarrantVerdict`](types::WarrantVerdict). None of them depend on another
//! evaluator's output; Warrant 7 only reads the Warrant 1 and 3 tables.

pub mod coordinated;
pub mod crash;
pub mod eight_hour;
pub mod four_hour;
pub mod grade_crossing;
pub mod network;
pub mod peak_hour;
pub mod pedestrian;
pub mod school;
pub mod types;
