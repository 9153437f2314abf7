//! Subsidy brand: matches household and building attributes against the
//! national renovation subsidy programs.

pub mod catalog;
pub mod diagnosis;
