//! Legacy brand: sell / rent / keep diagnosis for an inherited family home.

pub mod choice;
pub mod guides;
pub mod questions;
