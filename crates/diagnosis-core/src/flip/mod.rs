//! Flip brand: maximum allowable offer (MAO) calculator for resale purchases.

pub mod mao;
