//! Kominka brand: rental yield calculator for renovated vacant houses.

pub mod scenarios;
pub mod yield_calc;
