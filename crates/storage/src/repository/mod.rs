pub mod audit;
pub mod category;
pub mod judge;
pub mod participant;
pub mod score;
pub mod scoreboard;
pub mod stats;
pub mod token;

use rust_decimal::Decimal;

pub(crate) fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
