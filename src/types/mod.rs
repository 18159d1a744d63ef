pub mod cadence;
pub mod record;
pub mod units;
pub mod variables;
