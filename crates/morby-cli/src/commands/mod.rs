pub mod deal;
pub mod schedule;
