pub mod fund;
pub mod generate;
