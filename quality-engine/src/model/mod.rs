pub mod facts;
pub mod outcome;
pub mod role;
pub mod rule;
pub mod unit;
