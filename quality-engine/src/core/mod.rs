pub mod classify;
pub mod evaluate;
pub mod fields;
pub mod inspect;
pub mod resolve;
pub mod text;
