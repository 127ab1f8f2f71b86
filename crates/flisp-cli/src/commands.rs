pub mod flatten;
pub mod generate;
pub mod inspect;
