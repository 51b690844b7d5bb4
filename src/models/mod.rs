pub mod pet;
pub mod user;
pub mod workout;
