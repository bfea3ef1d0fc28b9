pub mod catalog;
pub mod character;
pub mod training;
