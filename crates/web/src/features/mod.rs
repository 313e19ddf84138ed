pub mod admin;
pub mod catalog;
pub mod wizard;
