pub mod form;
pub mod profile;
