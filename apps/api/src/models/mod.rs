pub mod answer;
pub mod form;
pub mod mapping;
pub mod profile;
