pub mod form;
pub mod selector;
