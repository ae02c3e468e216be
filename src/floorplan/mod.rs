pub mod binder;
pub mod element;
pub mod modal;
pub mod normalizer;
pub mod renderer;
