/// Process-wide configuration, built once at startup and passed down by reference

pub mod settings;

pub use settings::*;
