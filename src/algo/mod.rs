/// Pure transformations from raw records to analysis results

pub mod portfolio;
pub mod sniper;

pub use portfolio::aggregate;
pub use sniper::analyze;
