pub mod generator;
pub mod knowledge;
pub mod prompt;
pub mod providers;

pub use generator::{GuideError, GuideGenerator, GuideOutcome};
