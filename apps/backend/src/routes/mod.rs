pub mod examples;
pub mod learners;
pub mod progress;
pub mod quiz;
