pub mod examples;
pub mod memory;
pub mod store;
pub mod word_bank;
