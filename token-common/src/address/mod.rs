pub mod address;
pub mod errors;
