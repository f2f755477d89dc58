pub mod types;

pub use types::{Call, Invocation, Receipt};
