pub mod client;
pub mod resolver;

pub use client::{DefinitionSource, FreeDictionaryClient};
pub use resolver::Dictionary;
