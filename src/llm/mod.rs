//! Text-generation collaborator interface and HTTP implementation

pub mod client;

pub use client::{HttpTextGenerator, TextGenerator};

#[cfg(test)]
pub use client::MockTextGenerator;
