//! Qdrant vector database integration.

pub mod client;
pub mod error;
pub mod parents;
pub mod payload;


pub use client::QdrantClient;
pub use error::VectorDbError;
pub use parents::QdrantParentStore;
pub use payload::{document_from_payload, value_to_json};
