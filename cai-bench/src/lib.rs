pub mod error;
pub mod ingest;
pub mod observation;
pub mod sample;
pub mod schema;
