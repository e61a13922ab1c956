pub mod fetch;
pub mod llm;
pub mod observability;
pub mod persistence;
