// Adapters layer: concrete implementations for external systems (Reddit, OpenAI).

pub mod openai;
pub mod reddit;
