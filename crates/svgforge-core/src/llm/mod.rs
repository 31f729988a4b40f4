mod openai;
mod traits;

pub use openai::{normalize_base_url, OpenAIClient};
pub use traits::*;
