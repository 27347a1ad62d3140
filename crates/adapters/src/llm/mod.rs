pub mod null_llm;
#[cfg(feature = "http-llm")]
pub mod http_llm;

pub use null_llm::NullLlm;
#[cfg(feature = "http-llm")]
pub use http_llm::HttpLlm;
