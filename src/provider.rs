pub mod text;

pub use text::{
    create_generator, extract_chat_text, extract_message_text, AnthropicGenerator,
    OpenAiGenerator, ProviderError, TextGenerator,
};
