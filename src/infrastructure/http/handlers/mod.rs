//! HTTP Handlers

mod ping;
mod tts;
mod voice;

pub use ping::*;
pub use tts::*;
pub use voice::*;
