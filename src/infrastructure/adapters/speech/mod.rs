//! Speech Adapters - SpeechEndpointPort 实现

mod fake_endpoint;
mod google_client;
mod proxy_client;

pub use fake_endpoint::FakeSpeechEndpoint;
pub use google_client::{GoogleTtsClient, GoogleTtsClientConfig, DEFAULT_PROVIDER_URL};
pub use proxy_client::{ProxyTtsClient, ProxyTtsClientConfig, DEFAULT_PROXY_URL};
