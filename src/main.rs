//! Voxora - 文本转语音编排
//!
//! - serve: 启动本地代理（服务端持有密钥）
//! - voices: 列出语言或某语言下的音色
//! - say: 合成一段文本并写出 MP3

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use voxora::application::{
    ApiKey, CatalogState, ExecutionModeRouter, NotificationLevel, SpeechSession, TextLimits,
};
use voxora::config::{load_config, load_config_from_path, print_config, AppConfig};
use voxora::domain::synthesis::{ExecutionMode, SynthesisSettings};
use voxora::domain::voice::display_label;
use voxora::infrastructure::adapters::{
    GoogleTtsClient, GoogleTtsClientConfig, ProxyTtsClient, ProxyTtsClientConfig,
};
use voxora::infrastructure::http::{AppState, HttpServer, ProxyLimits, ServerConfig};
use voxora::infrastructure::memory::{InMemoryAudioStore, StaticCredentialStore};

/// Text-to-speech orchestration: direct provider access or a local key-holding proxy
#[derive(Parser)]
#[command(name = "voxora")]
#[command(version)]
#[command(about = "Text-to-speech client and local proxy", long_about = None)]
struct Cli {
    /// Configuration file (defaults to config.toml / config.local.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ClientArgs {
    /// Execution mode: direct | proxy
    #[arg(short, long)]
    mode: Option<ExecutionMode>,

    /// Client API key for direct mode
    #[arg(long)]
    api_key: Option<String>,

    /// Proxy URL for proxy mode
    #[arg(long)]
    proxy_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local proxy server
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List languages, or the voices offered for one language
    Voices {
        /// Language code, e.g. en-US
        #[arg(short, long)]
        language: Option<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Synthesize text and write the audio file
    Say {
        /// Text to speak
        #[arg(required_unless_present = "sample")]
        text: Option<String>,

        /// Use the built-in sample text
        #[arg(long)]
        sample: bool,

        /// Language code
        #[arg(short, long)]
        language: Option<String>,

        /// Voice name (must be offered for the language)
        #[arg(short, long)]
        voice: Option<String>,

        /// Speaking rate (0.25 - 4.0)
        #[arg(long)]
        speed: Option<f64>,

        /// Pitch in semitones (-20 - 20)
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f64>,

        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        client: ClientArgs,
    },
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voxora={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 优先级：环境变量 > 配置文件 > 默认值
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Voices { language, client } => {
            list_voices(&config, language.as_deref(), &client).await
        }
        Commands::Say {
            text,
            sample,
            language,
            voice,
            speed,
            pitch,
            out_dir,
            client,
        } => {
            let request = SayRequest {
                text: if sample { None } else { text },
                language,
                voice,
                speed,
                pitch,
                out_dir,
            };
            say(&config, request, &client).await
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!("Voxora - local TTS proxy");
    print_config(&config);

    let provider = GoogleTtsClient::new(
        GoogleTtsClientConfig::new(&config.provider.base_url)
            .with_timeout(config.provider.timeout_secs),
    )?;

    let state = AppState::new(
        Arc::new(provider),
        config.provider.api_key.clone().and_then(ApiKey::new),
    )
    .with_limits(ProxyLimits {
        max_text_chars: config.limits.max_text_chars,
        enforce: config.limits.enforce_on_proxy,
    });

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config
            .with_static_dir(&config.server.static_files.dir)
            .with_static_path(&config.server.static_files.path);
    }

    HttpServer::new(server_config, state)
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 按配置与命令行参数组装会话
fn build_session(config: &AppConfig, client: &ClientArgs) -> anyhow::Result<SpeechSession> {
    let mode = client.mode.unwrap_or(config.client.mode);
    if mode != config.client.mode {
        eprintln!("{}", mode.switch_notice());
    }

    let direct = GoogleTtsClient::new(
        GoogleTtsClientConfig::new(&config.provider.base_url)
            .with_timeout(config.provider.timeout_secs),
    )?;
    let proxy = ProxyTtsClient::new(
        ProxyTtsClientConfig::new(
            client
                .proxy_url
                .clone()
                .unwrap_or_else(|| config.client.proxy_url.clone()),
        )
        .with_timeout(config.provider.timeout_secs),
    )?;

    let router = Arc::new(ExecutionModeRouter::new(Arc::new(direct), Arc::new(proxy)));
    let api_key = client.api_key.clone().or_else(|| config.client.api_key.clone());
    let credentials = Arc::new(StaticCredentialStore::new(mode, api_key));

    Ok(SpeechSession::new(router, credentials, InMemoryAudioStore::new().arc())
        .with_settings(SynthesisSettings::for_language(&config.client.language))
        .with_text_limits(TextLimits {
            warn_chars: config.limits.warn_text_chars,
            max_chars: config.limits.max_text_chars,
        }))
}

fn ensure_catalog(state: &CatalogState) -> anyhow::Result<()> {
    match state {
        CatalogState::Ready(_) => Ok(()),
        CatalogState::CredentialRequired => bail!("API Key required in Demo Mode"),
        CatalogState::Unavailable(msg) => bail!("Could not load voice list: {}", msg),
        CatalogState::Loading => bail!("Voice list is still loading"),
    }
}

async fn list_voices(
    config: &AppConfig,
    language: Option<&str>,
    client: &ClientArgs,
) -> anyhow::Result<()> {
    let mut session = build_session(config, client)?;
    ensure_catalog(session.refresh_voices().await)?;

    let Some(language) = language else {
        for code in session.languages() {
            println!("{}", code);
        }
        return Ok(());
    };

    if !session.languages().iter().any(|code| code == language) {
        bail!("Language {} is not offered", language);
    }
    for voice in session.select_language(language) {
        println!("{}", display_label(voice));
    }
    Ok(())
}

struct SayRequest {
    /// None 表示使用示例文本
    text: Option<String>,
    language: Option<String>,
    voice: Option<String>,
    speed: Option<f64>,
    pitch: Option<f64>,
    out_dir: Option<PathBuf>,
}

async fn say(config: &AppConfig, request: SayRequest, client: &ClientArgs) -> anyhow::Result<()> {
    let mut session = build_session(config, client)?;

    let catalog_ready = matches!(session.refresh_voices().await, CatalogState::Ready(_));
    if catalog_ready {
        if let Some(language) = &request.language {
            if !session.languages().iter().any(|code| code == language) {
                bail!("Language {} is not offered", language);
            }
            session.select_language(language);
        }
        if let Some(voice) = &request.voice {
            session.select_voice(voice)?;
        }
    } else if request.voice.is_some() {
        tracing::warn!("Voice list unavailable; --voice is ignored");
    }

    if let Some(speed) = request.speed {
        session.set_speed(speed);
    }
    if let Some(pitch) = request.pitch {
        session.set_pitch(pitch);
    }

    let stats = match request.text {
        Some(text) => session.set_text(text),
        None => session.use_sample_text(),
    };
    if stats.over_limit {
        bail!("Text is too long ({})", stats);
    }
    if stats.near_limit {
        eprintln!("Warning: text is close to the limit ({})", stats);
    }

    let outcome = session.generate().await;
    for note in session.drain_notifications() {
        match note.level {
            NotificationLevel::Error => eprintln!("error: {}", note.message),
            _ => eprintln!("{}", note.message),
        }
    }
    let result = outcome.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let out_dir = request
        .out_dir
        .unwrap_or_else(|| config.client.output_dir.clone());
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join(&result.audio.filename);
    tokio::fs::write(&path, result.audio_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        audio_size = result.audio.size(),
        handle = %result.audio.handle.uri(),
        "Audio written"
    );
    println!("{}", path.display());
    Ok(())
}
