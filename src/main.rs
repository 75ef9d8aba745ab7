use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use voicelog::{
    AgentCapture, Config, ContextTurn, InferenceObserver, MessageRole, SessionHandle, SessionLog,
    SynthesisObserver, UserCapture,
};

#[derive(Debug, Parser)]
#[command(name = "voicelog", about = "Conversation capture demo")]
struct Cli {
    /// Config file (without extension), e.g. "config/voicelog"
    #[arg(long, default_value = "config/voicelog")]
    config: String,

    /// Override the conversations base directory from the config
    #[arg(long)]
    conversations_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    let base_dir = cli
        .conversations_dir
        .unwrap_or_else(|| cfg.conversations.base_path.clone());

    info!("{} v0.1.0", cfg.service.name);

    let handle = SessionHandle::new();
    let session = Arc::new(SessionLog::create(&base_dir).await?);
    handle.install(Arc::clone(&session));
    info!("Session {} logging to {}", session.id(), handle.current_path()?.display());

    // Scripted exchange through the real capture adapters, standing in for
    // the model and synthesis boundaries of a live pipeline.
    let user_capture = UserCapture::new(Arc::clone(&session));
    let agent_capture = AgentCapture::new(Arc::clone(&session));

    let context = vec![
        ContextTurn::new(MessageRole::System, ["You are a helpful voice assistant."]),
        ContextTurn::new(MessageRole::User, ["What's the weather like today?"]),
    ];
    user_capture.on_request(&context).await;

    agent_capture
        .on_text("It's sunny with a light breeze this afternoon.")
        .await;

    let mut stream = agent_capture.begin_stream();
    for fragment in ["Anything ", "else I can ", "help with?"] {
        stream.on_fragment(fragment);
    }
    stream.on_end().await;

    let turns = session.turns().await?;
    info!("Recorded {} turns:", turns.len());
    for turn in &turns {
        info!("  [{:?}] {} ({})", turn.role, turn.content, turn.source);
    }

    Ok(())
}
