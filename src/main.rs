use anyhow::{Context, Result};
use clap::Parser;

use assistant_tui::{
    app::App,
    cli::{Args, ChatArgs, Command, ServeArgs},
    config::{data_root, ConfigStore},
    endpoint::AssistantClient,
    logging,
    server::{self, UpstreamConfig},
    settings::{load_settings, settings_path},
    tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let data_dir = match args.data_dir {
        Some(d) => d,
        None => data_root().context("resolve data dir")?,
    };

    match args.command.unwrap_or_else(|| Command::Chat(ChatArgs::default())) {
        Command::Chat(chat) => run_chat(data_dir, chat).await,
        Command::Serve(serve) => run_serve(serve).await,
    }
}

async fn run_chat(data_dir: std::path::PathBuf, args: ChatArgs) -> Result<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;
    let _guard = logging::init_file(&log_dir);

    let settings = load_settings(&settings_path()?).context("load settings")?;
    let endpoint = settings.endpoint(args.endpoint.as_deref());

    let app = App::load(ConfigStore::in_dir(&data_dir), settings.presets(), endpoint.clone());
    tui::run(app, AssistantClient::new(endpoint)).await
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    logging::init_stderr();
    server::serve(
        &args.bind,
        UpstreamConfig {
            url: args.upstream,
            model: args.model,
            api_key: args.api_key,
        },
    )
    .await
}
