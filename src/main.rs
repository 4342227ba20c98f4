use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use senryu_quote::application::dto::{QuoteOutcome, QuoteRequest};
use senryu_quote::application::services::{
    AvatarCacheWriter, DEFAULT_QUEUE_CAPACITY, IdentityResolver, RandomCandidateSelector,
};
use senryu_quote::application::use_cases::QuoteImageUseCase;
use senryu_quote::domain::entities::{
    ChannelId, CompositionCandidates, GuildId, MessageId, UserId,
};
use senryu_quote::domain::errors::QuoteError;
use senryu_quote::domain::ports::{CandidateStorePort, PlatformPort};
use senryu_quote::infrastructure::{
    AppConfig, CdnUploader, CliArgs, Command, ConfigLoader, DiscordRestClient, FileStore,
    QuoteApiClient,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let loader = ConfigLoader::new()?;
    let mut config = loader.load(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn open_store(config: &AppConfig) -> Result<Arc<FileStore>> {
    let path = config
        .effective_store_path()
        .ok_or_else(|| eyre!("failed to determine store path"))?;
    let store = FileStore::open(&path)
        .await
        .wrap_err_with(|| format!("failed to open store at {}", path.display()))?;
    Ok(Arc::new(store))
}

async fn quote(
    config: &AppConfig,
    store: Arc<FileStore>,
    writer: &AvatarCacheWriter,
    request: (Option<GuildId>, ChannelId, MessageId, Option<UserId>),
) -> Result<Result<QuoteOutcome, QuoteError>> {
    let (guild_id, channel_id, message_id, invoker_id) = request;

    let settings = match config.quote_settings() {
        Ok(settings) => settings,
        Err(e) => return Ok(Err(e)),
    };
    let token = config
        .discord_token()
        .ok_or_else(|| eyre!("DISCORD_TOKEN is not set"))?;

    let platform: Arc<dyn PlatformPort> = Arc::new(DiscordRestClient::new(token)?);
    let bot = platform.current_user().await?;
    info!(user_id = %bot.id(), username = %bot.username(), "Authenticated as bot");

    let resolver = IdentityResolver::new(
        platform.clone(),
        store.clone(),
        store,
        writer.clone(),
        Arc::new(RandomCandidateSelector),
    );
    let use_case = QuoteImageUseCase::new(
        &settings,
        resolver,
        Arc::new(QuoteApiClient::new(&settings)?),
        Arc::new(CdnUploader::new(&settings)?),
        bot,
    );

    let target = platform.fetch_message(channel_id, message_id).await?;
    let mut request = QuoteRequest::new(target);
    if let Some(guild_id) = guild_id {
        request = request.in_guild(guild_id);
    }
    if let Some(invoker_id) = invoker_id {
        match platform.fetch_user(invoker_id).await {
            Ok(invoker) => request = request.invoked_by(invoker),
            Err(e) => warn!(error = %e, %invoker_id, "Failed to fetch invoking user"),
        }
    }

    Ok(use_case.execute(request).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = senryu_quote::VERSION, "Starting {}", senryu_quote::NAME);

    let store = open_store(&config).await?;

    match args.command {
        Command::Quote {
            guild_id,
            channel_id,
            message_id,
            invoker_id,
        } => {
            let writer = AvatarCacheWriter::spawn(store.clone(), DEFAULT_QUEUE_CAPACITY);
            let result = quote(
                &config,
                store,
                &writer,
                (
                    guild_id.map(GuildId),
                    ChannelId(channel_id),
                    MessageId(message_id),
                    invoker_id.map(UserId),
                ),
            )
            .await;
            writer.shutdown().await;

            match result? {
                Ok(outcome) => println!("{}", outcome.reply_text()),
                Err(e) => {
                    println!("{}", e.user_message());
                    return Err(e.into());
                }
            }
        }
        Command::RecordCandidates {
            message_id,
            upper,
            middle,
            lower,
        } => {
            let candidates = CompositionCandidates::new(
                MessageId(message_id),
                UserId(upper),
                UserId(middle),
                UserId(lower),
            );
            store.put_candidates(&candidates).await?;
            info!(%message_id, "Recorded composition candidates");
        }
    }

    Ok(())
}
