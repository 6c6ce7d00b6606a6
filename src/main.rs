use clap::Parser;
use presentation_tts::controllers::batch::{render_outcome, render_outcome_json};
use presentation_tts::controllers::{BatchController, Cli};
use presentation_tts::domain::batch::TaskHandler;
use presentation_tts::domain::presentation::{DryRunService, PresentationService};
use presentation_tts::infrastructure::config::{Config, LogFormat};
use presentation_tts::infrastructure::repositories::{
    DynamoDbPresentationRepository, PollyTtsRepository, S3AudioRepository,
};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    let options = cli.run_options()?;
    tracing::info!(
        mode = ?options.mode,
        group = %options.group,
        max_workers = options.max_workers,
        dry_run = options.dry_run,
        "Starting presentation-tts"
    );

    let handler: Arc<dyn TaskHandler> = if options.dry_run {
        Arc::new(DryRunService::new())
    } else {
        build_presentation_service(&config).await?
    };
    let controller = BatchController::new(handler);

    // Prompt on stderr so stdout only carries the report
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();
    let outcome = controller.run(&options, &mut input, &mut prompt).await?;

    if cli.json {
        println!("{}", render_outcome_json(&outcome)?);
    } else {
        print!("{}", render_outcome(&outcome));
    }

    Ok(outcome.is_success())
}

async fn build_presentation_service(config: &Config) -> anyhow::Result<Arc<dyn TaskHandler>> {
    let bucket = config.require_audio_bucket()?.to_string();
    let engine = config.tts_engine()?;

    tracing::info!("Initializing AWS clients with region: {}", config.aws_region);

    let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
    let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
    if !has_access_key || !has_secret_key {
        tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (profiles, instance metadata, etc.)");
    }

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()));
    if let Some(endpoint) = &config.aws_endpoint_url {
        tracing::info!(endpoint = %endpoint, "Using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }
    let aws_config = loader.load().await;

    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.aws_endpoint_url.is_some())
        .build();
    let s3_client = Arc::new(aws_sdk_s3::Client::from_conf(s3_config));
    let dynamodb_client = Arc::new(aws_sdk_dynamodb::Client::new(&aws_config));

    tracing::info!(
        bucket = %bucket,
        table = %config.presentation_table,
        engine = ?engine,
        "AWS clients initialized"
    );

    let tts_repo = Arc::new(PollyTtsRepository::new(polly_client, engine));
    let audio_repo = Arc::new(S3AudioRepository::new(s3_client, bucket));
    let presentation_repo = Arc::new(DynamoDbPresentationRepository::new(
        dynamodb_client,
        config.presentation_table.clone(),
    ));

    Ok(Arc::new(PresentationService::new(
        tts_repo,
        audio_repo,
        presentation_repo,
    )))
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "presentation_tts=debug"
    } else {
        "presentation_tts=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}
