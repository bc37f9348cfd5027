use anyhow::{Context, Result};
use llm_bridge::cli::output::Output;
use llm_bridge::cli::{ChatArgs, Cli, Commands};
use llm_bridge::llm::{ChatMessage, LLMClient, LLMClientExt};
use llm_bridge::utils::toml_config::{LlmBridgeConfig, ProviderConfig};
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = LlmBridgeConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Chat(args) => run_chat(config, args, &output, cli.verbose).await,
        Commands::Config { validate } => run_config(&config, validate, &output),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run_chat(
    config: LlmBridgeConfig,
    args: ChatArgs,
    output: &Output,
    verbose: bool,
) -> Result<()> {
    let mut provider = config.provider(args.provider.as_deref())?.clone();
    apply_overrides(&mut provider, &args);

    let client = provider.create_client()?;
    if verbose {
        output.kv("provider", client.provider());
        output.kv("model", client.name());
    }

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &args.system {
        messages.push(ChatMessage::system(system.as_str()));
    }
    messages.push(ChatMessage::user(args.prompt_text()));

    if args.json {
        let result = client
            .invoke_structured::<serde_json::Value>(&messages)
            .await?;
        output.completion(&serde_json::to_string_pretty(&result.completion)?);
    } else {
        let result = client.invoke(&messages).await?;
        output.completion(&result.completion);
    }

    Ok(())
}

fn apply_overrides(provider: &mut ProviderConfig, args: &ChatArgs) {
    match provider {
        ProviderConfig::Ollama(cfg) => {
            if let Some(model) = &args.model {
                cfg.model = model.clone();
            }
            if let Some(base_url) = &args.base_url {
                cfg.base_url = base_url.clone();
            }
            if let Some(temperature) = args.temperature {
                cfg.temperature = temperature;
            }
            for (key, value) in &args.options {
                cfg.options.insert(key.clone(), value.clone());
            }
        }
    }
}

fn run_config(config: &LlmBridgeConfig, validate: bool, output: &Output) -> Result<()> {
    if validate {
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                anyhow::bail!("configuration is invalid");
            }
        }
    }

    output.header("Providers");
    output.kv("default", &config.default_provider);
    for name in config.provider_names() {
        let provider = config.provider(Some(name))?;
        output.kv(name, &format!("{} ({})", provider.model(), provider.kind()));
    }

    Ok(())
}
