use clap::{Parser, Subcommand};

use chat_widget::application::messaging::{Input, InputParser};
use chat_widget::application::services::{ChatWidget, CommandReply, CommandService};
use chat_widget::infrastructure::adapters::ConsoleAdapter;
use chat_widget::infrastructure::backend::HttpBackend;
use chat_widget::infrastructure::config::Config;
use chat_widget::{ChatBackend, Surface};

#[derive(Parser)]
#[command(name = "chat-widget")]
#[command(about = "A minimal chat client for the store assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Server base URL (overrides config)
    #[arg(short, long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a chat session
    Run,
    /// Show version
    Version,
    /// Print the default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_chat(cli.config, cli.url) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("chat-widget v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str, url_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(mut config) => {
                config.apply_env();
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if let Some(url) = url_override {
        config.backend.base_url = url;
    }
    config
}

fn run_chat(config_path: String, url_override: Option<String>) -> anyhow::Result<()> {
    let config = load_config(&config_path, url_override);
    config.validate()?;

    tracing::info!("Connecting to {}", config.backend.base_url);

    let backend = HttpBackend::new(&config.backend)?;
    let surface = std::sync::Arc::new(ConsoleAdapter::new());
    let widget = ChatWidget::new(surface, backend, config.widget.clone());
    let parser = InputParser::new(config.console.prefix.clone());
    let commands = CommandService::new(config.console.prefix.clone());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_console(&widget, &parser, &commands, &config.console.prompt));

    Ok(())
}

async fn run_console<B: ChatBackend>(
    widget: &ChatWidget<ConsoleAdapter, B>,
    parser: &InputParser,
    commands: &CommandService,
    prompt: &str,
) {
    widget.initialize();

    // Each line is one Enter keypress
    while let Some(line) = widget.surface().read_line(prompt).await {
        match parser.parse(line) {
            Input::Text(text) => {
                widget.submit(&text).await;
            }
            Input::Command { name, args } => {
                match commands.handle(widget.backend(), &name, &args).await {
                    Ok(CommandReply::Lines(lines)) => {
                        for line in lines {
                            widget.surface().notice(&line);
                        }
                    }
                    Ok(CommandReply::Quit) => break,
                    Err(e) => {
                        tracing::warn!("Command {} failed: {}", name, e);
                        widget.surface().notice(&format!(
                            "Could not run {}{}. Try {}help.",
                            commands.prefix(),
                            name,
                            commands.prefix()
                        ));
                    }
                }
            }
        }
    }

    tracing::info!("Chat session ended");
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("{}", e),
    }
}
