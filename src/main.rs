use clap::Parser;
use dotenv::dotenv;
use edesia::commands::CommandHandler;
use edesia::config::{AppConfig, ConfigOverrides};
use edesia::database::DailyLogStore;
use edesia::food::api::UsdaClient;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Track what you eat against FoodData Central", long_about = None)]
struct Args {
    /// api.data.gov key; overrides the stored key
    #[arg(short, long)]
    api_key: Option<String>,

    /// Directory holding the stored key and daily logs (default ~/.edesia)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        data_dir: args.data_dir,
        api_key: args.api_key,
        api_base_url: None,
    }
    .or(ConfigOverrides::from_env());

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    let config = AppConfig::load(overrides, &mut rl)?;
    let client = UsdaClient::new(&config);
    let store = DailyLogStore::new(config.daily_log_dir());

    let command_handler = CommandHandler::new(Box::new(client), store);
    command_handler.run(&mut rl).await?;

    Ok(())
}
