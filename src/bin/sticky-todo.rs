use anyhow::Result;
use sticky_todo::{terminal, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::info!("Using state file {}", config.state_file.display());
    terminal::run(&config).await
}
