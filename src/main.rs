use anyhow::{anyhow, Context};
use readme_gpt::cli::{self, CliOptions};
use readme_gpt::config::Config;
use readme_gpt::server::{self, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    let opts = CliOptions::from_matches(&matches);

    cli::init_logging(opts.log_level.as_deref());

    if opts.version {
        println!("readme-gpt {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::from_env()
        .map_err(|e| anyhow!(e))?
        .with_overrides(opts.host, opts.port);
    let state = AppState::new(config).context("building completions client")?;

    server::startup(state).await?;
    Ok(())
}
