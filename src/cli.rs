use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub struct CliOptions {
    pub log_level: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub version: bool,
}

pub fn build_cli() -> Command {
    Command::new("readme-gpt")
        .about("Generate GitHub README drafts through a chat-completions API")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .num_args(1)
                .help("Address to bind (overrides READMEGPT_HOST)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .num_args(1)
                .value_parser(value_parser!(u16))
                .help("Port to listen on (overrides READMEGPT_PORT)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            log_level: matches.get_one::<String>("log-level").cloned(),
            host: matches.get_one::<String>("host").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            version: matches.get_flag("version"),
        }
    }
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level beats RUST_LOG, which beats the info default.
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.init();
}
