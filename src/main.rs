// SPDX-License-Identifier: MPL-2.0
use forum_desk::app::{self, Flags};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
forum_desk

USAGE:
  forum_desk [OPTIONS]

OPTIONS:
  --lang <LOCALE>        Interface language (e.g. en-US, fr)
  --server <URL>         Forum base URL, overriding the config file
  --config-dir <DIR>     Directory holding settings.toml
  --log-level <LEVEL>    trace, debug, info, warn or error [default: info]
  -h, --help             Print this help
";

struct Cli {
    flags: Flags,
    log_level: String,
}

fn parse_args() -> Result<Cli, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let cli = Cli {
        flags: Flags {
            lang: args.opt_value_from_str("--lang")?,
            server: args.opt_value_from_str("--server")?,
            config_dir: args.opt_value_from_str("--config-dir")?,
        },
        log_level: args
            .opt_value_from_str("--log-level")?
            .unwrap_or_else(|| "info".to_string()),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("warning: unused arguments {remaining:?}");
    }
    Ok(cli)
}

fn main() -> iced::Result {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    // RUST_LOG wins over --log-level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forum_desk={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::info!("Starting forum_desk v{}", env!("CARGO_PKG_VERSION"));

    app::run(cli.flags)
}
