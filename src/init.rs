use console_subscriber::ConsoleLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::cli::{CmdArgs, LogFormat};

pub fn init_tracing(args: &CmdArgs) -> anyhow::Result<()> {
    let console_layer = args
        .tokio_console
        .then(|| ConsoleLayer::builder().with_default_env().spawn());
    let fmt_layer = match args.log_format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_target(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(console_layer)
        .try_init()?;

    Ok(())
}
