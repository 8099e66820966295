mod commands;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging()?;

    let cfg = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    scan::scan(commands.request(), &cfg).await
}
