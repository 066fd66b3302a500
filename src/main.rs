use tracing_subscriber::fmt::format::FmtSpan;

use linkbuilder::config::{self, Config};
use linkbuilder::Error;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let level = config::log_level(|key| std::env::var(key).ok())?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let config = Config::load()?;

    linkbuilder::run(config).await
}
