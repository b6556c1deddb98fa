use anyhow::Result;

use dutydesk_app::AppConfig;

fn main() -> Result<()> {
    dutydesk_observability::init();

    let config = AppConfig::from_env();
    let mut session = dutydesk_app::build_session(&config)?;
    tracing::info!(seed_demo = config.seed_demo, "session ready; reading commands from stdin");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run(stdin.lock(), stdout.lock())
}
