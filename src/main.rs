use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::info;

use role_console::app::App;
use role_console::config::AppConfig;
use role_console::util::log::init_logging;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;
    let log_file = init_logging(&config.log_dir)?;
    info!("Role console starting against {} (log: {})", config.base_url, log_file.display());

    let app = App::new(&config)?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal).await;
    execute!(std::io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!("Role console exited with error: {}", e);
    }
    result
}
