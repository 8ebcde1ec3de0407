// Terminal setup and application entry point.

mod api;
mod app;
mod cache;
mod error;
mod state;
mod ui;

use std::io;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::ApiClient;
use crate::app::App;
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let start_tab = start_tab_arg();
    let client = ApiClient::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, start_tab);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Deep-link pane identifier from `--tab <id>` (or WARDEN_START_TAB).
fn start_tab_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--tab" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--tab=") {
            return Some(value.to_string());
        }
    }
    std::env::var("WARDEN_START_TAB").ok()
}
