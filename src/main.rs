mod cli;
mod error;
mod files;
mod loader;
mod ui;

#[cfg(test)]
mod test_support;

use clap::Parser;
use std::process::ExitCode;
use winit::event_loop::EventLoop;

use crate::cli::{exit_code_for, Cli, APP_NAME};
use crate::error::ViewerError;
use crate::files::PathList;
use crate::ui::event::UserEvent;
use crate::ui::App;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_code_for(&e));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", APP_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ViewerError> {
    let paths = PathList::resolve(&cli.files);
    if paths.is_empty() {
        log::warn!("no displayable files given");
    }
    log::info!("{} file(s) to show", paths.len());
    log::debug!("resolved: {:?}", paths.entries());

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut app = App::new(paths, cli.window_settings(), proxy);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
