use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Credentials;
use crate::display::Display;
use crate::prelude::*;

/// Everything a run needs, resolved once at startup.
pub struct App {
    pub credentials: Credentials,
    pub output: PathBuf,
    pub unformatted: bool,
    pub display: Display,
}

impl App {
    pub fn try_new(cli: &Cli, display: Display) -> AppResult<Self> {
        Ok(App {
            credentials: cli.try_credentials()?,
            output: cli.output.to_owned(),
            unformatted: cli.unformatted,
            display,
        })
    }
}
