use super::command::Command;
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg};
use log::{error, info};
use std::{ffi::OsString, str::FromStr, sync::Once, time::SystemTime};

static LOGGER_INIT: Once = Once::new();

const LOGGING_LEVEL_ARG: &str = "LOGGING_LEVEL";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

/// The main struct used to build the app.
///
/// The helper is given the commands of the app, then launched: it initializes
/// the logger, reads the CLI arguments, and executes the right command. If a
/// command returns an error, the error stack is displayed and a status of 1
/// is returned to the system.
pub(crate) struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    /// Launches the application, reading the CLI arguments through
    /// `std::env::args_os()`. This function consumes the helper.
    pub fn launch_app(self) {
        self.launch_app_with_args(std::env::args_os())
    }

    pub fn launch_app_with_args<I, T>(self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Err(e) = self.execute_app(args) {
            error!("an error occurred: {}", e);
            e.chain()
                .skip(1)
                .for_each(|err| error!("caused by: {}", err));
            std::process::exit(1);
        }
    }

    fn execute_app<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let start_time = SystemTime::now();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        let matches = match app.get_matches_from_safe(args) {
            Ok(matches) => matches,
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                message,
                ..
            }) => {
                println!("{}", message);
                return Ok(());
            }
            Err(e) => {
                init_logger_with_level(log::LevelFilter::Info);
                info!("{} {}", self.app_name, self.version);
                return Err(anyhow!("{}", e));
            }
        };
        for c in self.commands.iter() {
            if let Some(matches) = matches.subcommand_matches(c.name()) {
                let log_level = if let Some(str_log_level) = matches.value_of(LOGGING_LEVEL_ARG) {
                    log::LevelFilter::from_str(str_log_level).unwrap()
                } else {
                    log::LevelFilter::Info
                };
                init_logger_with_level(log_level);
                info!("{} {}", self.app_name, self.version);
                c.execute(matches)?;
                info!(
                    "exiting successfully after {:?}",
                    start_time.elapsed().unwrap()
                );
                return Ok(());
            }
        }
        unreachable!()
    }
}

pub(crate) fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply()
            .unwrap_or(());
    });
}
