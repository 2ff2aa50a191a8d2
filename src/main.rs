use app::{AppHelper, Command, EncodeCommand, LearnCommand};

mod app;

fn main() {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Tracelearn, a learner of symbolic action models from plan execution traces.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(EncodeCommand::new()),
        Box::new(LearnCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app.launch_app();
}
