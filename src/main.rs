use std::path::PathBuf;

use argh::FromArgs;

#[derive(FromArgs)]
/// Launch helper that reads a launch script on stdin and starts the game.
struct CliArgs {
    /// path to a JSON settings file
    #[argh(option)]
    settings: Option<String>,

    /// log filter used when RUST_LOG is unset (e.g. "debug")
    #[argh(option)]
    log_level: Option<String>,
}

fn main() {
    let args: CliArgs = argh::from_env();
    let settings = args.settings.map(PathBuf::from);

    let code = onesix_launcher::run(settings.as_deref(), args.log_level.as_deref());
    if code != 0 {
        println!("Exiting with {}", code);
    }
    std::process::exit(code);
}
