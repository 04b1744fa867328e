use std::io::Write;

use chess_tiles::Rules;

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() {
    init_logging();

    let rules = if std::env::args().skip(1).any(|arg| arg == "--strict") {
        Rules::strict()
    } else {
        Rules::default()
    };
    log::info!("Chess Tiles, rules: {rules:?}");

    chess_tiles::mock::run_interactive_terminal(rules);
}
