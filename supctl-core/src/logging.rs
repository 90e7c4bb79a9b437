/// Initializes `env_logger` on stderr.
///
/// `verbosity` counts `-v` flags (0 = warn, 1 = info, 2 = debug, 3+ = trace).
/// `RUST_LOG`, when set, is applied on top. Calling this twice is harmless.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let _ = env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
