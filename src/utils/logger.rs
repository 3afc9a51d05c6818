use chrono::Local;
use eyre::Result;
use fern::Dispatch;
use log::LevelFilter;

/// Crates whose transport chatter is capped at `Warn`
const NOISY_CRATES: [&str; 4] = ["hyper", "hyper_util", "reqwest", "alloy_transport_http"];

/// Sets up the console logger.
///
/// The level is `override_level` if given, otherwise `RUST_LOG`, otherwise `Info`. Logs go to
/// stderr so command output on stdout stays machine readable.
///
/// # Errors
/// * If a logger has already been installed
pub fn setup_logger(override_level: Option<LevelFilter>) -> Result<()> {
    let level = override_level.unwrap_or_else(|| {
        std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    });

    NOISY_CRATES
        .iter()
        .fold(Dispatch::new().level(level), |dispatch, module| {
            dispatch.level_for(*module, level.min(LevelFilter::Warn))
        })
        .chain(std::io::stderr())
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
