use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

/// The options for statistic logging containing the statistic prefix and the (optional) line
/// which is printed after the statistics.
pub struct StatisticOptions {
    // Statistics are printed in the form `{PREFIX} {NAME}={VALUE}`
    statistic_prefix: &'static str,
    after_statistics: Option<&'static str>,
    statistics_writer: Box<dyn Write + Send>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceCell<Mutex<StatisticOptions>> = OnceCell::new();

/// Configures the logging of the statistics.
///
/// Only the first call has an effect. In case no writer is specified, stdout is used. Until this
/// function is called, [`log_statistic`] does nothing.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        Mutex::new(StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: after,
            statistics_writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Logs the provided statistic in the format `PREFIX NAME=VALUE`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = options.lock() {
            let prefix = options.statistic_prefix;
            let _ = writeln!(options.statistics_writer, "{prefix} {name}={value}");
        }
    }
}

/// Logs the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = options.lock() {
            if let Some(post_fix) = options.after_statistics {
                let _ = writeln!(options.statistics_writer, "{post_fix}");
            }
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
