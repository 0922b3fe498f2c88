// file: src/utils/logging.rs
// description: tracing subscriber on stderr and colored status lines for stdout

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Diagnostics go to stderr so stdout carries only the run's status lines.
/// `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init_logger(colored_output: bool, verbose: bool) {
    if !colored_output {
        colored::control::set_override(false);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    EnvFilter::new(format!(
        "{level},hyper=warn,hyper_util=warn,reqwest=warn,azure_core=warn,azure_identity=warn"
    ))
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatters_keep_message() {
        assert!(format_success("Created index 'a'.").contains("Created index 'a'."));
        assert!(format_error("Indexing failed").contains("Indexing failed"));
        assert!(format_step(2, 4, "Indexing").contains("[2/4]"));
    }

    #[test]
    fn test_default_filter_levels() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(default_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(default_filter(false).max_level_hint(), Some(LevelFilter::WARN));
    }
}
