use std::env;
use std::fmt::Write;
use std::{fmt, sync::atomic::AtomicUsize, write};
use tracing::{
    field::{Field, Visit},
    Id, Level, Subscriber,
};

pub struct StringVisitor<'a> {
    string: &'a mut String,
}
impl<'a> StringVisitor<'a> {
    pub(crate) fn new(string: &'a mut String) -> Self {
        StringVisitor { string }
    }
}

impl<'a> Visit for StringVisitor<'a> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            _ = write!(self.string, "{value:?} ");
        } else {
            _ = write!(self.string, "{} = {:?}; ", field.name(), value);
        }
    }
}

#[derive(Debug, PartialEq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>,
}

/// Writes to stderr only, stdout carries the output record
pub struct MinimalTracer {
    filters: Vec<LogFilter>,
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.to_lowercase().as_str() {
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "warn" | "warning" => Some(Level::WARN),
        "trace" => Some(Level::TRACE),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

// verbosity rank, higher logs more
fn level_to_usize(level: &Level) -> usize {
    match *level {
        Level::ERROR => 0,
        Level::WARN => 1,
        Level::INFO => 2,
        Level::DEBUG => 3,
        Level::TRACE => 4,
    }
}

fn level_to_color(level: &Level) -> &'static str {
    match *level {
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

/// `RUST_LOG` style: `level`, `target` or `target=level`, comma separated
fn parse_filters(value: &str) -> Vec<LogFilter> {
    let mut filters: Vec<LogFilter> = Vec::with_capacity(10);
    for filter in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let (target, level) = match filter.split_once('=') {
            Some((target, level)) => (Some(target), string_to_level(level)),
            None => match string_to_level(filter) {
                Some(level) => (None, Some(level)),
                None => (Some(filter), None),
            },
        };

        filters.push(LogFilter {
            target: target.map(|v| v.to_string()),
            level,
        });
    }

    filters
}

impl MinimalTracer {
    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let filters = match env::var("RUST_LOG") {
            Ok(env_value) => parse_filters(&env_value),
            Err(_) => vec![LogFilter {
                target: None,
                level: Some(Level::INFO),
            }],
        };

        tracing::subscriber::set_global_default(MinimalTracer { filters })
    }

    fn matches(&self, metadata: &tracing::Metadata<'_>) -> bool {
        if self.filters.is_empty() {
            return true;
        }

        self.filters.iter().any(|filter| {
            if let Some(level) = filter.level {
                if level_to_usize(metadata.level()) > level_to_usize(&level) {
                    return false;
                }
            }
            if let Some(target) = &filter.target {
                if !metadata.target().starts_with(target.as_str()) {
                    return false;
                }
            }
            true
        })
    }
}

static AUTO_ID: AtomicUsize = AtomicUsize::new(1);
impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
        self.matches(metadata)
    }

    fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        Id::from_u64(AUTO_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed) as u64)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let metadata = event.metadata();
        let level = metadata.level();
        let target = metadata.target();

        let mut text = String::new();
        let mut visitor = StringVisitor::new(&mut text);
        event.record(&mut visitor);

        let time = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
        let color = level_to_color(level);
        eprintln!("{time} {color}{level: >5}\x1b[0m {target}: {}", text.trim_end());
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_filters("debug, release_selector=trace,hyper"),
            vec![
                LogFilter {
                    target: None,
                    level: Some(Level::DEBUG),
                },
                LogFilter {
                    target: Some("release_selector".to_string()),
                    level: Some(Level::TRACE),
                },
                LogFilter {
                    target: Some("hyper".to_string()),
                    level: None,
                },
            ]
        );
        assert!(parse_filters("").is_empty());
    }

    #[test]
    fn test_level_ordering() {
        assert!(level_to_usize(&Level::DEBUG) > level_to_usize(&Level::INFO));
        assert!(level_to_usize(&Level::WARN) > level_to_usize(&Level::ERROR));
        assert_eq!(string_to_level("Warning"), Some(Level::WARN));
        assert_eq!(string_to_level("loud"), None);
    }
}
