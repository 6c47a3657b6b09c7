//! Logging configuration, exported over the C ABI.
//!
//! The library logs through the `log` facade. A process-wide logger forwards
//! records either to a C callback or to stderr, filtered with `RUST_LOG`
//! style directives.

use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::RwLock;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::{Lazy, OnceCell};

use crate::error::{FixtureError, clear_error, cstring_lossy, ext_error_t, write_error};
use crate::ffi::read_optional_cstr;

/// Targets the `level` setting applies to when no filter string is given.
const DEFAULT_TARGETS: [&str; 2] = ["ext_fixtures", "ext_sample"];

static LOGGER: Lazy<FixtureLogger> = Lazy::new(FixtureLogger::new);
static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Log level values.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub enum ext_log_level_t {
    EXT_LOG_LEVEL_OFF = 0,
    EXT_LOG_LEVEL_ERROR = 1,
    EXT_LOG_LEVEL_WARN = 2,
    EXT_LOG_LEVEL_INFO = 3,
    EXT_LOG_LEVEL_DEBUG = 4,
    EXT_LOG_LEVEL_TRACE = 5,
}

impl From<ext_log_level_t> for LevelFilter {
    fn from(value: ext_log_level_t) -> Self {
        match value {
            ext_log_level_t::EXT_LOG_LEVEL_OFF => LevelFilter::Off,
            ext_log_level_t::EXT_LOG_LEVEL_ERROR => LevelFilter::Error,
            ext_log_level_t::EXT_LOG_LEVEL_WARN => LevelFilter::Warn,
            ext_log_level_t::EXT_LOG_LEVEL_INFO => LevelFilter::Info,
            ext_log_level_t::EXT_LOG_LEVEL_DEBUG => LevelFilter::Debug,
            ext_log_level_t::EXT_LOG_LEVEL_TRACE => LevelFilter::Trace,
        }
    }
}

impl From<Level> for ext_log_level_t {
    fn from(value: Level) -> Self {
        match value {
            Level::Error => ext_log_level_t::EXT_LOG_LEVEL_ERROR,
            Level::Warn => ext_log_level_t::EXT_LOG_LEVEL_WARN,
            Level::Info => ext_log_level_t::EXT_LOG_LEVEL_INFO,
            Level::Debug => ext_log_level_t::EXT_LOG_LEVEL_DEBUG,
            Level::Trace => ext_log_level_t::EXT_LOG_LEVEL_TRACE,
        }
    }
}

/// A log record handed to a C callback.
///
/// The strings are only valid for the duration of the callback.
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct ext_log_record_t {
    pub level: ext_log_level_t,
    pub target: *const c_char,
    pub message: *const c_char,
    pub line: u32,
}

/// Callback invoked for each enabled record, from whichever thread logged it.
#[allow(non_camel_case_types)]
pub type ext_log_callback_t =
    Option<extern "C" fn(record: *const ext_log_record_t, user_data: *mut c_void)>;

/// Logging configuration.
///
/// A non-null `filter` overrides `RUST_LOG`, which in turn overrides `level`.
/// With no `callback`, records are written to stderr.
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct ext_log_config_t {
    pub level: ext_log_level_t,
    pub filter: *const c_char,
    pub callback: ext_log_callback_t,
    pub user_data: *mut c_void,
}

#[derive(Clone, Debug, PartialEq)]
struct Directive {
    target: String,
    level: LevelFilter,
}

#[derive(Clone, Debug, PartialEq)]
struct Filter {
    fallback: LevelFilter,
    directives: Vec<Directive>,
}

impl Filter {
    fn for_level(level: LevelFilter) -> Self {
        Self {
            fallback: LevelFilter::Off,
            directives: DEFAULT_TARGETS
                .iter()
                .map(|target| Directive {
                    target: (*target).to_string(),
                    level,
                })
                .collect(),
        }
    }

    fn parse(spec: &str) -> Result<Self, String> {
        let mut filter = Self {
            fallback: LevelFilter::Off,
            directives: Vec::new(),
        };

        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some((target, level)) => {
                    let target = target.trim();
                    if target.is_empty() {
                        return Err(format!("directive `{part}` has no target"));
                    }
                    let level = parse_level(level)
                        .ok_or_else(|| format!("invalid level `{}`", level.trim()))?;
                    filter.directives.push(Directive {
                        target: target.to_string(),
                        level,
                    });
                }
                None => match parse_level(part) {
                    Some(level) => filter.fallback = level,
                    None => filter.directives.push(Directive {
                        target: part.to_string(),
                        level: LevelFilter::Trace,
                    }),
                },
            }
        }

        Ok(filter)
    }

    /// Level for `target`: the longest matching directive prefix, else the fallback.
    fn level_for(&self, target: &str) -> LevelFilter {
        self.directives
            .iter()
            .filter(|d| target.starts_with(&d.target))
            .max_by_key(|d| d.target.len())
            .map_or(self.fallback, |d| d.level)
    }

    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn max_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .map(|d| d.level)
            .fold(self.fallback, Ord::max)
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

struct Sink {
    filter: Filter,
    callback: ext_log_callback_t,
    // Stored as an address so the logger stays Send + Sync.
    user_data: usize,
}

struct FixtureLogger {
    sink: RwLock<Sink>,
}

impl FixtureLogger {
    fn new() -> Self {
        Self {
            sink: RwLock::new(Sink {
                filter: Filter::for_level(LevelFilter::Info),
                callback: None,
                user_data: 0,
            }),
        }
    }

    fn replace(&self, sink: Sink) {
        let max_level = sink.filter.max_level();
        *self.sink.write().unwrap_or_else(|err| err.into_inner()) = sink;
        log::set_max_level(max_level);
    }
}

impl Log for FixtureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let sink = self.sink.read().unwrap_or_else(|err| err.into_inner());
        sink.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        let (callback, user_data) = {
            let sink = self.sink.read().unwrap_or_else(|err| err.into_inner());
            if !sink.filter.enabled(record.metadata()) {
                return;
            }
            (sink.callback, sink.user_data)
        };

        let Some(callback) = callback else {
            eprintln!("{} {}: {}", record.level(), record.target(), record.args());
            return;
        };

        let target = cstring_lossy(record.target());
        let message = cstring_lossy(&record.args().to_string());
        let c_record = ext_log_record_t {
            level: record.level().into(),
            target: target.as_ptr(),
            message: message.as_ptr(),
            line: record.line().unwrap_or(0),
        };
        callback(&c_record, user_data as *mut c_void);
    }

    fn flush(&self) {}
}

fn install() -> Result<(), FixtureError> {
    let installed = *INSTALLED.get_or_init(|| log::set_logger(&*LOGGER).is_ok());
    if installed {
        Ok(())
    } else {
        Err(FixtureError::LoggerUnavailable)
    }
}

fn parse_filter(spec: &str, origin: &'static str) -> Result<Filter, FixtureError> {
    Filter::parse(spec).map_err(|reason| FixtureError::InvalidLogFilter {
        origin,
        filter: spec.to_string(),
        reason,
    })
}

fn resolve_filter(explicit: Option<String>, level: ext_log_level_t) -> Result<Filter, FixtureError> {
    if let Some(spec) = explicit {
        return parse_filter(&spec, "log filter");
    }
    if let Ok(spec) = std::env::var("RUST_LOG") {
        return parse_filter(&spec, "RUST_LOG");
    }
    Ok(Filter::for_level(level.into()))
}

/// Installs the stderr logger, configured from `RUST_LOG` or INFO by default.
pub fn init_from_env() -> Result<(), FixtureError> {
    let filter = resolve_filter(None, ext_log_level_t::EXT_LOG_LEVEL_INFO)?;
    install()?;
    LOGGER.replace(Sink {
        filter,
        callback: None,
        user_data: 0,
    });
    Ok(())
}

/// Fills `config` with defaults: INFO level, no filter, no callback.
#[unsafe(no_mangle)]
pub extern "C" fn ext_log_config_init(config: *mut ext_log_config_t) {
    if config.is_null() {
        return;
    }
    // Safety: caller provided a writable config pointer.
    unsafe {
        *config = ext_log_config_t {
            level: ext_log_level_t::EXT_LOG_LEVEL_INFO,
            filter: ptr::null(),
            callback: None,
            user_data: ptr::null_mut(),
        };
    }
}

/// Installs or reconfigures the logger. A null `config` means defaults.
///
/// Returns false and writes `out_error` if the filter is invalid or another
/// logger already owns the process.
#[unsafe(no_mangle)]
pub extern "C" fn ext_log_init(
    config: *const ext_log_config_t,
    out_error: *mut *mut ext_error_t,
) -> bool {
    clear_error(out_error);

    // Safety: caller provides either null or a valid config.
    let config = unsafe { config.as_ref() };
    let explicit = config.and_then(|c| read_optional_cstr(c.filter));
    let level = config.map_or(ext_log_level_t::EXT_LOG_LEVEL_INFO, |c| c.level);

    let result = resolve_filter(explicit, level).and_then(|filter| {
        install()?;
        LOGGER.replace(Sink {
            filter,
            callback: config.and_then(|c| c.callback),
            user_data: config.map_or(0, |c| c.user_data as usize),
        });
        Ok(())
    });

    match result {
        Ok(()) => true,
        Err(err) => {
            write_error(out_error, &err);
            false
        }
    }
}
