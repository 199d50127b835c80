use time::UtcOffset;
use tracing_subscriber::{
    fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Controls the `tracing-subscriber` setup an application embedding this
/// client can opt into. The client's own instrumentation
/// (`tracing::{debug,trace,warn}` calls in `codec`/`transaction`) works
/// with any subscriber; this just gives a ready-made one in the
/// teacher's style.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub level: String,
    pub include_location: bool,
    /// Turns on `trace`-level logging specifically for the wire codecs
    /// and transaction driver, without touching the base level.
    pub trace_frames: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_location: false,
            trace_frames: false,
        }
    }
}

pub fn setup_logging(options: &LoggingOptions) -> Result<(), tracing_subscriber::util::TryInitError> {
    let timer = OffsetTime::new(
        UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        time::format_description::well_known::Rfc3339,
    );

    let mut env_filter = EnvFilter::try_new(&options.level).unwrap_or_else(|_| EnvFilter::new("info"));
    if options.trace_frames {
        env_filter = env_filter
            .add_directive("modbus_async_client::codec=trace".parse().unwrap())
            .add_directive("modbus_async_client::transaction=trace".parse().unwrap());
    }

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_file(options.include_location)
        .with_line_number(options.include_location)
        .with_level(true)
        .with_timer(timer)
        .with_filter(env_filter);

    Registry::default().with(layer).try_init()
}
