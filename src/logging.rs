//! Log drains for the command line tool.
//!
//! Records always go to stderr, since stdout carries the rendered version.
//! Graylog and Sentry receive a copy when their URLs are configured.

use std::panic::{RefUnwindSafe, UnwindSafe};

use anyhow::Context;
use sentry_slog::SentryDrain;
use slog::{Drain, Fuse};
use slog_async::Async;
use slog_gelf::Gelf;

use crate::environ;

const DEFAULT_FILTERS: &str = "warn";

/// Keeps `guard` alive for as long as the drain is in use
struct DrainWithGuard<D, G>
where
    D: Drain,
    G: Send + Sync + RefUnwindSafe + UnwindSafe,
{
    drain: D,
    _guard: G,
}

impl<D, G> Drain for DrainWithGuard<D, G>
where
    D: Drain,
    G: Send + Sync + RefUnwindSafe + UnwindSafe,
{
    type Ok = D::Ok;
    type Err = D::Err;

    fn log(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        self.drain.log(record, values)
    }
}

/// Sends every record to all drains, each through its own async queue
#[derive(Default)]
pub struct DrainTee {
    drains: Vec<Fuse<Async>>,
}

impl DrainTee {
    fn push<D>(&mut self, drain: D)
    where
        D: Drain<Err = slog::Never, Ok = ()> + Send + 'static,
    {
        self.drains.push(Async::default(drain).fuse());
    }
}

impl Drain for DrainTee {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        self.drains
            .iter()
            .try_for_each(|drain| drain.log(record, values).map(|_| ()))
    }
}

#[derive(Debug, Default)]
pub struct LoggingOptions {
    pub version: Option<String>,
    /// `RUST_LOG`-style directives
    pub filters: String,
    pub environment: Option<String>,
    pub graylog: Option<String>,
    pub sentry: Option<String>,
}

impl LoggingOptions {
    pub fn from_env(
        version: &str,
    ) -> Result<Self, environ::InvalidEnvValue> {
        Ok(Self {
            version: Some(version.into()),
            filters: environ::get_or("RUST_LOG", DEFAULT_FILTERS)?,
            environment: environ::get("ENVIRONMENT")?,
            graylog: environ::get("GRAYLOG_URL")?,
            sentry: environ::get("SENTRY_URL")?,
        })
    }
}

pub fn setup(options: &LoggingOptions) -> anyhow::Result<DrainTee> {
    let mut tee = DrainTee::default();

    tee.push(
        slog_term::FullFormat::new(
            slog_term::TermDecorator::new().stderr().build(),
        )
        .build()
        .fuse(),
    );

    if let Some(graylog_url) = &options.graylog {
        let hostname = hostname::get().context("Failed to get hostname")?;
        tee.push(
            Gelf::new(&hostname.to_string_lossy(), graylog_url.as_str())
                .with_context(|| format!("Failed to connect to {graylog_url}"))?
                .fuse(),
        );
    }

    if let Some(sentry_url) = &options.sentry {
        let mut client_options = sentry::ClientOptions::default();
        client_options.dsn = Some(sentry_url.parse().context("Invalid SENTRY_URL")?);
        client_options.release = options.version.clone().map(Into::into);
        client_options.environment = options.environment.clone().map(Into::into);
        client_options.max_breadcrumbs = 0;
        let sentry = sentry::init(client_options);
        tee.push(DrainWithGuard {
            drain: SentryDrain::new(slog::Discard),
            _guard: sentry,
        });
    }

    Ok(tee)
}

/// Installs the global logger used by `slog_scope` macros.
///
/// Records are flushed when the returned guard is dropped.
pub fn init(
    options: LoggingOptions,
) -> anyhow::Result<slog_scope::GlobalLoggerGuard> {
    let tee = setup(&options)?;
    let drain = slog_envlogger::LogBuilder::new(tee)
        .parse(&options.filters)
        .build();
    let logger = slog::Logger::root(
        drain.fuse(),
        slog::o!(
            "version" => options.version.unwrap_or_default(),
            "environment" => options.environment.unwrap_or_else(|| "unknown".into()),
        ),
    );
    Ok(slog_scope::set_global_logger(logger))
}

#[cfg(test)]
mod test {
    use super::{setup, LoggingOptions};

    #[test]
    fn test_terminal_only() {
        let tee = setup(&LoggingOptions::default()).unwrap();
        assert_eq!(tee.drains.len(), 1);
    }

    #[test]
    fn test_filters_default_to_warn() {
        std::env::remove_var("RUST_LOG");
        let options = LoggingOptions::from_env("1.2.3").unwrap();
        assert_eq!(options.filters, "warn");
        assert_eq!(options.version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_invalid_sentry_url() {
        let options = LoggingOptions {
            sentry: Some("not a dsn".into()),
            ..Default::default()
        };
        let err = setup(&options).err().unwrap();
        assert_eq!(err.to_string(), "Invalid SENTRY_URL");
    }
}
