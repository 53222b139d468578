//! Logging and trace-export setup.
//!
//! The environment name decides the log shape and base level: `local` gets
//! human-readable output at DEBUG, `dev` JSON at DEBUG, `prod` JSON at INFO.
//! A `-v`/`IDENTO_LOG_LEVEL` override wins over the environment default, and
//! `RUST_LOG` refines per target. The OTLP span exporter is enabled when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

use anyhow::Result;
use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use std::{env::var, str::FromStr, time::Duration};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Deployment environment, only consumed by logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl Environment {
    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::Local | Self::Dev => Level::DEBUG,
            Self::Prod => Level::INFO,
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

fn init_tracer() -> Result<sdktrace::Tracer> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_timeout(Duration::from_secs(3))
        .build()?;

    let provider = sdktrace::TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![
            KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok(provider.tracer(env!("CARGO_PKG_NAME")))
}

/// Initialize logging + (optional) tracing exporter.
///
/// # Errors
///
/// Returns an error if tracer or subscriber initialization fails
pub fn init(environment: Environment, verbosity: Option<Level>) -> Result<()> {
    let base_level = verbosity.unwrap_or_else(|| environment.default_level());

    let fmt_layer = match environment {
        Environment::Local => fmt::layer().with_target(false).boxed(),
        Environment::Dev | Environment::Prod => fmt::layer().json().flatten_event(true).boxed(),
    };

    // RUST_LOG=
    let filter = EnvFilter::builder()
        .with_default_directive(base_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?);

    if var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let tracer = init_tracer()?;
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let subscriber = Registry::default()
            .with(fmt_layer)
            .with(otel_layer)
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
