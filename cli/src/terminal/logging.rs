use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner::SpinnerWriter;

pub const PRINT_TARGET: &str = "eagle::print";

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(EagleFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

#[derive(Default)]
struct EventFields {
    message: Option<String>,
    raw_msg: Option<String>,
    status: Option<String>,
    extra: Vec<String>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "raw_msg" => self.raw_msg = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            name => self.extra.push(format!("{name}={value}")),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{value:?}")),
            name => self.extra.push(format!("{name}={value:?}")),
        }
    }
}

pub struct EagleFormatter;

impl<S, N> FormatEvent<S, N> for EagleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = EventFields::default();
        event.record(&mut fields);

        if meta.target() == PRINT_TARGET {
            return writeln!(writer, "{}", fields.raw_msg.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match (fields.status.as_deref(), *meta.level()) {
                (Some("success"), _) => ("[+]", |s| s.green().bold()),
                (_, Level::TRACE) => ("[ ]", |s| s.dimmed()),
                (_, Level::DEBUG) => ("[?]", |s| s.blue()),
                (_, Level::INFO) => ("[*]", |s| s.cyan().bold()),
                (_, Level::WARN) => ("[!]", |s| s.yellow().bold()),
                (_, Level::ERROR) => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;
        write!(writer, "{}", fields.message.unwrap_or_default())?;
        if !fields.extra.is_empty() {
            write!(writer, " {}", fields.extra.join(" ").dimmed())?;
        }

        writeln!(writer)
    }
}
