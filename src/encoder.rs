// Record encoding
//
// JSON lines with production field names:
// {"level":"info","ts":1700000000.123456,"logger":"app::server","caller":"src/server.rs:42","msg":"...",<fields>}

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// How records are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One JSON object per line
    #[default]
    Json,
    /// Human readable single line text
    Console,
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Encoding::Json),
            "console" => Ok(Encoding::Console),
            other => Err(format!("unknown encoding {:?}, expected json or console", other)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => f.write_str("json"),
            Encoding::Console => f.write_str("console"),
        }
    }
}

/// Event formatter producing production-style JSON lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionJson;

#[derive(Default)]
struct JsonFields {
    message: Option<String>,
    fields: Vec<(&'static str, Value)>,
}

impl Visit for JsonFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), Value::from(value)));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name(), Value::from(value)));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.push((field.name(), Value::from(value)));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.push((field.name(), Value::from(value)));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.push((field.name(), Value::from(value)));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name(), Value::from(rendered)));
        }
    }
}

fn write_pair(writer: &mut Writer<'_>, key: &str, value: &Value) -> fmt::Result {
    let key = serde_json::to_string(key).map_err(|_| fmt::Error)?;
    let value = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    write!(writer, ",{}:{}", key, value)
}

impl<S, N> FormatEvent<S, N> for ProductionJson
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut visitor = JsonFields::default();
        event.record(&mut visitor);

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        write!(
            writer,
            "{{\"level\":\"{}\"",
            meta.level().as_str().to_ascii_lowercase()
        )?;
        write_pair(&mut writer, "ts", &Value::from(ts))?;
        write_pair(&mut writer, "logger", &Value::from(meta.target()))?;
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            write_pair(&mut writer, "caller", &Value::from(format!("{}:{}", file, line)))?;
        }
        write_pair(
            &mut writer,
            "msg",
            &Value::from(visitor.message.unwrap_or_default()),
        )?;
        for (key, value) in &visitor.fields {
            write_pair(&mut writer, key, value)?;
        }
        writeln!(writer, "}}")
    }
}
