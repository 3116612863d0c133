use std::borrow::Cow;
use std::fmt::Write;
use std::str::FromStr;

use log::Record;
use logforth::append::Stderr;
use logforth::filter::EnvFilter;
use logforth::layout::Layout;

use crate::cli::LogLevel;

#[derive(Debug, Clone, Default)]
struct PlainLayout;

impl Layout for PlainLayout {
    fn format(
        &self,
        record: &Record<'_>,
        _diagnostics: &[Box<dyn logforth::diagnostic::Diagnostic>],
    ) -> anyhow::Result<Vec<u8>> {
        let mut output = String::new();
        write!(output, "{:>5}  {}", record.level(), record.args())?;
        Ok(output.into_bytes())
    }
}

fn env_filter(level: LogLevel) -> Option<EnvFilter> {
    let filter_str = match level {
        LogLevel::Off => Cow::Borrowed("off"),
        // other crates stay at warn
        level => Cow::Owned(format!("warn,llama_invoke={level}")),
    };
    EnvFilter::from_str(&filter_str).ok()
}

pub(crate) fn init(level: LogLevel) {
    let Some(filter) = env_filter(level) else {
        return;
    };
    logforth::builder()
        .dispatch(|d| d.filter(filter).append(Stderr::default().with_layout(PlainLayout)))
        .apply();
}
