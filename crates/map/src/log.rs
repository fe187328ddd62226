/// Minimal interaction event record for traceability.
///
/// For now this is just structured text; as the widget evolves this can
/// become a stable, serializable event enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<LogRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.records.push(LogRecord {
            kind,
            message: message.into(),
        });
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn drain(&mut self) -> Vec<LogRecord> {
        std::mem::take(&mut self.records)
    }
}
