use std::fmt;

/// Recoverable input problems. Logged and reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftFault {
    MissingColumn {
        table: &'static str,
        signal: &'static str,
    },
    MalformedValue {
        table: &'static str,
        column: String,
        cells: usize,
    },
    InsufficientFrames {
        swing: String,
        frames: usize,
        required: usize,
    },
    AllSwingsInvalid,
}

impl SoftFault {
    pub fn code(&self) -> &'static str {
        match self {
            SoftFault::MissingColumn { .. } => "MISSING_COLUMN",
            SoftFault::MalformedValue { .. } => "MALFORMED_VALUE",
            SoftFault::InsufficientFrames { .. } => "INSUFFICIENT_FRAMES",
            SoftFault::AllSwingsInvalid => "ALL_SWINGS_INVALID",
        }
    }

    pub fn log(&self) {
        tracing::warn!(code = self.code(), "{self}");
    }
}

impl fmt::Display for SoftFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftFault::MissingColumn { table, signal } => {
                write!(f, "{table}: no column for {signal}; using fallback")
            }
            SoftFault::MalformedValue {
                table,
                column,
                cells,
            } => write!(f, "{table}: {cells} non-numeric cell(s) in `{column}` coerced to 0.0"),
            SoftFault::InsufficientFrames {
                swing,
                frames,
                required,
            } => write!(
                f,
                "swing {swing}: {frames} frame(s), need at least {required}; skipped"
            ),
            SoftFault::AllSwingsInvalid => {
                write!(f, "no swing could be scored; returning neutral default")
            }
        }
    }
}
