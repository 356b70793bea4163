//! Boundary with the capture vendor: bounded payload loading and the
//! access-token cache. Failures here are the only hard errors of a scoring run.

pub mod token;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::thread;

use flate2::read::GzDecoder;
use thiserror::Error;

pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read payload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("payload {path} exceeds the {limit}-byte cap")]
    TooLarge { path: PathBuf, limit: u64 },
    #[error("payload loader for {0} panicked")]
    Worker(&'static str),
}

/// Raw text of the kinematics and energy exports for one capture.
#[derive(Debug, Clone)]
pub struct CapturePayloads {
    pub kinematics: String,
    pub energy: String,
}

/// Reads one payload (gzip when the path ends in `.gz`), refusing more than
/// `max_bytes` of decompressed data. Invalid UTF-8 sequences become U+FFFD so
/// the affected cells are coerced downstream instead of failing the capture.
pub fn read_payload(path: &Path, max_bytes: u64) -> Result<String, FetchError> {
    let io_err = |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(io_err)?;
    if buf.len() as u64 > max_bytes {
        return Err(FetchError::TooLarge {
            path: path.to_path_buf(),
            limit: max_bytes,
        });
    }
    tracing::debug!(path = %path.display(), bytes = buf.len(), "payload loaded");
    match String::from_utf8(buf) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                first_invalid = err.utf8_error().valid_up_to(),
                "payload is not valid UTF-8; replacing invalid bytes"
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Loads both payloads in parallel and joins before returning.
pub fn fetch_capture(
    kinematics: &Path,
    energy: &Path,
    max_bytes: u64,
) -> Result<CapturePayloads, FetchError> {
    let (kin, en) = thread::scope(|s| {
        let kin = s.spawn(|| read_payload(kinematics, max_bytes));
        let en = s.spawn(|| read_payload(energy, max_bytes));
        (kin.join(), en.join())
    });
    let kinematics = kin.map_err(|_| FetchError::Worker("kinematics"))??;
    let energy = en.map_err(|_| FetchError::Worker("energy"))??;
    Ok(CapturePayloads { kinematics, energy })
}

#[cfg(test)]
#[path = "../../tests/src_inline/upstream/tests.rs"]
mod tests;
