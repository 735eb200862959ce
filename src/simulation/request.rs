/*!
 * Request Loading
 * Parses request files into a workload
 *
 * Format (whitespace separated, `#` starts a comment line):
 *
 * ```text
 * <total_size>
 * <request_count>
 * <pid> a <size>     # allocate
 * <pid> r            # release
 * ```
 */

use crate::core::limits::{REQUEST_COMMENT_PREFIX, REQUEST_PREALLOC_LIMIT};
use crate::core::types::{Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Request loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read request file {path}")]
    #[diagnostic(
        code(load::io),
        help("Check that the file exists and is readable, or set PARTITION_REQUESTS.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request file ended before the {field} header")]
    #[diagnostic(
        code(load::missing_header),
        help("The file must start with the total size followed by the request count.")
    )]
    MissingHeader { field: &'static str },

    #[error("Line {line}: invalid {field} '{value}'")]
    #[diagnostic(code(load::invalid_number), help("Expected a non-negative integer."))]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: missing {field}")]
    #[diagnostic(code(load::missing_field))]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: unknown operation '{op}'")]
    #[diagnostic(
        code(load::unknown_operation),
        help("Use 'a' (allocate) or 'r' (release).")
    )]
    UnknownOperation { line: usize, op: String },

    #[error("Line {line}: unexpected token '{token}'")]
    #[diagnostic(code(load::unexpected_token))]
    UnexpectedToken { line: usize, token: String },

    #[error("Expected {expected} requests, found {found}")]
    #[diagnostic(
        code(load::request_count_mismatch),
        help("Fix the request count header or add the missing request lines.")
    )]
    RequestCountMismatch { expected: usize, found: usize },

    #[error("Total size must be positive")]
    #[diagnostic(code(load::zero_capacity))]
    ZeroCapacity,
}

/// Request operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Allocate,
    Release,
}

impl FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "alloc" | "allocate" => Ok(Operation::Allocate),
            "r" | "free" | "release" => Ok(Operation::Release),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operation::Allocate => write!(f, "allocate"),
            Operation::Release => write!(f, "release"),
        }
    }
}

/// One entry of the request stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub pid: Pid,
    pub operation: Operation,
    /// Present only for allocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl Request {
    pub fn allocate(pid: Pid, size: Size) -> Self {
        Self {
            pid,
            operation: Operation::Allocate,
            size: Some(size),
        }
    }

    pub fn release(pid: Pid) -> Self {
        Self {
            pid,
            operation: Operation::Release,
            size: None,
        }
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.size {
            Some(size) => write!(f, "process {} {} {}", self.pid, self.operation, size),
            None => write!(f, "process {} {}", self.pid, self.operation),
        }
    }
}

/// Address space size plus the ordered request stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub total_size: Size,
    pub requests: Vec<Request>,
}

/// Load a workload from a request file
pub fn load_requests(path: impl AsRef<Path>) -> Result<Workload, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let workload = parse_requests(&text)?;
    debug!(
        path = %path.display(),
        total_size = workload.total_size,
        requests = workload.requests.len(),
        "Loaded request file"
    );
    Ok(workload)
}

/// Parse a workload from request-file text
pub fn parse_requests(text: &str) -> Result<Workload, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(REQUEST_COMMENT_PREFIX));

    // Header may be split over one or two lines
    let mut header: Vec<(usize, &str)> = Vec::with_capacity(2);
    while header.len() < 2 {
        let field = if header.is_empty() {
            "total_size"
        } else {
            "request_count"
        };
        let (line_no, line) = lines.next().ok_or(LoadError::MissingHeader { field })?;
        header.extend(line.split_whitespace().map(|token| (line_no, token)));
    }
    if let Some(&(line, token)) = header.get(2) {
        return Err(LoadError::UnexpectedToken {
            line,
            token: token.to_string(),
        });
    }

    let total_size: Size = parse_number(header[0].0, "total_size", header[0].1)?;
    let expected: usize = parse_number(header[1].0, "request_count", header[1].1)?;
    if total_size == 0 {
        return Err(LoadError::ZeroCapacity);
    }

    let mut requests = Vec::with_capacity(expected.min(REQUEST_PREALLOC_LIMIT));
    while requests.len() < expected {
        let Some((line_no, line)) = lines.next() else {
            return Err(LoadError::RequestCountMismatch {
                expected,
                found: requests.len(),
            });
        };
        requests.push(parse_request_line(line_no, line)?);
    }

    let ignored = lines.count();
    if ignored > 0 {
        warn!(ignored, expected, "Ignoring lines after the last counted request");
    }

    Ok(Workload {
        total_size,
        requests,
    })
}

fn parse_request_line(line: usize, text: &str) -> Result<Request, LoadError> {
    let mut tokens = text.split_whitespace();

    let pid_token = tokens.next().ok_or(LoadError::MissingField {
        line,
        field: "process_id",
    })?;
    let pid: Pid = parse_number(line, "process_id", pid_token)?;

    let op_token = tokens.next().ok_or(LoadError::MissingField {
        line,
        field: "operation",
    })?;
    let operation: Operation = op_token.parse().map_err(|_| LoadError::UnknownOperation {
        line,
        op: op_token.to_string(),
    })?;

    let request = match operation {
        Operation::Allocate => {
            let size_token = tokens.next().ok_or(LoadError::MissingField {
                line,
                field: "size",
            })?;
            Request::allocate(pid, parse_number(line, "size", size_token)?)
        }
        // Release lines may carry a size column; it is ignored
        Operation::Release => {
            if let Some(size_token) = tokens.next() {
                parse_number::<Size>(line, "size", size_token)?;
            }
            Request::release(pid)
        }
    };

    if let Some(token) = tokens.next() {
        return Err(LoadError::UnexpectedToken {
            line,
            token: token.to_string(),
        });
    }

    Ok(request)
}

fn parse_number<T: FromStr>(line: usize, field: &'static str, token: &str) -> Result<T, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        field,
        value: token.to_string(),
    })
}
