/*!
 * Simulator Limits and Constants
 *
 * Centralized location for thresholds and defaults shared by the allocator,
 * the request loader and the binary.
 */

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Utilization at which pressure is reported as medium (60%)
pub const PRESSURE_MEDIUM_RATIO: f64 = 0.60;

/// Utilization at which allocations log a warning (80%)
pub const PRESSURE_WARNING_RATIO: f64 = 0.80;

/// Utilization at which pressure is critical (95%)
pub const PRESSURE_CRITICAL_RATIO: f64 = 0.95;

// =============================================================================
// SIMULATOR DEFAULTS
// =============================================================================

/// Request file used when neither an argument nor PARTITION_REQUESTS is given
pub const DEFAULT_REQUEST_FILE: &str = "data/requests.txt";

/// Comment marker for request files
pub const REQUEST_COMMENT_PREFIX: char = '#';

/// Upper bound on requests reserved up front from a file's count header
pub const REQUEST_PREALLOC_LIMIT: usize = 1024;
