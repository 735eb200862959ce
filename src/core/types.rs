/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Address type for partition offsets
pub type Address = usize;

/// Size type for partition lengths, in abstract units
pub type Size = usize;
