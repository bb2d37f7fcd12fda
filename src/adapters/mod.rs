//! Port implementations.
//!
//! `live` talks to real disks and networks; `memory` keeps everything
//! in-process for tests and throwaway sessions.

pub mod live;
pub mod memory;
