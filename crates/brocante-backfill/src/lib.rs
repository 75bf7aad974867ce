//! Brocante Backfill - keyword heuristics for legacy listings
//!
//! Older listings predate the attribute system and carry their facts only
//! in free text. These jobs infer attribute values and sub-categories from
//! static keyword tables. Everything is best-effort and idempotent: a job
//! only ever writes where nothing is stored yet, so re-running is safe.

pub mod infer;
pub mod job;
pub mod keywords;
