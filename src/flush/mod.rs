//! JSONL export of the event log, the convoy and the markets.

mod jsonl;

pub use jsonl::flush_to_jsonl;
