//! Core infrastructure: time sources and tick bookkeeping

pub mod time;
