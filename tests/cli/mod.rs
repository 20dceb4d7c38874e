mod entries;
mod exchange;
mod misc;
mod search;
pub mod support;
