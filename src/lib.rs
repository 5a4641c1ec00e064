//! Resample a time-stamped GPS track into fixed-width buckets and render it
//! on a map.

pub mod config;
pub mod render;
pub mod track;
pub mod web;
