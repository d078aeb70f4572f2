//! Local HTTP service

pub mod api;
