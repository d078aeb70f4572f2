//! Image capture for text extraction

pub mod clipboard;
