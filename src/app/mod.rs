// Application layer: page flows, text rendering and file-driven input.

pub mod input;
pub mod pages;
pub mod render;
