// src/comments/mod.rs

pub mod cascade;
pub mod thread;
