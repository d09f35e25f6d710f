// src/lib.rs

//! threadwatch: forwards new image posts from forum threads to a Telegram chat.

pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
