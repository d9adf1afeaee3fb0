//! FitTrack: workout catalog, routine builder, member directory and the
//! small persisted state behind them.

pub mod app;
pub mod background;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod modal;
pub mod models;
pub mod pages;
pub mod render;
pub mod selection;
pub mod session;
pub mod storage;
pub mod ui;
pub mod visits;
pub mod weather;

pub use error::{Error, Result};
