//! Live train departure board.
//!
//! Polls the National Rail Darwin API for one or more stations and serves
//! each board as a filtered, formatted table of departures.

pub mod board;
pub mod config;
pub mod darwin;
pub mod domain;
pub mod web;
pub mod widget;
