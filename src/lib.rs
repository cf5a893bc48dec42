//! Shopdex - creature detail panel for the shop, plus a terminal browser host
//!
//! The library exposes the data layer, the panel components and the store
//! pieces so hosts and tests can drive them directly.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod data;
pub mod description;
pub mod effect;
pub mod error;
pub mod i18n;
pub mod pokemon;
pub mod portrait;
pub mod reducer;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
