//! shipdesk - authenticated API client for the shipping dashboard portals
//!
//! Every request goes through a credential-attaching request interceptor and
//! a classifying response interceptor; see [`api`] for the pipeline.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod awb;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod tracking;
pub mod traits;
