//! # IO Module
//!
//! Interface layer that exposes backend functionality to clients.

pub mod rest;
