// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod record;
pub mod requests;
pub mod telemetry;
