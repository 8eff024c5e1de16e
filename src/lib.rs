// Copyright 2026 Kagami Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kagami library — live-search bridge for static site mirrors.
//!
//! A statically hosted mirror has no backend of its own. Kagami lets a
//! mirror visitor still run full-text search against the original live
//! site and open individual result pages, through one of two
//! interchangeable transports: a local companion API (pre-transformed
//! markup) or a public CORS relay (raw markup, transformed client-side).

pub mod cli;
pub mod config;
pub mod deactivate;
pub mod extract;
pub mod keypad;
pub mod resolver;
pub mod search;
pub mod surface;
pub mod transport;
