//! # Ghoul CLI Library
//!
//! Command-line front end for ghoul: argument parsing, the startup sequence
//! that finds the repository and credentials, the editor helper and the
//! `comment` and `review` commands.

pub mod cli;
pub mod editor;
pub mod session;
