//! # System Interaction Layer
//!
//! This module is the boundary between the console and the filesystem.
//!
//! ## Modules
//!
//! - **`files`**: Scoped text-file handles resolved relative to the console's working
//!   directory. Readers retry with a `.txt` suffix; writers pick a free name
//!   (`name(1).ext`) instead of overwriting an existing file.

pub mod files;
