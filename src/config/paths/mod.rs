//! Filesystem locations for configuration.

pub mod xdg_root;
