//! Filesystem locations used by the client.

pub mod xdg_root;
