//! Face and mesh data structures produced by the face culler.

pub mod face;
pub mod mesh;
