//! One renderer per page. Renderers draw state and report what the user asked for.

pub mod rotation;
pub mod users;
