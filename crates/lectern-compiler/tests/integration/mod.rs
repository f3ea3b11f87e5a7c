mod courses;
mod diagnostics;
mod flattening;
mod partial_success;
