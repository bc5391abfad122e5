pub mod apply_link;
pub mod generate;
pub mod lifecycle;
pub mod pending;
pub mod unlink;
