pub mod composite;
pub mod compositor;
pub mod debug_grid;
pub(crate) mod draw;
pub mod exploded;
pub mod export;
