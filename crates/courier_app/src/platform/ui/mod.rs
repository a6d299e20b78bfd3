mod render;

pub use render::{render, timestamp};
