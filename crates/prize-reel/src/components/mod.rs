pub mod entity;
pub mod layer;
pub mod shape;
pub mod sprite;
