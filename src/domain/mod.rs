pub mod cloud;
pub mod entity;
pub mod grid;
pub mod man;
pub mod rock;
pub mod sprite;
