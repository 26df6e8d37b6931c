pub mod input;
pub mod menu;
pub mod message;
pub mod tree;
