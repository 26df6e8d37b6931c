pub mod builder;
pub mod opener;
pub mod probe;
pub mod tree;
