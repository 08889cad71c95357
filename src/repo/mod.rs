pub mod blob;
pub mod extract;
pub mod repository;
