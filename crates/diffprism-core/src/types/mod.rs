pub mod collections;
pub mod difference;
