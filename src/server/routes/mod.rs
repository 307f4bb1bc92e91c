pub mod favorites;
pub mod table;
