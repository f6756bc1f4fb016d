pub mod md;
pub mod text;
