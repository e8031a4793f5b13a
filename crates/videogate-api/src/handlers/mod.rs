pub mod root;
pub mod video;
