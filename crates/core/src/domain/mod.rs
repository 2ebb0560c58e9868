pub mod fallback;
pub mod market;
pub mod pick;
pub mod sections;
