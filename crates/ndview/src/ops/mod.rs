mod binary;
mod stack;

pub use binary::*;
