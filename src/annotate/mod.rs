//! Annotation engine: scan, decorate and undecorate words in a DOM tree

pub mod matching;
pub mod marker;
pub mod scanner;
pub mod decorator;
pub mod undecorator;

pub use matching::*;
pub use marker::*;
pub use scanner::*;
pub use decorator::*;
pub use undecorator::*;
