pub mod settings;
pub mod words;
pub mod state;
pub mod styles;

pub use settings::*;
pub use words::*;
pub use state::*;
pub use styles::*;
