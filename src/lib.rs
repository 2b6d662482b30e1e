pub mod di;
pub mod entity;
pub mod interactor;
pub mod kuru;
pub mod monad;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use services::*;
pub use settings::Settings;
pub use utils::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
