pub mod swap_orchestrator;

pub use swap_orchestrator::{PairSelection, SwapOrchestrator};
