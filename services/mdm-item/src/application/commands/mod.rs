//! Commands

mod batch_commands;
mod item_commands;
mod qa_commands;
mod storage_commands;
mod supplier_commands;
mod transaction_commands;

pub use batch_commands::*;
pub use item_commands::*;
pub use qa_commands::*;
pub use storage_commands::*;
pub use supplier_commands::*;
pub use transaction_commands::*;
