mod ledger;
mod money;
mod summary;
mod transaction;
mod view;

pub use ledger::*;
pub use money::*;
pub use summary::*;
pub use transaction::*;
pub use view::*;
