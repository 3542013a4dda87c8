pub mod authors;
pub mod names;
pub mod reconcile;

pub use authors::*;
pub use names::*;
pub use reconcile::*;
