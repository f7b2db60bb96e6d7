mod expense;
mod group;
mod money;
mod split;

pub use expense::*;
pub use group::*;
pub use money::*;
pub use split::*;
