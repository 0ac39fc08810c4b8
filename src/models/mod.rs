pub mod merchant;
pub mod offer;

pub use merchant::*;
pub use offer::*;

pub use crate::domain::catalog::StatusFilter;
