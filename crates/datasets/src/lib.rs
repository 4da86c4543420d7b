pub mod rules;
pub mod folder;
pub mod scan;
pub mod reconcile;
pub mod summary;

pub use rules::*;
pub use folder::*;
pub use scan::*;
pub use reconcile::*;
pub use summary::*;
