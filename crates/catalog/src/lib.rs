pub mod schema;
pub mod keywords;
pub mod table;
pub mod degraded;

pub use schema::*;
pub use keywords::*;
pub use table::*;
pub use degraded::*;
