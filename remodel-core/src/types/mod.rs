mod type_key;
pub use type_key::*;

mod type_desc;
pub use type_desc::*;

mod field;
pub use field::*;

mod strategy;
pub use strategy::*;
