pub mod attributes;
pub mod donor;
pub mod search;
pub mod submission;

pub use attributes::*;
pub use donor::*;
pub use search::*;
pub use submission::*;
