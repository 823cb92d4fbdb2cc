pub mod cpi;
pub mod math;
pub mod oracle;

pub use math::*;
pub use oracle::*;
