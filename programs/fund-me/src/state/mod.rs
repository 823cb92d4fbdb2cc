pub mod fund_me_state;

pub use fund_me_state::*;
