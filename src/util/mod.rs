/// Presentation helpers shared by every report

pub mod display;
pub mod format;
pub mod pager;

pub use format::*;
pub use pager::{paginate, ResultPager};
