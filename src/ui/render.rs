// Drawing: each function returns rows already padded to the screen width.

pub mod full;
pub mod input;
pub mod list;
pub mod styles;
pub mod util;

pub use full::render_full;
pub use input::{cursor_column, render_input};
pub use list::render_list;
