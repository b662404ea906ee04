// Document -> HTML. Everything here is pure: the same document and theme
// always produce the same markup.

pub mod markup;
pub mod resume;
pub mod themes;

pub use resume::{render, render_page, render_themed};
pub use themes::{ThemeCategory, ThemeInfo, DEFAULT_THEME};
