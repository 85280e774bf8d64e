//! Output format implementations

pub mod epub;
pub mod html;
pub mod latex;
pub mod text;

pub use epub::EpubFormat;
pub use html::HtmlFormat;
pub use latex::LatexFormat;
pub use text::TextFormat;
