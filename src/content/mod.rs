//! Content module - blog posts read from Markdown files

mod blog;
mod error;
pub mod excerpt;
mod frontmatter;
pub mod images;
mod markdown;
mod post;
pub mod scanner;

pub use blog::BlogService;
pub use error::BlogError;
pub use excerpt::extract_excerpt;
pub use frontmatter::{parse_post_date, FrontMatter};
pub use images::ImageResolver;
pub use markdown::MarkdownRenderer;
pub use post::{sort_by_date_desc, PostDetail, PostSummary};
