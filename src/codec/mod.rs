//! HTML codec for the document model.
//!
//! HTML is the storage format: documents are decoded once when an editing
//! session starts and re-encoded after every structural edit.
//!
//! | Block | Tag |
//! |---|---|
//! | Paragraph | `<p>` (also any unrecognized tag on decode) |
//! | HeadingOne / HeadingTwo | `<h1>` / `<h2>` |
//! | BlockQuote | `<blockquote>` |
//! | BulletedList / NumberedList | `<ul>` / `<ol>` |
//! | ListItem | `<li>` |
//! | Media | `<img>`, or the linked-media wrapper |
//!
//! # Example
//!
//! ```
//! use quire::codec::{decode, encode};
//!
//! let html = "<h1 style=\"text-align: center\">Title</h1><ol><li>Item</li></ol>";
//! let doc = decode(html);
//! assert_eq!(encode(&doc), html);
//! ```

mod css;
mod decode;
mod encode;
mod escape;
mod tag_map;

pub use css::text_align;
pub use decode::{decode, plain_text_document};
pub use encode::{EMPTY_BLOCK_PLACEHOLDER, encode, encode_block, encode_media, encode_text};
pub use escape::escape_html;
pub use tag_map::{TagClass, classify};
