//! Rescale the images of an HTML fragment by rewriting their inline style.
//!
//! Every `<img>` tag is visited in document order and asked for a size. A
//! size sets one CSS property (`max-height`, `max-width`, or any other name)
//! in the tag's `style` attribute; no size leaves the tag alone. Everything
//! else in the fragment is copied byte for byte.
//!
//! ```
//! use imgscale::scale_images;
//!
//! let html = r#"<div><img src="a.png" style="border:1px;"/></div>"#;
//! let out = scale_images(html, "max-height", &mut |_: &imgscale::ImageRef| Some(200)).unwrap();
//! assert_eq!(
//!     out,
//!     r#"<div><img src="a.png" style="border:1px;max-height:200px;"/></div>"#
//! );
//! ```
//!
//! For callers that answer one image at a time, [`scan`] returns a paused
//! [`ImageRequest`] instead of taking a callback.

pub mod config;
pub mod drive;
pub mod error;
pub mod logger;
pub mod markup;
pub mod scan;
pub mod source;
pub mod style;

pub use config::Config;
pub use drive::{drive, Step, Suspended};
pub use error::{Error, Result};
pub use markup::decode_fragment;
pub use scan::{scale_images, scan, ImageRef, ImageRequest};
pub use source::{BulkSize, Prompt, SizeSource};
pub use style::apply_style;
