// src/scan.rs
//
// Per-image rescaling of an HTML fragment.
//
// - `scan` finds every <img> start tag up front and pauses on the first one.
// - Each `ImageRequest` holds: the index of the pending image, the output built so far,
//   and how much of the input has already been copied into it.
// - Answering with a size rewrites only that tag's style attribute; answering with
//   None (or 0) leaves it alone. Bytes between edited tags are copied as slices, so
//   untouched markup comes out exactly as it went in.
// - After the last image the remaining input is appended and the document is returned.
// - Dropping a request abandons the scan; nothing partial is returned.

use crate::drive::{self, Step, Suspended};
use crate::error::{Error, Result};
use crate::markup::{self, Attribute};
use crate::source::SizeSource;
use crate::style::apply_style;
use html_escape::{decode_html_entities, encode_double_quoted_attribute};
use std::borrow::Cow;
use std::ops::Range;
use tracing::debug;

/// One `<img>` occurrence in a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    /// Zero-based position among the fragment's images, in document order.
    pub index: usize,
    /// The decoded `src` attribute; empty when the tag has none.
    pub src: String,
}

/// Start scaling the images of `html` by setting `property` on each one.
///
/// Returns [`Step::Yield`] with the first image to size, or [`Step::Return`]
/// with the unchanged fragment when it holds no images.
pub fn scan<'a>(html: &'a str, property: &'a str) -> Step<ImageRequest<'a>> {
    let images: Vec<Range<usize>> = markup::start_tags(html.as_bytes())
        .filter(|tag| tag.is("img"))
        .map(|tag| tag.start..tag.end())
        .collect();
    debug!(images = images.len(), property, "scanning fragment");

    let Some(first) = images.first() else {
        return Step::Return(html.to_owned());
    };
    let image = image_ref(html, first, 0);
    Step::Yield(ImageRequest {
        html,
        property,
        image,
        images,
        out: String::with_capacity(html.len() + 64),
        copied: 0,
    })
}

/// Scale every image of `html`, asking `source` for each size in document order.
pub fn scale_images<S>(html: &str, property: &str, source: &mut S) -> Result<String>
where
    S: SizeSource + ?Sized,
{
    drive::drive(scan(html, property), |image| source.size_for(image))
}

/// A scan paused on one image, waiting for its size.
#[derive(Debug)]
pub struct ImageRequest<'a> {
    html: &'a str,
    property: &'a str,
    image: ImageRef,
    images: Vec<Range<usize>>,
    out: String,
    copied: usize,
}

impl<'a> ImageRequest<'a> {
    /// The image waiting for a size.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Number of images in the fragment.
    pub fn total(&self) -> usize {
        self.images.len()
    }

    /// Answer with a size in pixels, or `None` to leave the image unchanged.
    ///
    /// A size of 0 leaves the image unchanged too. A negative size fails with
    /// [`Error::InvalidArgument`] and ends the scan.
    pub fn respond(mut self, size: Option<i64>) -> Result<Step<Self>> {
        let size = match size {
            Some(size) if size != 0 => size,
            _ => return Ok(self.skip()),
        };

        let span = self.images[self.image.index].clone();
        let tag = rewrite_tag(&self.html[span.clone()], self.property, size)?;
        debug!(index = self.image.index, src = %self.image.src, size, "rescaling image");

        self.out.push_str(&self.html[self.copied..span.start]);
        self.out.push_str(&tag);
        self.copied = span.end;
        Ok(self.advance())
    }

    /// Leave the pending image unchanged and move on.
    pub fn skip(self) -> Step<Self> {
        debug!(index = self.image.index, src = %self.image.src, "leaving image unchanged");
        self.advance()
    }

    fn advance(mut self) -> Step<Self> {
        let next = self.image.index + 1;
        match self.images.get(next) {
            Some(span) => {
                self.image = image_ref(self.html, span, next);
                Step::Yield(self)
            }
            None => {
                self.out.push_str(&self.html[self.copied..]);
                Step::Return(self.out)
            }
        }
    }
}

impl Suspended for ImageRequest<'_> {
    type Request = ImageRef;
    type Response = Option<i64>;
    type Output = String;
    type Error = Error;

    fn request(&self) -> &ImageRef {
        &self.image
    }

    fn resume(self, response: Option<i64>) -> Result<Step<Self>> {
        self.respond(response)
    }
}

fn image_ref(html: &str, span: &Range<usize>, index: usize) -> ImageRef {
    let tag = &html[span.clone()];
    let attrs = markup::parse_attributes(tag.as_bytes());
    let src = attrs
        .iter()
        .find(|a| a.is_named(tag.as_bytes(), "src"))
        .map(|a| attribute_value(tag, a).into_owned())
        .unwrap_or_default();
    ImageRef { index, src }
}

fn attribute_value<'t>(tag: &'t str, attr: &Attribute) -> Cow<'t, str> {
    match &attr.value {
        Some(range) => decode_html_entities(&tag[range.clone()]),
        None => Cow::Borrowed(""),
    }
}

/// Rewrite the `style` attribute of a raw `<img ...>` tag, keeping every
/// other byte of the tag. A missing attribute is added after the last one.
fn rewrite_tag(tag: &str, property: &str, size: i64) -> Result<String> {
    let bytes = tag.as_bytes();
    let attrs = markup::parse_attributes(bytes);
    let existing = attrs.iter().find(|a| a.is_named(bytes, "style"));

    let current = existing.map(|a| attribute_value(tag, a));
    let style = apply_style(current.as_deref(), property, size)?;
    let attr = format!("style=\"{}\"", encode_double_quoted_attribute(&style));

    let mut out = String::with_capacity(tag.len() + attr.len() + 1);
    match existing {
        Some(a) => {
            out.push_str(&tag[..a.span.start]);
            out.push_str(&attr);
            out.push_str(&tag[a.span.end..]);
        }
        None => {
            let at = markup::attribute_insert_point(bytes, &attrs);
            out.push_str(&tag[..at]);
            out.push(' ');
            out.push_str(&attr);
            out.push_str(&tag[at..]);
        }
    }
    Ok(out)
}
