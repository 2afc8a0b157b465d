//! Where image sizes come from.
//!
//! The scanner treats a [`SizeSource`] as a plain per-image function. Any
//! policy on top of that, such as asking once and reusing the answer, lives
//! here and not in the scanner.

use crate::scan::ImageRef;
use std::io::{BufRead, Write};

/// Largest size the interactive prompt accepts.
pub const MAX_SIZE: i64 = 10_000;

/// Supplies a target size in pixels for each image, or `None` to skip it.
pub trait SizeSource {
    fn size_for(&mut self, image: &ImageRef) -> Option<i64>;
}

impl<F> SizeSource for F
where
    F: FnMut(&ImageRef) -> Option<i64>,
{
    fn size_for(&mut self, image: &ImageRef) -> Option<i64> {
        self(image)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Remembered {
    Unasked,
    Declined,
    Size(i64),
}

/// Asks once and applies the answer to every image.
///
/// A declined answer (`None` or 0) is remembered as well: later images are
/// skipped without asking again.
pub struct BulkSize<A> {
    ask: A,
    remembered: Remembered,
}

impl<A> BulkSize<A>
where
    A: FnMut() -> Option<i64>,
{
    pub fn new(ask: A) -> Self {
        Self {
            ask,
            remembered: Remembered::Unasked,
        }
    }
}

impl<A> SizeSource for BulkSize<A>
where
    A: FnMut() -> Option<i64>,
{
    fn size_for(&mut self, image: &ImageRef) -> Option<i64> {
        match self.remembered {
            Remembered::Declined => None,
            Remembered::Size(size) => Some(size),
            Remembered::Unasked => {
                let answer = (self.ask)();
                tracing::debug!(src = %image.src, ?answer, "bulk size answered");
                match answer {
                    Some(size) if size != 0 => {
                        self.remembered = Remembered::Size(size);
                        Some(size)
                    }
                    _ => {
                        self.remembered = Remembered::Declined;
                        None
                    }
                }
            }
        }
    }
}

enum Answer {
    Size(i64),
    Skip,
    Invalid,
}

fn parse_answer(line: &str, default_size: i64) -> Answer {
    let line = line.trim();
    if line.is_empty() {
        return Answer::Size(default_size);
    }
    if line.eq_ignore_ascii_case("s") || line.eq_ignore_ascii_case("skip") {
        return Answer::Skip;
    }
    match line.parse::<i64>() {
        Ok(size) if (0..=MAX_SIZE).contains(&size) => Answer::Size(size),
        _ => Answer::Invalid,
    }
}

/// Asks a person for sizes over a line-based terminal.
///
/// An empty line takes the default size, `s` or `skip` leaves the image
/// alone, and end of input cancels like `skip`. Other input is asked again.
pub struct Prompt<R, W> {
    input: R,
    output: W,
    property: String,
    default_size: i64,
}

impl<R, W> Prompt<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W, property: impl Into<String>, default_size: i64) -> Self {
        Self {
            input,
            output,
            property: property.into(),
            default_size,
        }
    }

    /// Show `message` and read a size.
    pub fn ask(&mut self, message: &str) -> Option<i64> {
        loop {
            if let Err(err) = write!(self.output, "{message} [{}]: ", self.default_size)
                .and_then(|()| self.output.flush())
            {
                tracing::warn!("cannot write prompt: {err}");
                return None;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("cannot read answer: {err}");
                    return None;
                }
            }

            match parse_answer(&line, self.default_size) {
                Answer::Size(size) => return Some(size),
                Answer::Skip => return None,
                Answer::Invalid => {
                    if writeln!(
                        self.output,
                        "Enter a whole number from 0 to {MAX_SIZE}, or 's' to skip."
                    )
                    .is_err()
                    {
                        return None;
                    }
                }
            }
        }
    }

    /// Ask once for a size that applies to all images.
    pub fn ask_for_all(&mut self) -> Option<i64> {
        let message = format!("Provide a new {} for all images (px)", self.property);
        self.ask(&message)
    }
}

impl<R, W> SizeSource for Prompt<R, W>
where
    R: BufRead,
    W: Write,
{
    fn size_for(&mut self, image: &ImageRef) -> Option<i64> {
        let message = format!("Provide a new {} for {} (px)", self.property, image.src);
        self.ask(&message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn image(src: &str) -> ImageRef {
        ImageRef {
            index: 0,
            src: src.to_string(),
        }
    }

    #[test]
    fn closures_are_sources() {
        let mut source = |image: &ImageRef| (image.src == "a.png").then_some(10_i64);
        assert_eq!(source.size_for(&image("a.png")), Some(10));
        assert_eq!(source.size_for(&image("b.png")), None);
    }

    #[test]
    fn bulk_asks_once_and_reuses_answer() {
        let mut asked = 0;
        let mut bulk = BulkSize::new(|| {
            asked += 1;
            Some(120)
        });
        assert_eq!(bulk.size_for(&image("a.png")), Some(120));
        assert_eq!(bulk.size_for(&image("b.png")), Some(120));
        drop(bulk);
        assert_eq!(asked, 1);
    }

    #[test]
    fn bulk_remembers_decline() {
        for declined in [None, Some(0)] {
            let mut asked = 0;
            let mut bulk = BulkSize::new(|| {
                asked += 1;
                declined
            });
            assert_eq!(bulk.size_for(&image("a.png")), None);
            assert_eq!(bulk.size_for(&image("b.png")), None);
            drop(bulk);
            assert_eq!(asked, 1);
        }
    }

    #[test]
    fn prompt_reads_sizes_defaults_and_skips() {
        let input = Cursor::new("250\n\nskip\nabc\n20000\n7\n");
        let mut output = Vec::new();
        let mut prompt = Prompt::new(input, &mut output, "max-width", 150);

        assert_eq!(prompt.size_for(&image("a.png")), Some(250));
        assert_eq!(prompt.size_for(&image("b.png")), Some(150));
        assert_eq!(prompt.size_for(&image("c.png")), None);
        assert_eq!(prompt.size_for(&image("d.png")), Some(7));
        assert_eq!(prompt.size_for(&image("e.png")), None);
        drop(prompt);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Provide a new max-width for a.png (px) [150]: "));
        assert_eq!(shown.matches("Enter a whole number").count(), 2);
    }

    #[test]
    fn prompt_asks_for_all() {
        let mut output = Vec::new();
        let mut prompt = Prompt::new(Cursor::new("64\n"), &mut output, "max-height", 150);
        assert_eq!(prompt.ask_for_all(), Some(64));
        drop(prompt);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Provide a new max-height for all images (px) [150]: "
        );
    }
}
