//! Composite format template scanner.
use super::options::ScanOptions;
use std::fmt;
use std::ops::{AddAssign, Index};
use std::result::Result;

/// Possible errors from prediction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// No template was supplied.
    MissingTemplate,
    /// Invalid format string; the offset is in chars.
    BadFormatString { offset: usize },
    /// Too few arguments.
    MissingArg { required: usize, supplied: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingTemplate => f.write_str("no format template supplied"),
            Error::BadFormatString { offset } => {
                write!(f, "malformed format template at offset {}", offset)
            }
            Error::MissingArg { required, supplied } => write!(
                f,
                "format template needs {} arguments but {} were supplied",
                required, supplied
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Where and why a scan stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stop {
    /// The whole template was consumed.
    End,
    /// A lone '}' outside any placeholder ended the scan. This is tolerated.
    StrayCloseBrace { offset: usize },
    /// The template is malformed at this offset.
    Malformed { offset: usize },
}

/// The result of scanning a template.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Prediction {
    required_args: usize,
    stop: Stop,
}

impl Prediction {
    /// One more than the largest index seen before the scan stopped.
    #[inline]
    pub fn required_args(&self) -> usize {
        self.required_args
    }

    /// Whether a formatter would reject this template regardless of arguments.
    #[inline]
    pub fn would_fail(&self) -> bool {
        matches!(self.stop, Stop::Malformed { .. })
    }

    #[inline]
    pub fn stop(&self) -> Stop {
        self.stop
    }

    /// The char offset at which the template was found malformed, if it was.
    pub fn failure_offset(&self) -> Option<usize> {
        match self.stop {
            Stop::Malformed { offset } => Some(offset),
            Stop::End | Stop::StrayCloseBrace { .. } => None,
        }
    }

    /// Return (required_args, would_fail).
    pub fn as_tuple(&self) -> (usize, bool) {
        (self.required_args, self.would_fail())
    }

    /// Check whether formatting with `supplied` positional arguments would succeed.
    pub fn check(&self, supplied: usize) -> Result<(), Error> {
        if let Some(offset) = self.failure_offset() {
            return Err(Error::BadFormatString { offset });
        }
        if supplied < self.required_args {
            return Err(Error::MissingArg {
                required: self.required_args,
                supplied,
            });
        }
        Ok(())
    }
}

// A helper type that holds a template slice and points into it.
// As a convenience, this returns '\0' for one-past-the-end.
// '\0' is never grammar-significant, so end-of-input is always tested with is_empty().
#[derive(Debug)]
struct FormatString<'a>(&'a [char]);

impl<'a> FormatString<'a> {
    // Return the underlying slice.
    fn as_slice(&self) -> &'a [char] {
        self.0
    }

    // Return true if we are empty.
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Return our offset within the template we were created from.
    fn offset_in(&self, template: &[char]) -> usize {
        template.len() - self.0.len()
    }

    // Return true if the char at the cursor is an ASCII digit.
    fn at_digit(&self) -> bool {
        self[0].is_ascii_digit()
    }

    // Read an unsigned int from our cursor, stopping at the first non-digit.
    // The value stops growing at `limit`, but all digits are consumed,
    // so the loop is bounded by the digit run rather than by the limit.
    // If there are no digits, return 0.
    fn get_int(&mut self, limit: usize) -> usize {
        let mut i: usize = 0;
        while let Some(digit) = self[0].to_digit(10) {
            if i < limit {
                i = i.saturating_mul(10).saturating_add(digit as usize).min(limit);
            }
            *self += 1;
        }
        i
    }

    // Skip a run of spaces. Only ' ' counts; tabs are ordinary characters.
    fn skip_spaces(&mut self) {
        let spaces = self.0.iter().take_while(|&&c| c == ' ').count();
        *self += spaces;
    }

    // Skip literal text, including doubled "{{" and "}}".
    // Stop at the end or at a lone brace.
    fn skip_lit(&mut self) {
        loop {
            let c = self[0];
            match c {
                '{' | '}' if self[1] == c => *self += 2,
                '{' | '}' => return,
                _ if self.is_empty() => return,
                _ => *self += 1,
            }
        }
    }

    // Skip a format-spec clause, leaving the cursor on its closing '}'.
    // Doubled braces are escapes. Return false on a lone '{' or the end of input.
    fn skip_format_spec(&mut self) -> bool {
        loop {
            if self.is_empty() {
                return false;
            }
            let c = self[0];
            match c {
                '{' if self[1] == '{' => *self += 2,
                '{' => return false,
                '}' if self[1] == '}' => *self += 2,
                '}' => return true,
                _ => *self += 1,
            }
        }
    }
}

// Advance this format string by a number of chars.
impl AddAssign<usize> for FormatString<'_> {
    fn add_assign(&mut self, rhs: usize) {
        self.0 = &self.0[rhs..];
    }
}

// Index into FormatString, returning \0 for one-past-the-end.
impl Index<usize> for FormatString<'_> {
    type Output = char;

    fn index(&self, idx: usize) -> &char {
        let s = self.as_slice();
        if idx == s.len() {
            &'\0'
        } else {
            &s[idx]
        }
    }
}

/// Scan a template with default options.
pub fn scan(template: &[char]) -> Prediction {
    scan_with(template, &ScanOptions::default())
}

/// Scan a template, predicting how many positional arguments a composite formatter needs
/// and whether it would reject the template outright.
///
/// # Parameters
/// - `template`: The template being scanned.
/// - `options`: Limits applied while scanning.
///
/// # Returns
/// A `Prediction`. Malformed templates are reported through it, never as an error.
pub fn scan_with(template: &[char], options: &ScanOptions) -> Prediction {
    let limit = options.numeric_limit();
    let mut s = FormatString(template);
    let mut required_args: usize = 0;

    // Give up at the cursor, keeping whatever count we have so far.
    let malformed = |s: &FormatString, required_args: usize| {
        let offset = s.offset_in(template);
        FLOG!(
            format_scan,
            "malformed template at offset",
            offset,
            "of",
            template.len(),
            "after requiring",
            required_args,
            "args"
        );
        Prediction {
            required_args,
            stop: Stop::Malformed { offset },
        }
    };

    loop {
        s.skip_lit();
        if s.is_empty() {
            break;
        }

        // skip_lit only stops on a lone brace.
        if s[0] == '}' {
            let offset = s.offset_in(template);
            FLOG!(format_scan, "stray '}' ends scan at offset", offset);
            return Prediction {
                required_args,
                stop: Stop::StrayCloseBrace { offset },
            };
        }
        debug_assert!(s[0] == '{');
        s += 1;

        // The index must follow the brace directly.
        if !s.at_digit() {
            return malformed(&s, required_args);
        }
        let index = s.get_int(limit);
        required_args = required_args.max(index.saturating_add(1));
        if s.is_empty() {
            return malformed(&s, required_args);
        }
        s.skip_spaces();

        // Optional alignment: ",", spaces, optional '-', digits.
        if s[0] == ',' {
            s += 1;
            s.skip_spaces();
            if s[0] == '-' {
                s += 1;
            }
            if !s.at_digit() {
                return malformed(&s, required_args);
            }
            let width = s.get_int(limit);
            FLOG!(format_scan_detail, "alignment", width, "for index", index);
            s.skip_spaces();
        }

        // Optional format spec, terminated by the placeholder's own '}'.
        if s[0] == ':' {
            s += 1;
            if !s.skip_format_spec() {
                return malformed(&s, required_args);
            }
        }

        if s.is_empty() || s[0] != '}' {
            return malformed(&s, required_args);
        }
        s += 1;
        FLOG!(format_scan_detail, "placeholder index", index);
    }

    Prediction {
        required_args,
        stop: Stop::End,
    }
}
