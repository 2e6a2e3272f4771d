#[cfg(feature = "widestring")]
use widestring::{Utf32Str as wstr, Utf32String as WString};

/// Template input kinds.
/// The scanner itself works on chars; narrow strings are decoded into caller-provided storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Template<'a> {
    Str(&'a str),
    Chars(&'a [char]),
    #[cfg(feature = "widestring")]
    WStr(&'a wstr),
}

impl<'a> Template<'a> {
    // Return this template as a char slice, using the provided storage if necessary.
    // In practice 'storage' is only used for narrow strings.
    #[allow(clippy::ptr_arg)]
    pub fn as_chars<'s>(&'s self, storage: &'s mut Vec<char>) -> &'s [char]
    where
        'a: 's,
    {
        match self {
            Template::Str(s) => {
                storage.clear();
                storage.extend(s.chars());
                storage
            }
            Template::Chars(chars) => chars,
            #[cfg(feature = "widestring")]
            Template::WStr(s) => s.as_char_slice(),
        }
    }

    /// Number of chars in the template. Offsets reported by the scanner are below or equal to this.
    pub fn char_len(&self) -> usize {
        match self {
            Template::Str(s) => s.chars().count(),
            Template::Chars(chars) => chars.len(),
            #[cfg(feature = "widestring")]
            Template::WStr(s) => s.len(),
        }
    }
}

/// Conversion from a raw value to a template.
pub trait ToTemplate<'a> {
    fn to_template(self) -> Template<'a>;
}

impl<'a> ToTemplate<'a> for Template<'a> {
    fn to_template(self) -> Template<'a> {
        self
    }
}

impl<'a> ToTemplate<'a> for &'a str {
    fn to_template(self) -> Template<'a> {
        Template::Str(self)
    }
}

impl<'a> ToTemplate<'a> for &'a String {
    fn to_template(self) -> Template<'a> {
        Template::Str(self)
    }
}

impl<'a> ToTemplate<'a> for &'a [char] {
    fn to_template(self) -> Template<'a> {
        Template::Chars(self)
    }
}

impl<'a> ToTemplate<'a> for &'a Vec<char> {
    fn to_template(self) -> Template<'a> {
        Template::Chars(self)
    }
}

#[cfg(feature = "widestring")]
impl<'a> ToTemplate<'a> for &'a wstr {
    fn to_template(self) -> Template<'a> {
        Template::WStr(self)
    }
}

#[cfg(feature = "widestring")]
impl<'a> ToTemplate<'a> for &'a WString {
    fn to_template(self) -> Template<'a> {
        Template::WStr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "widestring")]
    use widestring::utf32str;

    #[test]
    fn test_to_template() {
        assert!(matches!("{0}".to_template(), Template::Str("{0}")));
        assert!(matches!(String::from("{0}").to_template(), Template::Str(_)));
        let chars: Vec<char> = "{0}".chars().collect();
        assert!(matches!(chars.to_template(), Template::Chars(_)));
        assert!(matches!(chars.as_slice().to_template(), Template::Chars(_)));
        #[cfg(feature = "widestring")]
        assert!(matches!(utf32str!("{0}").to_template(), Template::WStr(_)));
        #[cfg(feature = "widestring")]
        assert!(matches!(WString::from("{0}").to_template(), Template::WStr(_)));
    }

    #[test]
    fn test_as_chars() {
        let mut storage = Vec::new();
        let narrow = "{0} \u{e9}t\u{e9}".to_template();
        assert_eq!(narrow.as_chars(&mut storage), &['{', '0', '}', ' ', 'é', 't', 'é']);
        assert_eq!(narrow.char_len(), 7);

        // Char input borrows directly and leaves storage alone.
        let mut storage = vec!['x'];
        let chars = ['{', '1', '}'];
        let wide = chars.as_slice().to_template();
        assert_eq!(wide.as_chars(&mut storage), &chars);
        assert_eq!(storage, vec!['x']);
        assert_eq!(wide.char_len(), 3);
    }
}
