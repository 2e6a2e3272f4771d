use nix::unistd;
use std::os::fd::{BorrowedFd, RawFd};
use std::sync::atomic::{AtomicI32, Ordering};

#[rustfmt::skip::macros(category)]
pub mod categories {
    use std::sync::atomic::AtomicBool;

    pub struct category_t {
        pub name: &'static str,
        pub description: &'static str,
        pub enabled: AtomicBool,
    }

    /// Macro to declare a static variable identified by $var,
    /// with the given name and description, and optionally enabled by default.
    macro_rules! declare_category {
        (
            ($var:ident, $name:literal, $description:literal, $enabled:expr)
        ) => {
            pub static $var: category_t = category_t {
                name: $name,
                description: $description,
                enabled: AtomicBool::new($enabled),
            };
        };
        (
            ($var:ident, $name:literal, $description:literal)
        ) => {
            declare_category!(($var, $name, $description, false));
        };
    }

    /// Macro to extract the variable name for a category.
    macro_rules! category_name {
        (($var:ident, $name:literal, $description:literal, $enabled:expr)) => {
            $var
        };
        (($var:ident, $name:literal, $description:literal)) => {
            $var
        };
    }

    macro_rules! categories {
        (
            // A repetition of categories, separated by semicolons.
            $($cats:tt);*

            // Allow trailing semicolon.
            $(;)?
        ) => {
            // Declare each category.
            $(
                declare_category!($cats);
            )*

            // Define a function which gives you a Vector of all categories.
            pub fn all_categories() -> Vec<&'static category_t> {
                vec![
                    $(
                        & category_name!($cats),
                    )*
                ]
            }
        };
    }

    categories!(
        (error, "error", "Serious unexpected errors (on by default)", true);

        (format_scan, "format-scan", "Templates that stop the scanner early");

        (format_scan_detail, "format-scan-detail", "Each placeholder the scanner accepts");
    );
}

/// FLOG formats values. By default we would like to use Display, and fall back to Debug.
/// However that would require specialization. So instead we make two "separate" traits, bring them both in scope,
/// and let Rust figure it out.
/// Clients can opt a Debug type into Floggable by implementing FloggableDebug:
///    impl FloggableDebug for MyType {}
pub trait FloggableDisplay {
    /// Return a string representation of this thing.
    fn to_flog_str(&self) -> String;
}

impl<T: std::fmt::Display> FloggableDisplay for T {
    fn to_flog_str(&self) -> String {
        self.to_string()
    }
}

pub trait FloggableDebug: std::fmt::Debug {
    fn to_flog_str(&self) -> String {
        format!("{:?}", self)
    }
}

impl FloggableDebug for crate::Stop {}

/// Write all of `input` to `fd`, stopping at the first error.
fn write_to_fd(mut input: &[u8], fd: RawFd) -> nix::Result<()> {
    while !input.is_empty() {
        // Safety: the fd is only borrowed for the duration of the write.
        let amt = unistd::write(unsafe { BorrowedFd::borrow_raw(fd) }, input)?;
        assert!(amt <= input.len(), "Wrote more than requested");
        input = &input[amt..];
    }
    Ok(())
}

/// Write to our FLOG file.
pub fn flog_impl(s: &str) {
    let fd = get_flog_file_fd();
    if fd < 0 {
        return;
    }
    let _ = write_to_fd(s.as_bytes(), fd);
}

/// The entry point for flogging.
#[macro_export]
macro_rules! FLOG {
    ($category:ident, $($elem:expr),+ $(,)*) => {
        if $crate::flog::categories::$category.enabled.load(std::sync::atomic::Ordering::Relaxed) {
            #[allow(unused_imports)]
            use $crate::flog::{FloggableDisplay, FloggableDebug};
            let mut vs = vec![format!("{}:", $crate::flog::categories::$category.name)];
            $(
                {
                   vs.push($elem.to_flog_str())
                }
            )+
            // We don't use locking here so we have to append our own newline to avoid multiple writes.
            let mut v = vs.join(" ");
            v.push('\n');
            $crate::flog::flog_impl(&v);
        }
    };
}

#[macro_export]
macro_rules! should_flog {
    ($category:ident) => {
        $crate::flog::categories::$category
            .enabled
            .load(std::sync::atomic::Ordering::Relaxed)
    };
}

pub use {should_flog, FLOG};

/// Match `name` against a wildcard where '*' matches any run and '?' any single char.
fn wildcard_match(name: &str, wc: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let wc: Vec<char> = wc.chars().collect();
    // Greedy match with backtracking to the most recent '*'.
    let (mut n, mut w) = (0, 0);
    let mut restart: Option<(usize, usize)> = None;
    while n < name.len() {
        match wc.get(w) {
            Some('*') => {
                restart = Some((w, n));
                w += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                n += 1;
                w += 1;
            }
            _ => match restart {
                Some((star, matched)) => {
                    w = star + 1;
                    n = matched + 1;
                    restart = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    wc[w..].iter().all(|&c| c == '*')
}

/// For each category, if its name matches the wildcard, set its enabled to the given sense.
fn apply_one_wildcard(wc: &str, sense: bool) {
    let mut match_found = false;
    for cat in categories::all_categories() {
        if wildcard_match(cat.name, wc) {
            cat.enabled.store(sense, Ordering::Relaxed);
            match_found = true;
        }
    }
    if !match_found {
        flog_impl(&format!("Failed to match debug category: {wc}\n"));
    }
}

/// Set the active flog categories according to the given wildcard `wc`.
/// Entries are comma-separated; a leading '-' disables matching categories.
pub fn activate_flog_categories_by_pattern(wc: &str) {
    // Normalize underscores to dashes, allowing the user to be sloppy.
    let wc = wc.replace('_', "-");
    for s in wc.split(',') {
        if let Some(disabled) = s.strip_prefix('-') {
            apply_one_wildcard(disabled, false);
        } else {
            apply_one_wildcard(s, true);
        }
    }
}

/// The flog output fd. Defaults to stderr. A value < 0 disables flog.
static FLOG_FD: AtomicI32 = AtomicI32::new(libc::STDERR_FILENO);

pub fn set_flog_file_fd(fd: RawFd) {
    FLOG_FD.store(fd, Ordering::Relaxed);
}

#[inline]
pub fn get_flog_file_fd() -> RawFd {
    FLOG_FD.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("format-scan", "format-scan"));
        assert!(wildcard_match("format-scan", "format-*"));
        assert!(wildcard_match("format-scan-detail", "*detail"));
        assert!(wildcard_match("format-scan-detail", "format*scan*"));
        assert!(wildcard_match("error", "err?r"));
        assert!(wildcard_match("error", "*"));
        assert!(!wildcard_match("error", "warning"));
        assert!(!wildcard_match("format-scan", "format-scan-*"));
        assert!(!wildcard_match("error", "error?"));
    }
}
