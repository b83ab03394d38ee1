//!
//! Placeholder substitution for log templates.
//!
//! Templates use `{}` as a positional marker, filled left to right from the
//! argument list at runtime. A marker preceded by a single backslash (`\{}`)
//! is printed literally; a doubled backslash (`\\{}`) prints one backslash
//! followed by the substituted value.
//!
//! When the last argument is an [`Argument::Error`] that no marker consumed,
//! it is attached to the result and rendered after the message together
//! with its `source()` chain.
//!
//! Formatting never fails. If an argument's `Display` implementation
//! reports an error, the output degrades to the template followed by every
//! argument, separated by spaces.
//!

use crate::result::Result;
use std::error::Error as StdError;
use std::fmt::{self, Display, Write};

/// Positional marker substituted by arguments.
pub const PLACEHOLDER: &str = "{}";
const ESCAPE: char = '\\';
/// Rendered in place of an argument whose `Display` failed.
pub const UNPRINTABLE: &str = "<unprintable>";

/// A single substitution argument.
#[derive(Clone, Copy)]
pub enum Argument<'a> {
    Value(&'a dyn Display),
    Error(&'a dyn StdError),
    /// Nested arguments, flattened in place before substitution.
    List(&'a [Argument<'a>]),
}

/// An argument after nested lists have been flattened away.
#[derive(Clone, Copy)]
enum Flat<'a> {
    Value(&'a dyn Display),
    Error(&'a dyn StdError),
}

impl Flat<'_> {
    fn write_to(&self, out: &mut String) -> fmt::Result {
        match self {
            Flat::Value(value) => write!(out, "{value}"),
            Flat::Error(error) => write!(out, "{error}"),
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Value(_) => write!(f, "Argument::Value"),
            Argument::Error(error) => write!(f, "Argument::Error({error:?})"),
            Argument::List(list) => f.debug_list().entries(list.iter()).finish(),
        }
    }
}

/// Result of formatting a template: the substituted message plus the
/// trailing error, when one was left over.
pub struct FormattedMessage<'a> {
    pub message: String,
    pub error: Option<&'a dyn StdError>,
}

impl FormattedMessage<'_> {
    /// Message followed by the attached error and its causes, one per line.
    pub fn render(&self) -> String {
        match self.error {
            Some(error) => with_error(&self.message, error),
            None => self.message.clone(),
        }
    }
}

/// `message` followed by `error` and its causes, one per line.
pub fn with_error(message: &str, error: &dyn StdError) -> String {
    let mut out = message.to_string();
    append_error(&mut out, error);
    out
}

/// Substitute `args` into `template` and render the result as one string.
pub fn format(template: &str, args: &[Argument<'_>]) -> String {
    format_message(template, args).render()
}

/// Substitute `args` into `template`, keeping a leftover trailing error
/// separate so it can be forwarded to a logger that takes one.
pub fn format_message<'a>(template: &str, args: &[Argument<'a>]) -> FormattedMessage<'a> {
    if args.is_empty() {
        return FormattedMessage {
            message: template.to_string(),
            error: None,
        };
    }

    let mut flat = Vec::with_capacity(args.len());
    flatten(args, &mut flat);

    match substitute(template, &flat) {
        Ok((message, consumed)) => {
            let error = match flat.last() {
                Some(Flat::Error(error)) if consumed < flat.len() => Some(*error),
                _ => None,
            };
            FormattedMessage { message, error }
        }
        Err(_) => FormattedMessage {
            message: concatenate(template, &flat),
            error: None,
        },
    }
}

fn flatten<'a>(args: &[Argument<'a>], out: &mut Vec<Flat<'a>>) {
    for arg in args {
        match *arg {
            Argument::Value(value) => out.push(Flat::Value(value)),
            Argument::Error(error) => out.push(Flat::Error(error)),
            Argument::List(list) => flatten(list, out),
        }
    }
}

/// Returns the message and the number of arguments placed into markers.
fn substitute(template: &str, args: &[Flat<'_>]) -> Result<(String, usize)> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;
    let mut consumed = 0;

    while consumed < args.len() {
        let Some(pos) = rest.find(PLACEHOLDER) else {
            break;
        };
        let head = &rest[..pos];
        let escapes = head.chars().rev().take_while(|c| *c == ESCAPE).count();
        match escapes {
            0 => {
                out.push_str(head);
                args[consumed].write_to(&mut out)?;
                consumed += 1;
            }
            1 => {
                out.push_str(&head[..pos - 1]);
                out.push_str(PLACEHOLDER);
            }
            _ => {
                out.push_str(&head[..pos - 1]);
                args[consumed].write_to(&mut out)?;
                consumed += 1;
            }
        }
        rest = &rest[pos + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    Ok((out, consumed))
}

fn concatenate(template: &str, args: &[Flat<'_>]) -> String {
    let mut out = template.to_string();
    for arg in args {
        let mut text = String::new();
        out.push(' ');
        match arg.write_to(&mut text) {
            Ok(()) => out.push_str(&text),
            Err(_) => out.push_str(UNPRINTABLE),
        }
    }
    out
}

fn append_error(out: &mut String, error: &dyn StdError) {
    let mut text = String::new();
    out.push('\n');
    match write!(text, "{error}") {
        Ok(()) => out.push_str(&text),
        Err(_) => out.push_str(UNPRINTABLE),
    }

    let mut source = error.source();
    while let Some(cause) = source {
        text.clear();
        out.push_str("\n  caused by: ");
        match write!(text, "{cause}") {
            Ok(()) => out.push_str(&text),
            Err(_) => out.push_str(UNPRINTABLE),
        }
        source = cause.source();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[derive(Debug, thiserror::Error)]
    #[error("write failed")]
    struct WriteFailed(#[source] DiskFull);

    struct Broken;

    impl Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_format_without_arguments() {
        assert_eq!(format("hello", &[]), "hello");
        assert_eq!(format("hello {}", &[]), "hello {}");
    }

    #[test]
    fn test_format_single_argument() {
        assert_eq!(format("value is {}", &[Argument::Value(&"x")]), "value is x");
        assert_eq!(format("hello", &[Argument::Value(&"x")]), "hello");
    }

    #[test]
    fn test_format_multiple_arguments() {
        let args = [Argument::Value(&"a"), Argument::Value(&"b")];
        assert_eq!(format("{} and {}", &args), "a and b");

        let args = [Argument::Value(&1), Argument::Value(&2.5), Argument::Value(&'c')];
        assert_eq!(format("{}-{}-{}", &args), "1-2.5-c");
    }

    #[test]
    fn test_format_unfilled_slots_stay_verbatim() {
        assert_eq!(format("{} and {} and {}", &[Argument::Value(&"a")]), "a and {} and {}");
    }

    #[test]
    fn test_format_excess_arguments_are_ignored() {
        let args = [Argument::Value(&"a"), Argument::Value(&"b"), Argument::Value(&"c")];
        assert_eq!(format("only {}", &args), "only a");
    }

    #[test]
    fn test_format_no_recursive_substitution() {
        let args = [Argument::Value(&"{}"), Argument::Value(&"b")];
        assert_eq!(format("{} {}", &args), "{} b");
    }

    #[test]
    fn test_format_trailing_error_is_appended() {
        let err = WriteFailed(DiskFull);
        let args = [Argument::Value(&"a"), Argument::Value(&"b"), Argument::Error(&err)];
        assert_eq!(format("{}", &args), "a\nwrite failed\n  caused by: disk full");

        let formatted = format_message("{}", &args);
        assert_eq!(formatted.message, "a");
        assert!(formatted.error.is_some());
    }

    #[test]
    fn test_format_error_in_slot_is_substituted() {
        let err = DiskFull;
        let formatted = format_message("failed: {}", &[Argument::Error(&err)]);
        assert_eq!(formatted.message, "failed: disk full");
        assert!(formatted.error.is_none());
        assert_eq!(formatted.render(), "failed: disk full");
    }

    #[test]
    fn test_format_error_only_argument_without_slot() {
        let err = DiskFull;
        assert_eq!(format("upload aborted", &[Argument::Error(&err)]), "upload aborted\ndisk full");
    }

    #[test]
    fn test_format_escapes() {
        assert_eq!(format("set \\{} to {}", &[Argument::Value(&"x")]), "set {} to x");
        assert_eq!(format("path C:\\\\{}", &[Argument::Value(&"dir")]), "path C:\\dir");
    }

    #[test]
    fn test_format_nested_list() {
        let nested = [Argument::Value(&"a"), Argument::Value(&"b")];
        assert_eq!(format("{} {}", &[Argument::List(&nested)]), "a b");

        let tail = [Argument::Value(&2), Argument::Value(&3)];
        let args = [Argument::Value(&1), Argument::List(&tail)];
        assert_eq!(format("{}, {}, {}", &args), "1, 2, 3");
    }

    #[test]
    fn test_format_nested_list_with_trailing_error() {
        let err = DiskFull;
        let nested = [Argument::Value(&"a"), Argument::Error(&err)];
        assert_eq!(format("got {}", &[Argument::List(&nested)]), "got a\ndisk full");
    }

    #[test]
    fn test_format_deeply_nested_lists_in_fallback() {
        let inner = [Argument::Value(&"c"), Argument::Value(&Broken)];
        let middle = [Argument::Value(&"b"), Argument::List(&inner)];
        let args = [Argument::Value(&"a"), Argument::List(&middle)];
        assert_eq!(format("{} {} {} {}", &args), "{} {} {} {} a b c <unprintable>");
    }

    #[test]
    fn test_format_failing_display_falls_back() {
        let args = [Argument::Value(&"x"), Argument::Value(&Broken)];
        assert_eq!(format("a {} b {}", &args), "a {} b {} x <unprintable>");
    }

    #[test]
    fn test_format_failing_error_display_is_replaced() {
        #[derive(Debug)]
        struct Opaque;
        impl Display for Opaque {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        impl StdError for Opaque {}

        let err = Opaque;
        let args = [Argument::Value(&"a"), Argument::Value(&"b"), Argument::Error(&err)];
        assert_eq!(format("{}", &args), "a\n<unprintable>");
    }

    #[test]
    fn test_format_display_called_once_per_slot() {
        struct Counted<'a>(&'a AtomicUsize);
        impl Display for Counted<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fetch_add(1, Ordering::SeqCst);
                write!(f, "n")
            }
        }

        let calls = AtomicUsize::new(0);
        let counted = Counted(&calls);
        let args = [Argument::Value(&counted), Argument::Value(&counted)];
        assert_eq!(format("{}{}", &args), "nn");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
