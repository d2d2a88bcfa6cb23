//! Call-site metadata captured at compile time
//!
//! The location of a log call is resolved where the call is written, either
//! through the [`call_site!`](crate::call_site) macro (file, line and
//! enclosing function) or through `#[track_caller]` on the convenience
//! methods (file and line only). No stack walking happens at runtime.

use std::fmt;
use std::panic::Location;

/// Placeholder used when the enclosing function is not known.
pub const UNKNOWN_FUNCTION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// Build a call site from the raw values produced by `call_site!`.
    ///
    /// `fn_path` is the type name of a marker function nested in the caller,
    /// `file` the full source path.
    #[doc(hidden)]
    pub fn from_raw(fn_path: &'static str, file: &'static str, line: u32) -> Self {
        Self::new(enclosing_function(fn_path), base_name(file), line)
    }

    /// Location of the caller of the `#[track_caller]` function this is used in.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(UNKNOWN_FUNCTION, base_name(location.file()), location.line())
    }

    #[inline]
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Base name of the source file, without directories.
    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.function, self.line)
    }
}

fn base_name(path: &'static str) -> &'static str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// "krate::module::func::{{closure}}::__here" -> "func"
fn enclosing_function(fn_path: &'static str) -> &'static str {
    let mut path = fn_path.strip_suffix("::__here").unwrap_or(fn_path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    match path.rsplit("::").next() {
        Some(name) if !name.is_empty() => name,
        _ => UNKNOWN_FUNCTION,
    }
}

/// Capture the current source location, including the enclosing function.
///
/// # Examples
///
/// ```
/// use dual_sink_logger::call_site;
///
/// fn handler() -> dual_sink_logger::CallSite {
///     call_site!()
/// }
///
/// let site = handler();
/// assert_eq!(site.function(), "handler");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::CallSite::from_raw(__type_name_of(__here), file!(), line!())
    }};
}
