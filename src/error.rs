/// A simple macro for constructing an ad hoc error with a formatted message.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::adhoc(format_args!($($tt)*))
    }}
}

/// An error that can occur in this crate.
///
/// Every fallible operation in this crate reports its failure through this
/// one type. There are only two ways a formatting call can fail, and both
/// are reflected by predicates: [`Error::is_invalid_format`] when the
/// pattern argument is not a string, and [`Error::is_invalid_date`] when
/// the date argument cannot be interpreted as a date. More detailed causes
/// are chained beneath those headline messages and rendered by the
/// `Display` impl, most recent first, separated by `: `.
///
/// # Design
///
/// A single error type for the whole crate was chosen over finer grained
/// types because the two failure classes above compose with a number of
/// lower level causes (UTF-8 validation, range checks, parse failures),
/// and threading distinct types through that composition buys nothing for
/// callers who just want to know which argument was bad.
pub struct Error {
    /// The boxed representation keeps `Error` at one word, which matters
    /// because every formatting call returns a `Result<String, Error>`.
    inner: Option<alloc::boxed::Box<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    /// A free-form message.
    Adhoc(AdhocError),
    /// The pattern argument was not a string.
    FormatArg,
    /// The date argument could not be interpreted as a date.
    DateArg,
    /// A value fell outside its allowed range.
    Range(RangeError),
    /// Should never be seen. Exists to support cheap error construction in
    /// contexts where a message cannot be built.
    Unknown,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from Rust's
    /// standard library (available in `core`) to create the
    /// `core::fmt::Arguments`.
    ///
    /// Callers generally should use their own error types, but it can
    /// occasionally be convenient to manufacture an error value of this
    /// crate's type specifically.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::adhoc(message)
    }

    /// Returns true when this error is a result of the pattern argument
    /// not being a string.
    ///
    /// # Example
    ///
    /// ```
    /// let err = datemask::format(b"\xFFYYYY", 0i64).unwrap_err();
    /// assert!(err.is_invalid_format());
    /// assert!(!err.is_invalid_date());
    /// ```
    pub fn is_invalid_format(&self) -> bool {
        // The classifying kind is the headline of the chain, but scanning
        // the whole chain keeps the predicate immune to re-wrapping.
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::FormatArg))
    }

    /// Returns true when this error is a result of the date argument not
    /// being interpretable as a date.
    ///
    /// # Example
    ///
    /// ```
    /// let err = datemask::format("YYYY", "not a date").unwrap_err();
    /// assert!(err.is_invalid_date());
    /// assert!(!err.is_invalid_format());
    /// ```
    pub fn is_invalid_date(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::DateArg))
    }

    /// Returns true when this error originated from a value being out of
    /// this crate's supported range.
    ///
    /// Such errors are always also [`Error::is_invalid_date`] when they
    /// escape from a formatting call, since a date outside the supported
    /// range is not interpretable as a date.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Moment;
    ///
    /// assert!(Moment::new(2025, 2, 29, 0, 0, 0, 0).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::Range(_)))
    }
}

impl Error {
    /// Creates a new error from a format string and arguments.
    #[inline(never)]
    #[cold]
    pub(crate) fn adhoc<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// The headline error for a pattern argument that isn't a string.
    #[inline(never)]
    #[cold]
    pub(crate) fn format_arg() -> Error {
        Error::from(ErrorKind::FormatArg)
    }

    /// The headline error for a date argument that isn't a date.
    #[inline(never)]
    #[cold]
    pub(crate) fn date_arg() -> Error {
        Error::from(ErrorKind::DateArg)
    }

    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is
    /// out of range. (e.g., "month")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(always)]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        // OK because we just ensured the inner representation exists.
        let inner = err.inner.as_mut().unwrap();
        assert!(inner.cause.is_none(), "cause of consequent must be `None`");
        inner.cause = Some(self);
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain, i.e.,
    /// the highest level context. The last error in the chain is the root
    /// cause, closest to the point where something went wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Adhoc(ref err) => err.fmt(f),
            ErrorKind::FormatArg => {
                f.write_str("Argument `format` must be a string")
            }
            ErrorKind::DateArg => f.write_str(
                "Argument `date` must be instance of Date \
                 or Unix Timestamp or ISODate String",
            ),
            ErrorKind::Range(ref err) => err.fmt(f),
            ErrorKind::Unknown => f.write_str("unknown datemask error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(alloc::boxed::Box::new(ErrorInner {
                kind,
                cause: None,
            })),
        }
    }
}

/// A generic error message.
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type includes a name describing
/// which input was out of bounds, the value given and its minimum and
/// maximum allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This exists to make `Error::context` work without relying on public
/// `From` impls, which would otherwise become part of the crate's API.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or
/// `Result<T, Error>`. In the latter case, it absolves one of the need to
/// call `map_err` everywhere context is added.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error
    /// as the cause.
    ///
    /// Note that the consequent must not itself have a cause, since the
    /// causal chain is a linked list and the cause would be dropped.
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// Useful when building the consequent error allocates, so the happy
    /// path doesn't pay for it.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    #[inline(always)]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[inline(always)]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // We test that our `Error` type is the size we expect. This isn't an
    // API guarantee, but if the size increases, we really want to make
    // sure that happens intentionally. Every formatting call returns a
    // `Result<_, Error>`, so this should be a speed bump.
    #[test]
    fn error_size() {
        let word = core::mem::size_of::<usize>();
        assert_eq!(word, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_renders_most_recent_first() {
        let err = err!("invalid month name")
            .context(err!("failed to parse \"Febtober 2, 2015\""))
            .context(Error::date_arg());
        assert_eq!(
            err.to_string(),
            "Argument `date` must be instance of Date or Unix Timestamp \
             or ISODate String: failed to parse \"Febtober 2, 2015\": \
             invalid month name",
        );
        assert!(err.is_invalid_date());
        assert!(!err.is_invalid_format());
    }

    #[test]
    fn range_error_message() {
        let err = Error::range("month", 13, 1, 12);
        assert_eq!(
            err.to_string(),
            "parameter 'month' with value 13 is not in the required \
             range of 1..=12",
        );
        assert!(err.is_range());
    }
}
