//! Diagnostics.

use std::fmt::{self, Display, Formatter};

use ecow::{EcoVec, eco_vec};

use crate::color::ParseColorError;
use crate::node::SourceChannel;

/// Early-return with a [`StrResult`] or [`HintedStrResult`].
///
/// You can also emit hints with the `; hint: "..."` syntax.
///
/// ```ignore
/// bail!("bailing with a {}", "string result");
/// bail!(
///     "bailing with hints";
///     hint: "hint 1";
///     hint: "hint 2";
/// );
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    (
        $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)*
        $(,)?
    ) => {
        return Err($crate::diag::error!(
            $fmt $(, $arg)*
            $(; hint: $hint $(, $hint_arg)*)*
        ).into())
    };
}

/// Construct an [`EcoString`] or [`HintedString`].
#[macro_export]
#[doc(hidden)]
macro_rules! __error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::diag::eco_format!($fmt, $($arg),*)
    };

    (
        $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)*
        $(,)?
    ) => {
        $crate::diag::HintedString::new(
            $crate::diag::eco_format!($fmt, $($arg),*)
        ) $(.with_hint($crate::diag::eco_format!($hint, $($hint_arg),*)))*
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    crate::__error as error,
    ecow::{eco_format, EcoString},
};

/// A result type with a string error message.
pub type StrResult<T> = Result<T, EcoString>;

/// A result type with a string error message and hints.
pub type HintedStrResult<T> = Result<T, HintedString>;

/// A string message with hints.
///
/// The first element of the vector contains the message, the remaining
/// elements are the hints. The vector is guaranteed to not be empty.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HintedString(EcoVec<EcoString>);

impl HintedString {
    /// Creates a new hinted string with the given message.
    pub fn new(message: EcoString) -> Self {
        Self(eco_vec![message])
    }

    /// A diagnostic message describing the problem.
    pub fn message(&self) -> &EcoString {
        self.0.first().unwrap()
    }

    /// Additional hints to the user, indicating how the problem could be
    /// avoided or worked around.
    pub fn hints(&self) -> &[EcoString] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Adds a single hint.
    pub fn hint(&mut self, hint: impl Into<EcoString>) {
        self.0.push(hint.into());
    }

    /// Adds a single hint.
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint(hint);
        self
    }
}

impl<S> From<S> for HintedString
where
    S: Into<EcoString>,
{
    fn from(value: S) -> Self {
        Self::new(value.into())
    }
}

/// Enrich a [`StrResult`] or [`HintedStrResult`] with a hint.
pub trait Hint<T> {
    /// Add the hint.
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T>;
}

impl<T, S> Hint<T> for Result<T, S>
where
    S: Into<EcoString>,
{
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T> {
        self.map_err(|message| HintedString::new(message.into()).with_hint(hint))
    }
}

impl<T> Hint<T> for HintedStrResult<T> {
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T> {
        self.map_err(|mut error| {
            error.hint(hint.into());
            error
        })
    }
}

/// A result type with a color-model error.
pub type ColorResult<T> = Result<T, ColorError>;

/// A fatal error in the color model.
///
/// Catalog construction is all-or-nothing; any of these aborts the build.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ColorError {
    /// A color specification could not be parsed.
    Parse(ParseColorError),
    /// A channel was requested that the node does not support.
    UnknownChannel {
        /// The name of the queried node.
        node: EcoString,
        /// The unsupported channel.
        channel: SourceChannel,
    },
}

impl std::error::Error for ColorError {}

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::UnknownChannel { node, channel } => {
                write!(f, "derived color `{node}` has no `{channel}` channel")
            }
        }
    }
}

impl From<ParseColorError> for ColorError {
    fn from(err: ParseColorError) -> Self {
        Self::Parse(err)
    }
}

impl From<ColorError> for EcoString {
    fn from(err: ColorError) -> Self {
        eco_format!("{err}")
    }
}

impl From<ColorError> for HintedString {
    fn from(err: ColorError) -> Self {
        Self::new(eco_format!("{err}"))
    }
}

/// A failure of the external renderer.
///
/// Recoverable at the process level: the operator can inspect the markup and
/// the tool's output and retry. Never auto-retried and never swallowed.
#[derive(Debug, Clone)]
pub struct RenderError {
    /// The renderer invocation that failed.
    pub program: EcoString,
    /// The markup document that was fed to the renderer.
    pub markup: EcoString,
    /// The renderer's collected diagnostic output, verbatim.
    pub diagnostics: EcoString,
}

impl std::error::Error for RenderError {}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "`{}` failed to render the diagram", self.program)
    }
}
