//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`OutputSize`].

use std::fmt;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the parameters every time-series function accepts.
pub trait Query {
    /// The provider `function` parameter, e.g. `TIME_SERIES_DAILY`.
    fn function(&self) -> &'static str;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the output size (compact or full history).
    fn with_output_size(mut self, output_size: OutputSize) -> Self
    where
        Self: Sized,
    {
        self.get_common().output_size = output_size;
        self
    }
}

/// How much history the provider should return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// The latest ~100 data points. This is the default.
    #[default]
    Compact,
    /// The full available history.
    Full,
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Compact => write!(f, "compact"),
            OutputSize::Full => write!(f, "full"),
        }
    }
}

/// Fields shared by all query types.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryCommon {
    /// Requested history length. Defaults to compact.
    pub output_size: OutputSize,
}

impl QueryCommon {
    /// Appends the common parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("outputsize", &self.output_size.to_string());
        url
    }
}
