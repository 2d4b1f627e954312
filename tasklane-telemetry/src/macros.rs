//! The [`properties!`][crate::properties!] construction macro.

/// Builds a [`Properties`][crate::Properties] bag from `key = value` pairs.
///
/// Keys are bare identifiers or string literals; values are anything
/// convertible into a [`PropertyValue`][crate::PropertyValue], including
/// another `properties!` invocation for nesting.
///
/// # Examples
///
/// ```rust
/// use tasklane_telemetry::properties;
///
/// let bag = properties! {
///     attempt = 2,
///     "queue.name" = "default",
///     retry = true,
///     context = properties! { region = "eu-1" },
/// };
/// assert_eq!(bag.len(), 4);
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::Properties::new()
    };
    ($($key:tt = $value:expr),+ $(,)?) => {{
        let mut properties = $crate::Properties::new();
        $(
            properties.insert($crate::__property_key!($key), $value);
        )+
        properties
    }};
}

/// Resolves a `properties!` key token to a string.
#[doc(hidden)]
#[macro_export]
macro_rules! __property_key {
    ($key:ident) => {
        ::core::stringify!($key)
    };
    ($key:literal) => {
        $key
    };
}
