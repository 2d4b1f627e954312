//! Display icons for severities.

use crate::protocol::Severity;

/// Signature of a severity→icon lookup.
///
/// Loggers take one of these as a plain function pointer; the default is
/// [`icon_for`].
pub type IconLookup = fn(Severity) -> Option<&'static str>;

/// The built-in severity→icon mapping.
pub fn icon_for(severity: Severity) -> Option<&'static str> {
    match severity {
        Severity::Debug => Some("🔍"),
        Severity::Log => Some("📝"),
        Severity::Info => Some("ℹ️"),
        Severity::Warn => Some("⚠️"),
        Severity::Error => Some("🔴"),
    }
}
