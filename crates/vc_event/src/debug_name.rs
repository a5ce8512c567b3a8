use alloc::string::{String, ToString};
use core::fmt;

const ANONYMOUS_NAME: &str = "_unknown_";

// -----------------------------------------------------------------------------
// DebugName

/// A readable name of an event type, used in logs and `Debug` output.
///
/// With the `debug` feature (or `debug_assertions`) it prints the type name
/// with module paths collapsed, e.g. `Wrapper<PlayerInput>` instead of
/// `game::events::Wrapper<game::input::PlayerInput>`. Otherwise it is a
/// zero-sized placeholder that prints `_unknown_`.
///
/// # Examples
///
/// ```
/// use vc_event::DebugName;
///
/// let name = DebugName::type_name::<Option<String>>();
/// # #[cfg(any(debug_assertions, feature = "debug"))]
/// assert_eq!(name.parse(), "Option<String>");
///
/// assert_eq!(DebugName::anonymous().parse(), "_unknown_");
/// ```
#[derive(Clone, Copy)]
pub struct DebugName {
    #[cfg(any(debug_assertions, feature = "debug"))]
    name: fn() -> &'static str,
}

impl DebugName {
    /// Creates a name that displays the type name of `T`.
    #[inline(always)]
    pub const fn type_name<T: ?Sized>() -> Self {
        Self {
            #[cfg(any(debug_assertions, feature = "debug"))]
            name: core::any::type_name::<T>,
        }
    }

    /// Creates a name that always displays `_unknown_`.
    #[inline(always)]
    pub const fn anonymous() -> Self {
        Self {
            #[cfg(any(debug_assertions, feature = "debug"))]
            name: || ANONYMOUS_NAME,
        }
    }

    /// Formats the name into a [`String`].
    #[inline]
    pub fn parse(&self) -> String {
        ToString::to_string(self)
    }
}

/// Writes `full_name` with every path segment reduced to its last component.
#[inline(never)]
#[cfg(any(debug_assertions, feature = "debug"))]
fn collapse(full_name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    const SPECIAL_CHARS: [char; 9] = [' ', '<', '>', '(', ')', '[', ']', ',', ';'];

    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }

    let mut rest = full_name;
    while let Some(index) = rest.find(|c| SPECIAL_CHARS.contains(&c)) {
        f.write_str(last_segment(&rest[..index]))?;
        f.write_str(&rest[index..=index])?;
        rest = &rest[(index + 1)..];
    }
    f.write_str(last_segment(rest))
}

impl fmt::Display for DebugName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(any(debug_assertions, feature = "debug"))]
        {
            collapse((self.name)(), f)
        }
        #[cfg(not(any(debug_assertions, feature = "debug")))]
        {
            f.write_str(ANONYMOUS_NAME)
        }
    }
}

impl fmt::Debug for DebugName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(all(test, any(debug_assertions, feature = "debug")))]
mod tests {
    use super::DebugName;

    mod inner {
        pub struct Pickup;
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn collapses_paths() {
        assert_eq!(DebugName::type_name::<inner::Pickup>().parse(), "Pickup");
        assert_eq!(
            DebugName::type_name::<inner::Wrapper<inner::Pickup>>().parse(),
            "Wrapper<Pickup>"
        );
        assert_eq!(
            DebugName::type_name::<(u8, inner::Pickup)>().parse(),
            "(u8, Pickup)"
        );
    }

    #[test]
    fn anonymous() {
        assert_eq!(DebugName::anonymous().parse(), "_unknown_");
        assert_eq!(format!("{:?}", DebugName::anonymous()), "_unknown_");
    }
}
