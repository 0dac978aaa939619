/*!
Datemask is a date formatting library built around one routine:
[`format`]. It takes a pattern of substitution tokens and a date, and
renders the date according to the pattern. Everything else in the crate
exists to feed that routine: a normalized date type, a date string
parser and an error type that says which argument was bad.

# Example

```
use datemask::{format, Moment};

let m = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
assert_eq!(
    format("DDD, MMMM d, YYYY h:mm a", m)?,
    "Monday, February 2, 2015 4:09 am",
);
# Ok::<(), datemask::Error>(())
```

The date argument is flexible: a [`Moment`], a Unix timestamp in
milliseconds (integer or float), a date string or nothing at all (via
[`format_now`]). Timestamps and strings are rendered in the host's
local time. The full token table is documented on [`format`].

# Crate features

* **std** (enabled by default) - Reads the system clock (for
  [`format_now`] and [`Moment::now`]) and the host's local UTC offset.
  Without it, this crate is `no_std` (`alloc` is still required) and
  local time degrades to UTC.
* **logging** - Emits trace level messages through the [`log`] crate
  when dates are parsed and formatted. Intended for debugging pattern
  or parsing surprises, not for production observability.
* **serde** - Implements `Serialize` and `Deserialize` for [`Moment`]
  using its textual form.

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Formatting produces a `String` and errors box their representation,
// so dynamic memory allocation is assumed throughout.
extern crate alloc;

pub use crate::{
    error::Error,
    fmt::format,
    moment::{Moment, Weekday},
    tz::Offset,
    value::DateValue,
};

#[cfg(feature = "std")]
pub use crate::fmt::format_now;

#[macro_use]
mod logging;
#[macro_use]
mod error;

mod fmt;
mod moment;
mod tz;
mod util;
mod value;
