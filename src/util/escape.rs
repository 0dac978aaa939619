/*!
Helpers for printing untrusted bytes in error messages.

Date strings and patterns come from callers, so the bytes quoted back at
them in errors can't be assumed to be printable or even valid UTF-8.
*/

/// A wrapper that provides a human readable `Debug` impl for one byte.
///
/// Printable ASCII is written as is and everything else as an escape
/// sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let byte = self.0;
        if byte == b' ' || byte.is_ascii_graphic() {
            return write!(f, "{}", char::from(byte));
        }
        match byte {
            b'\n' => write!(f, "\\n"),
            b'\r' => write!(f, "\\r"),
            b'\t' => write!(f, "\\t"),
            _ => write!(f, "\\x{byte:02X}"),
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Like [`Byte`], but for a slice of bytes.
///
/// Maximal valid UTF-8 chunks are written as text, with control
/// characters escaped. Bytes that are not part of any valid encoding are
/// written as hex escapes.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        loop {
            match core::str::from_utf8(bytes) {
                Ok(valid) => return write_escaped(valid, f),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // SAFETY: `valid_up_to` bytes have just been validated.
                    let valid =
                        unsafe { core::str::from_utf8_unchecked(valid) };
                    write_escaped(valid, f)?;
                    // `error_len` is `None` when the input ends with a
                    // truncated encoding, in which case everything left is
                    // invalid.
                    let invalid_len = err.error_len().unwrap_or(rest.len());
                    for &byte in &rest[..invalid_len] {
                        write!(f, "\\x{byte:02X}")?;
                    }
                    bytes = &rest[invalid_len..];
                }
            }
        }
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")
    }
}

fn write_escaped(
    string: &str,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    for ch in string.chars() {
        if ch == ' ' || !ch.is_control() {
            write!(f, "{ch}")?;
        } else {
            write!(f, "{}", ch.escape_debug())?;
        }
    }
    Ok(())
}
