//! Diagnostic rendering of character codes.

/// Character rendering of `code`, or a placeholder when it is not a valid
/// Unicode scalar (negative codes, surrogates).
#[must_use]
pub fn render_char(code: i32) -> String {
    match u32::try_from(code).ok().and_then(char::from_u32) {
        Some(ch) => format!("{ch:?}"),
        None => format!("<invalid chr({code})>"),
    }
}

/// Signed hexadecimal rendering: `0x35`, `-0xa`.
#[must_use]
pub fn render_hex(code: i32) -> String {
    if code < 0 {
        format!("-{:#x}", code.unsigned_abs())
    } else {
        format!("{code:#x}")
    }
}

/// Decimal, character and hex rendering of a failing input.
#[must_use]
pub fn describe_code(code: i32) -> String {
    format!("{code} ({}), hex: {}", render_char(code), render_hex(code))
}
