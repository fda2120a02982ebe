//! ABI layer for `<ctype.h>` character classification and conversion.
//!
//! Pure compute, no pointers. Each function narrows the input to a byte and
//! delegates to `minilibc_core::ctype`. Inputs outside `0..=255` classify as
//! false and convert to themselves.

use std::ffi::c_int;

use minilibc_core::ctype::{CaseMap, CharClass};

#[inline]
fn classify(c: c_int, class: CharClass) -> c_int {
    c_int::from(class.matches(c))
}

#[inline]
fn convert(c: c_int, map: CaseMap) -> c_int {
    map.apply(c)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isalnum(c: c_int) -> c_int {
    classify(c, CharClass::Alnum)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isalpha(c: c_int) -> c_int {
    classify(c, CharClass::Alpha)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isblank(c: c_int) -> c_int {
    classify(c, CharClass::Blank)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn iscntrl(c: c_int) -> c_int {
    classify(c, CharClass::Cntrl)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isdigit(c: c_int) -> c_int {
    classify(c, CharClass::Digit)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isgraph(c: c_int) -> c_int {
    classify(c, CharClass::Graph)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn islower(c: c_int) -> c_int {
    classify(c, CharClass::Lower)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isprint(c: c_int) -> c_int {
    classify(c, CharClass::Print)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn ispunct(c: c_int) -> c_int {
    classify(c, CharClass::Punct)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isspace(c: c_int) -> c_int {
    classify(c, CharClass::Space)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isupper(c: c_int) -> c_int {
    classify(c, CharClass::Upper)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn isxdigit(c: c_int) -> c_int {
    classify(c, CharClass::Xdigit)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn toupper(c: c_int) -> c_int {
    convert(c, CaseMap::Upper)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn tolower(c: c_int) -> c_int {
    convert(c, CaseMap::Lower)
}
