//! Value formatting
//!
//! Turns leaf values into the text shown after `" = "`. Formatting is raw
//! (pretty printers are not consulted) and always includes the address
//! context a pointer carries, optionally honouring an output format letter.

use super::{DisplayHint, DisplayText};
use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::{Contents, Type, TypeKind, Value};
use std::fmt::Write;

/// Format letters accepted after `/` in a display expression
pub const FORMAT_LETTERS: &str = "xduotacfszi";

/// Formatting flags for one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub format: Option<char>,
    /// Prefix pointers with their address even when a string follows
    pub address: bool,
}

impl FormatOptions {
    pub fn raw(format: Option<char>) -> Self {
        FormatOptions {
            format,
            address: true,
        }
    }
}

/// Format a leaf value
pub fn format_value(
    value: &Value,
    host: &dyn Host,
    options: FormatOptions,
) -> Result<String, InspectError> {
    let ty = value.ty.strip_typedefs();
    match (&ty.kind, &value.contents) {
        (_, Contents::Unavailable) => Ok("<optimized out>".to_string()),
        (_, Contents::Reference(target)) => format_value(target, host, options),
        (TypeKind::Enum(enumerators), Contents::Int(n)) => match options.format {
            Some(f) => format_integer(*n, 4, true, f),
            None => Ok(enumerators
                .iter()
                .find(|(_, v)| v == n)
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| n.to_string())),
        },
        (_, Contents::Char(c)) => match options.format {
            None | Some('c') => Ok(format!("{} {}", c, quote_char(*c))),
            Some(f) => format_integer(*c as i64, 1, true, f),
        },
        (_, Contents::Bool(b)) => match options.format {
            None => Ok(b.to_string()),
            Some(f) => format_integer(*b as i64, 1, false, f),
        },
        (TypeKind::Int { signed, size }, Contents::Int(n)) => match options.format {
            None => Ok(n.to_string()),
            Some(f) => format_integer(*n, *size, *signed, f),
        },
        (_, Contents::Int(n)) => match options.format {
            None => Ok(n.to_string()),
            Some(f) => format_integer(*n, 8, true, f),
        },
        (_, Contents::UInt(n)) => match options.format {
            None => Ok(n.to_string()),
            Some(f) => format_integer(*n as i64, 8, false, f),
        },
        (_, Contents::Float(x)) => Ok(format_float(*x)),
        (_, Contents::Complex(re, im)) => {
            Ok(format!("{} + {}i", format_float(*re), format_float(*im)))
        }
        (TypeKind::Pointer(target), Contents::Pointer(address)) => {
            format_pointer(*address, target, host, options)
        }
        (_, Contents::Pointer(address)) => Ok(format!("{:#x}", address)),
        (_, Contents::Function(address)) => {
            let mut out = format!("{{{}}} {:#x}", value.ty, address);
            if let Some(symbol) = host.symbol_at(*address) {
                let _ = write!(out, " <{}>", symbol);
            }
            Ok(out)
        }
        (TypeKind::Array { element, .. }, Contents::Array(elements))
            if element.is_char_like() =>
        {
            Ok(quote_c_string(&chars_until_nul(elements)))
        }
        (_, Contents::Array(_)) | (_, Contents::Struct(_)) => Ok("{...}".to_string()),
    }
}

fn format_pointer(
    address: u64,
    target: &Type,
    host: &dyn Host,
    options: FormatOptions,
) -> Result<String, InspectError> {
    let target_kind = &target.strip_typedefs().kind;
    if target.is_char_like() && options.format.is_none() {
        if address == 0 {
            return Ok("0x0".to_string());
        }
        let text = match host.read_string(address) {
            Ok(s) => quote_c_string(&s),
            Err(e) => format!("<error: {}>", e),
        };
        return Ok(if options.address {
            format!("{:#x} {}", address, text)
        } else {
            text
        });
    }
    if let Some(f) = options.format {
        if f != 'a' && f != 's' {
            return format_integer(address as i64, host.pointer_size(), false, f);
        }
    }
    let mut out = format!("{:#x}", address);
    if matches!(target_kind, TypeKind::Function) || options.format == Some('a') {
        if let Some(symbol) = host.symbol_at(address) {
            let _ = write!(out, " <{}>", symbol);
        }
    }
    Ok(out)
}

/// Integer under an explicit format letter
pub fn format_integer(
    n: i64,
    size: usize,
    signed: bool,
    format: char,
) -> Result<String, InspectError> {
    let bits = (size.clamp(1, 8) * 8) as u32;
    let unsigned = if bits == 64 {
        n as u64
    } else {
        (n as u64) & ((1u64 << bits) - 1)
    };
    Ok(match format {
        'x' | 'a' | 's' => format!("{:#x}", unsigned),
        'z' => format!("0x{:0width$x}", unsigned, width = size.clamp(1, 8) * 2),
        'o' if unsigned == 0 => "0".to_string(),
        'o' => format!("0{:o}", unsigned),
        't' => format!("{:b}", unsigned),
        'u' => unsigned.to_string(),
        'd' if signed || bits == 64 => n.to_string(),
        'd' => {
            // reinterpret as signed at this width
            let shift = 64 - bits;
            (((unsigned << shift) as i64) >> shift).to_string()
        }
        'c' => {
            let code = (unsigned & 0xff) as u32;
            format!("{} {}", code, quote_char(code))
        }
        'f' => n.to_string(),
        other => return Err(InspectError::BadFormat(other)),
    })
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan(0x8000000000000)".to_string()
    } else if x.is_infinite() {
        let sign = if x > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else {
        x.to_string()
    }
}

fn chars_until_nul(elements: &[Value]) -> String {
    elements
        .iter()
        .map_while(|e| match e.contents {
            Contents::Char(0) => None,
            Contents::Char(c) => Some(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER)),
            _ => None,
        })
        .collect()
}

fn escape_char(c: char, quote: char, out: &mut String) {
    match c {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if (c as u32) < 0x20 || c as u32 == 0x7f => {
            let _ = write!(out, "\\{:03o}", c as u32);
        }
        c => out.push(c),
    }
}

/// `'A'`, `'\n'`, `'\000'`
pub fn quote_char(code: u32) -> String {
    let mut out = String::from("'");
    match char::from_u32(code) {
        Some(c) => escape_char(c, '\'', &mut out),
        None => {
            let _ = write!(out, "\\{:o}", code);
        }
    }
    out.push('\'');
    out
}

/// Double-quoted C string literal
pub fn quote_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        escape_char(c, '"', &mut out);
    }
    out.push('"');
    out
}

/// Octal-escape bytes that would corrupt a terminal line
pub fn octal_escape(s: &str) -> String {
    escape_where(s, |c| (c as u32) >= 128 || c == '\x1b')
}

/// Octal-escape non-ASCII only, keeping embedded styling intact
pub fn escape_non_ascii(s: &str) -> String {
    escape_where(s, |c| (c as u32) >= 128)
}

fn escape_where(s: &str, escape: impl Fn(char) -> bool) -> String {
    if !s.chars().any(&escape) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if escape(c) {
            let _ = write!(out, "\\{:03o}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

/// Text of a custom inspector's `to_display_string`, honouring its hint
pub fn value_string(
    text: &DisplayText,
    hint: Option<DisplayHint>,
    host: &dyn Host,
) -> Result<String, InspectError> {
    match (text, hint) {
        (DisplayText::Text(s), Some(DisplayHint::String)) => Ok(quote_c_string(s)),
        (DisplayText::Text(s), _) => Ok(s.clone()),
        (DisplayText::Value(v), _) => format_value(
            v,
            host,
            FormatOptions {
                format: None,
                address: false,
            },
        ),
    }
}

/// Split `/rx`-style flags into (raw, format letter); the last letter wins
pub fn parse_format_flags(flags: &str) -> (bool, Option<char>) {
    let raw = flags.contains('r');
    let format = flags.chars().filter(|c| FORMAT_LETTERS.contains(*c)).last();
    (raw, format)
}
