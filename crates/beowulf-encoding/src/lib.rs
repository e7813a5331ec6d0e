//! Canonical binary encoding for Beowulf transactions.
//!
//! The binary form produced here is the cryptographic signing payload: an
//! independent verifier must be able to reproduce it bit for bit, so every
//! write is deterministic. Integers are little-endian, collection lengths and
//! operation tags are unsigned varints, strings are varint-length-prefixed
//! UTF-8, and monetary amounts ("12.34500 SYM") become an i64 mantissa,
//! a precision byte, and a NUL-padded symbol.
//!
//! The encoder carries a sticky error: the first failed write poisons all
//! subsequent writes, and the error surfaces once at [`Encoder::finalize`].
//! A buffer that hit an error can never be signed by mistake.

use thiserror::Error;

/// Serialized asset symbols are padded to this many bytes.
pub const SYMBOL_WIDTH: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("malformed amount '{input}': {reason}")]
    MalformedAmount { input: String, reason: String },

    #[error("amount '{0}' overflows i64 mantissa")]
    AmountOverflow(String),

    #[error("asset symbol '{0}' exceeds {SYMBOL_WIDTH} bytes")]
    SymbolTooLong(String),

    #[error("operation code {0} has no binary layout")]
    UnknownOperation(u32),

    #[error("unsupported field: {0}")]
    Unsupported(&'static str),
}

/// Parse a monetary string of the form `"<decimal> <SYMBOL>"` into
/// `(mantissa, precision, symbol)`.
///
/// The mantissa is the integer value of all digits with the decimal point
/// removed, and the precision is the number of fractional digits, so
/// `"1.00000 W"` parses to `(100_000, 5, "W")` and `"3 W"` to `(3, 0, "W")`.
pub fn parse_amount(input: &str) -> Result<(i64, u8, String), EncodeError> {
    let malformed = |reason: &str| EncodeError::MalformedAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (value, symbol) = input
        .split_once(' ')
        .ok_or_else(|| malformed("expected '<decimal> <SYMBOL>'"))?;

    if symbol.is_empty() || symbol.len() > SYMBOL_WIDTH {
        return Err(EncodeError::SymbolTooLong(symbol.to_string()));
    }
    if !symbol.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(malformed("symbol must be ASCII alphanumeric"));
    }

    let (negative, value) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("integer part must be decimal digits"));
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("fractional part must be decimal digits"));
    }
    if frac_part.len() > u8::MAX as usize {
        return Err(malformed("fractional part too long"));
    }

    let mut mantissa: i64 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add((b - b'0') as i64))
            .ok_or_else(|| EncodeError::AmountOverflow(input.to_string()))?;
    }
    if negative {
        mantissa = -mantissa;
    }

    Ok((mantissa, frac_part.len() as u8, symbol.to_string()))
}

/// Streaming, append-only encoder with a sticky error state.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    err: Option<EncodeError>,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(256),
            err: None,
        }
    }

    /// Poison the encoder. The first recorded error wins; later ones are
    /// dropped so `finalize` reports the original cause.
    pub fn fail(&mut self, err: EncodeError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// The first error hit so far, if any.
    pub fn error(&self) -> Option<&EncodeError> {
        self.err.as_ref()
    }

    fn poisoned(&self) -> bool {
        self.err.is_some()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if !self.poisoned() {
            self.buf.extend_from_slice(bytes);
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u8(v as u8);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    /// Unsigned varint: 7 payload bits per byte, low group first, high bit
    /// set on every byte except the last.
    pub fn write_varint(&mut self, mut v: u64) {
        if self.poisoned() {
            return;
        }
        loop {
            let mut byte = (v & 0x7F) as u8;
            v >>= 7;
            if v > 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
            if v == 0 {
                break;
            }
        }
    }

    /// Varint length prefix followed by the raw UTF-8 bytes.
    pub fn write_str(&mut self, s: &str) {
        self.write_varint(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    /// Monetary amount: i64 mantissa (LE), precision byte, then the symbol
    /// NUL-padded to [`SYMBOL_WIDTH`] bytes.
    pub fn write_money(&mut self, amount: &str) {
        if self.poisoned() {
            return;
        }
        match parse_amount(amount) {
            Ok((mantissa, precision, symbol)) => {
                self.write_i64(mantissa);
                self.write_u8(precision);
                let mut padded = [0u8; SYMBOL_WIDTH];
                padded[..symbol.len()].copy_from_slice(symbol.as_bytes());
                self.write_bytes(&padded);
            }
            Err(e) => self.fail(e),
        }
    }

    /// Consume the encoder, returning the buffer or the first error hit.
    pub fn finalize(self) -> Result<Vec<u8>, EncodeError> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.buf),
        }
    }
}
