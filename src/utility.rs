use core::{any::Any, fmt};
use std::borrow::Cow;

/// Downcasts a panic payload to a human-readable message where possible.
pub(crate) fn cast(
    error: Box<dyn Any + Send + 'static>,
) -> Result<Cow<'static, str>, Box<dyn Any + Send + 'static>> {
    let error = match error.downcast::<&'static str>() {
        Ok(error) => return Ok(Cow::Borrowed(*error)),
        Err(error) => error,
    };
    let error = match error.downcast::<String>() {
        Ok(error) => return Ok(Cow::Owned(*error)),
        Err(error) => error,
    };
    let error = match error.downcast::<Box<str>>() {
        Ok(error) => return Ok(Cow::Owned(error.to_string())),
        Err(error) => error,
    };
    match error.downcast::<Cow<'static, str>>() {
        Ok(error) => Ok(*error),
        Err(error) => Err(error),
    }
}

/// Canonical textual rendering used as a dedup key for composite values.
pub(crate) fn canon<T: fmt::Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

pub(crate) mod f32 {
    const SIGN_MASK: u32 = 0x8000_0000;
    const TINY_BITS: u32 = 0x1;
    const NEG_TINY_BITS: u32 = TINY_BITS | SIGN_MASK;

    /// Copied from '<https://doc.rust-lang.org/src/core/num/f32.rs.html>' to continue supporting lower rust versions.
    #[inline]
    pub const fn next_up(value: f32) -> f32 {
        let bits = value.to_bits();
        if value.is_nan() || bits == f32::INFINITY.to_bits() {
            return value;
        }

        let abs = bits & !SIGN_MASK;
        let next_bits = if abs == 0 {
            TINY_BITS
        } else if bits == abs {
            bits + 1
        } else {
            bits - 1
        };

        f32::from_bits(next_bits)
    }

    /// Copied from '<https://doc.rust-lang.org/src/core/num/f32.rs.html>' to continue supporting lower rust versions.
    #[inline]
    pub const fn next_down(value: f32) -> f32 {
        let bits = value.to_bits();
        if value.is_nan() || bits == f32::NEG_INFINITY.to_bits() {
            return value;
        }

        let abs = bits & !SIGN_MASK;
        let next_bits = if abs == 0 {
            NEG_TINY_BITS
        } else if bits == abs {
            bits - 1
        } else {
            bits + 1
        };

        f32::from_bits(next_bits)
    }
}

pub(crate) mod f64 {
    const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    const TINY_BITS: u64 = 0x1;
    const NEG_TINY_BITS: u64 = TINY_BITS | SIGN_MASK;

    /// Copied from '<https://doc.rust-lang.org/src/core/num/f64.rs.html>' to continue supporting lower rust versions.
    #[inline]
    pub const fn next_up(value: f64) -> f64 {
        let bits = value.to_bits();
        if value.is_nan() || bits == f64::INFINITY.to_bits() {
            return value;
        }

        let abs = bits & !SIGN_MASK;
        let next_bits = if abs == 0 {
            TINY_BITS
        } else if bits == abs {
            bits + 1
        } else {
            bits - 1
        };

        f64::from_bits(next_bits)
    }

    /// Copied from '<https://doc.rust-lang.org/src/core/num/f64.rs.html>' to continue supporting lower rust versions.
    #[inline]
    pub const fn next_down(value: f64) -> f64 {
        let bits = value.to_bits();
        if value.is_nan() || bits == f64::NEG_INFINITY.to_bits() {
            return value;
        }

        let abs = bits & !SIGN_MASK;
        let next_bits = if abs == 0 {
            NEG_TINY_BITS
        } else if bits == abs {
            bits - 1
        } else {
            bits + 1
        };

        f64::from_bits(next_bits)
    }
}
