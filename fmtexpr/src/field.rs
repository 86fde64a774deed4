//! Primitive field types.
//!
//! A field type is the schema-level shape a descriptor interprets payloads with. Integer
//! fields have a fixed width and serialize to big-endian bytes.
use strum::{EnumIs, EnumIter, IntoEnumIterator};

use crate::{
    entity::Payload,
    error::{Error, Result},
};

/// Width of a fixed-width integer field.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum IntegerWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntegerWidth {
    /// Number of bytes occupied by the field.
    pub fn bytes(&self) -> usize {
        match self {
            IntegerWidth::W8 => 1,
            IntegerWidth::W16 => 2,
            IntegerWidth::W32 => 4,
            IntegerWidth::W64 => 8,
        }
    }

    /// Number of bits occupied by the field.
    pub fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }
}

/// Signedness of an integer field.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIs, EnumIter)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Fixed-width integer field, e.g. `i32` or `u8`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct IntegerField {
    pub width: IntegerWidth,
    pub signedness: Signedness,
}

impl IntegerField {
    pub const I8: IntegerField = IntegerField::signed(IntegerWidth::W8);
    pub const I16: IntegerField = IntegerField::signed(IntegerWidth::W16);
    pub const I32: IntegerField = IntegerField::signed(IntegerWidth::W32);
    pub const I64: IntegerField = IntegerField::signed(IntegerWidth::W64);
    pub const U8: IntegerField = IntegerField::unsigned(IntegerWidth::W8);
    pub const U16: IntegerField = IntegerField::unsigned(IntegerWidth::W16);
    pub const U32: IntegerField = IntegerField::unsigned(IntegerWidth::W32);
    pub const U64: IntegerField = IntegerField::unsigned(IntegerWidth::W64);

    pub const fn signed(width: IntegerWidth) -> Self {
        Self {
            width,
            signedness: Signedness::Signed,
        }
    }

    pub const fn unsigned(width: IntegerWidth) -> Self {
        Self {
            width,
            signedness: Signedness::Unsigned,
        }
    }

    /// Iterate over every supported integer field.
    pub fn iter() -> impl Iterator<Item = IntegerField> {
        Signedness::iter().flat_map(|signedness| {
            IntegerWidth::iter().map(move |width| IntegerField { width, signedness })
        })
    }

    /// Creates an [`IntegerField`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::iter().find(|field| field.to_str() == s)
    }

    /// Returns the string representation of the [`IntegerField`].
    pub fn to_str(&self) -> &'static str {
        match (self.signedness, self.width) {
            (Signedness::Signed, IntegerWidth::W8) => "i8",
            (Signedness::Signed, IntegerWidth::W16) => "i16",
            (Signedness::Signed, IntegerWidth::W32) => "i32",
            (Signedness::Signed, IntegerWidth::W64) => "i64",
            (Signedness::Unsigned, IntegerWidth::W8) => "u8",
            (Signedness::Unsigned, IntegerWidth::W16) => "u16",
            (Signedness::Unsigned, IntegerWidth::W32) => "u32",
            (Signedness::Unsigned, IntegerWidth::W64) => "u64",
        }
    }

    /// Size in bytes of the serialized field.
    #[inline]
    pub fn size(&self) -> usize {
        self.width.bytes()
    }

    /// Smallest representable value.
    pub fn min(&self) -> i128 {
        match self.signedness {
            Signedness::Signed => -(1i128 << (self.width.bits() - 1)),
            Signedness::Unsigned => 0,
        }
    }

    /// Largest representable value.
    pub fn max(&self) -> i128 {
        match self.signedness {
            Signedness::Signed => (1i128 << (self.width.bits() - 1)) - 1,
            Signedness::Unsigned => (1i128 << self.width.bits()) - 1,
        }
    }

    /// Returns true if `value` is representable by this field.
    pub fn fits(&self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    /// Write `value` big-endian into the first [`Self::size`] bytes of `out`.
    ///
    /// Negative values of signed fields are written in two's complement. Returns the number
    /// of bytes written.
    ///
    /// ```
    /// use fmtexpr::field::IntegerField;
    ///
    /// let mut buf = [0u8; 4];
    /// assert_eq!(IntegerField::I32.serialize(0x0102_0304, &mut buf), Ok(4));
    /// assert_eq!(buf, [1, 2, 3, 4]);
    /// ```
    pub fn serialize(&self, value: i128, out: &mut [u8]) -> Result<usize> {
        if !self.fits(value) {
            return Err(Error::IntegerOutOfRange {
                value,
                field: *self,
            });
        }

        let size = self.size();
        if out.len() < size {
            return Err(Error::BufferTooSmall {
                required: size,
                available: out.len(),
            });
        }

        for (i, byte) in out[..size].iter_mut().enumerate() {
            *byte = (value >> ((size - 1 - i) * 8)) as u8;
        }
        Ok(size)
    }
}

impl std::fmt::Display for IntegerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Shape of a primitive field.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIs)]
pub enum FieldType {
    /// Fixed-width integer.
    Integer(IntegerField),
    /// Boolean flag.
    Boolean,
    /// Free-form text.
    Text,
}

impl FieldType {
    /// Returns true if `payload` can be interpreted by this field.
    pub fn accepts(&self, payload: &Payload) -> bool {
        match (self, payload) {
            (FieldType::Integer(field), Payload::Integer(value)) => field.fits(*value),
            (FieldType::Boolean, Payload::Boolean(_)) => true,
            (FieldType::Text, Payload::Text(_)) => true,
            _ => false,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            FieldType::Integer(field) => field.to_str(),
            FieldType::Boolean => "bool",
            FieldType::Text => "text",
        }
    }
}

impl From<IntegerField> for FieldType {
    fn from(value: IntegerField) -> Self {
        FieldType::Integer(value)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_is_big_endian() {
        let mut buf = [0u8; 8];
        assert_eq!(IntegerField::U16.serialize(0xabcd, &mut buf), Ok(2));
        assert_eq!(&buf[..2], &[0xab, 0xcd]);
        assert_eq!(&buf[2..], &[0; 6], "bytes past the field must be untouched");
    }

    #[test]
    fn serialize_negative_uses_twos_complement() {
        let mut buf = [0u8; 4];
        assert_eq!(IntegerField::I32.serialize(-2, &mut buf), Ok(4));
        assert_eq!(buf, [0xff, 0xff, 0xff, 0xfe]);

        let mut buf = [0u8; 1];
        assert_eq!(IntegerField::I8.serialize(i8::MIN as i128, &mut buf), Ok(1));
        assert_eq!(buf, [0x80]);
    }

    #[test]
    fn serialize_rejects_out_of_range_values() {
        let mut buf = [0u8; 8];
        assert_eq!(
            IntegerField::U8.serialize(256, &mut buf),
            Err(Error::IntegerOutOfRange {
                value: 256,
                field: IntegerField::U8
            })
        );
        assert!(IntegerField::U32.serialize(-1, &mut buf).is_err());
        assert_eq!(
            IntegerField::U64.serialize(u64::MAX as i128, &mut buf),
            Ok(8)
        );
        assert_eq!(buf, [0xff; 8]);
    }

    #[test]
    fn serialize_rejects_short_buffers() {
        let mut buf = [0u8; 2];
        assert_eq!(
            IntegerField::I64.serialize(1, &mut buf),
            Err(Error::BufferTooSmall {
                required: 8,
                available: 2
            })
        );
    }

    #[test]
    fn string_representation_roundtrips() {
        for field in IntegerField::iter() {
            assert_eq!(IntegerField::from_str(field.to_str()), Some(field));
        }
        assert_eq!(IntegerField::from_str("i128"), None);
    }

    #[test]
    fn bounds_match_native_types() {
        assert_eq!(IntegerField::I16.min(), i16::MIN as i128);
        assert_eq!(IntegerField::I16.max(), i16::MAX as i128);
        assert_eq!(IntegerField::U32.max(), u32::MAX as i128);
        assert_eq!(IntegerField::I64.min(), i64::MIN as i128);
    }
}
