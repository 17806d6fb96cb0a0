//! Tagged values.

use crate::ObjectRef;

/// A scalar or a reference to a heap object.
///
/// Values are `Copy`. `Quoted` carries the same payload as `Object` but
/// marks the slot as data: the evaluator returns it instead of resolving
/// or calling it. Quoting belongs to the slot, not the object, so one
/// object can be referenced quoted in one place and plain in another.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Byte(i8),
    UByte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Char(char),
    Float(f32),
    Double(f64),
    Object(ObjectRef),
    Quoted(ObjectRef),
}

impl Value {
    /// Name of the scalar tag. Object references report `"object"`; use
    /// [`Runtime::type_name`](crate::Runtime::type_name) for their variant.
    pub fn tag_name(self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Byte(_) => "i8",
            Value::UByte(_) => "u8",
            Value::Short(_) => "i16",
            Value::UShort(_) => "u16",
            Value::Int(_) => "i32",
            Value::UInt(_) => "u32",
            Value::Long(_) => "i64",
            Value::ULong(_) => "u64",
            Value::Char(_) => "char",
            Value::Float(_) => "f32",
            Value::Double(_) => "f64",
            Value::Object(_) => "object",
            Value::Quoted(_) => "quoted object",
        }
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only `Nil` is false.
    #[inline]
    pub fn is_truthy(self) -> bool {
        !self.is_nil()
    }

    /// The referenced object, quoted or not.
    #[inline]
    pub fn object(self) -> Option<ObjectRef> {
        match self {
            Value::Object(r) | Value::Quoted(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_quoted(self) -> bool {
        matches!(self, Value::Quoted(_))
    }

    /// Retag an object reference as quoted. Scalars are returned unchanged.
    #[inline]
    #[must_use]
    pub fn quoted(self) -> Value {
        match self {
            Value::Object(r) => Value::Quoted(r),
            other => other,
        }
    }

    /// Retag a quoted reference as plain. Everything else is unchanged.
    #[inline]
    #[must_use]
    pub fn unquoted(self) -> Value {
        match self {
            Value::Quoted(r) => Value::Object(r),
            other => other,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::UByte(_)
                | Value::Short(_)
                | Value::UShort(_)
                | Value::Int(_)
                | Value::UInt(_)
                | Value::Long(_)
                | Value::ULong(_)
        )
    }

    /// Integer value widened to `i64`, if it is an integer that fits.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(v)),
            Value::UByte(v) => Some(i64::from(v)),
            Value::Short(v) => Some(i64::from(v)),
            Value::UShort(v) => Some(i64::from(v)),
            Value::Int(v) => Some(i64::from(v)),
            Value::UInt(v) => Some(i64::from(v)),
            Value::Long(v) => Some(v),
            Value::ULong(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Any numeric value as `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            Value::ULong(v) => Some(v as f64),
            other => other.as_i64().map(|v| v as f64),
        }
    }
}

impl From<ObjectRef> for Value {
    fn from(r: ObjectRef) -> Self {
        Value::Object(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_round_trip_keeps_reference() {
        let r = ObjectRef::from_raw(3);
        let v = Value::Object(r);
        assert_eq!(v.quoted(), Value::Quoted(r));
        assert_eq!(v.quoted().unquoted(), v);
        assert_eq!(v.quoted().object(), Some(r));
    }

    #[test]
    fn test_quoting_scalars_is_identity() {
        assert_eq!(Value::Int(4).quoted(), Value::Int(4));
        assert_eq!(Value::Nil.quoted(), Value::Nil);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(Value::Int(0).is_truthy());
        assert!(Value::Object(ObjectRef::from_raw(0)).is_truthy());
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Byte(-3).as_i64(), Some(-3));
        assert_eq!(Value::ULong(u64::MAX).as_i64(), None);
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::UInt(7).as_f64(), Some(7.0));
        assert_eq!(Value::Char('a').as_i64(), None);
        assert!(Value::Short(1).is_integer());
        assert!(!Value::Double(1.0).is_integer());
    }
}
