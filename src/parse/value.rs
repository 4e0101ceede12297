use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{RuntimeError, Token};

/// A heterogeneous value-stack item: either a scanned token or a user-domain value produced by a
/// semantic action.
///
/// `User` carries the value's type name alongside its type-erased handle, purely so diagnostics
/// (e.g. [`RuntimeError::SemanticMappingError`]) can name the concrete type without the caller
/// having to supply it separately.
pub enum Value {
    /// A token consumed directly from the input, as pushed by a `T` parse item.
    Token(Token),
    /// A value synthesized by a semantic action.
    User {
        /// The type-erased value.
        value: Box<dyn Any>,
        /// The value's concrete type name, for diagnostics.
        type_name: &'static str,
    },
}

impl Value {
    /// Wraps a token as a value-stack item.
    pub fn token(token: Token) -> Self {
        Value::Token(token)
    }

    /// Wraps a user-domain value as a value-stack item, capturing its type name.
    pub fn user<T: Any>(value: T) -> Self {
        Value::User {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// True iff this value is a token (as opposed to a user-synthesized value).
    pub fn is_token(&self) -> bool {
        matches!(self, Value::Token(_))
    }

    /// Borrows the underlying token, if this value is one.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            Value::User { .. } => None,
        }
    }

    /// The concrete type name of this value, for diagnostics: `"Token"` for tokens, the
    /// `std::any::type_name` captured at construction for user values.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Token(_) => "Token",
            Value::User { type_name, .. } => type_name,
        }
    }

    fn into_any(self) -> (Box<dyn Any>, &'static str) {
        match self {
            Value::Token(token) => (Box::new(token) as Box<dyn Any>, "Token"),
            Value::User { value, type_name } => (value, type_name),
        }
    }
}

/// A pluggable fallback used by [`convert_to`] when a value's concrete type does not already
/// match the requested target type.
///
/// Installed for the duration of one parse via [`ConverterGuard::acquire`], by a `UserActions`
/// implementation that advertises the `ProvidesConverter` capability.
pub trait Converter {
    /// Attempts to convert `value` into the type named `target_type_name`, returning the
    /// converted value type-erased if successful.
    fn try_convert(&self, value: &dyn Any, target_type_name: &str) -> Option<Box<dyn Any>>;
}

thread_local! {
    static ACTIVE_CONVERTER: RefCell<Option<Rc<dyn Converter>>> = const { RefCell::new(None) };
}

/// Scoped handle installing a [`Converter`] into the current thread's active-converter slot.
///
/// The previous slot value is restored when the guard is dropped, on every exit path — including
/// a panic unwinding through the parse — satisfying the "restored on all exit paths" contract.
#[must_use]
pub struct ConverterGuard {
    previous: Option<Rc<dyn Converter>>,
}

impl ConverterGuard {
    /// Installs `converter` into the active-converter slot, returning a guard that restores the
    /// previous value when dropped.
    pub fn acquire(converter: Rc<dyn Converter>) -> Self {
        let previous = ACTIVE_CONVERTER.with(|slot| slot.borrow_mut().replace(converter));
        ConverterGuard { previous }
    }
}

impl Drop for ConverterGuard {
    fn drop(&mut self) {
        ACTIVE_CONVERTER.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

/// Converts `value` into `T`: first by direct type match, then by delegating to the active
/// converter (if any), then failing with [`RuntimeError::ValueConversionError`].
pub fn convert_to<T: Any>(value: Value) -> crate::Result<T> {
    let (boxed, source_type) = value.into_any();
    let boxed = match boxed.downcast::<T>() {
        Ok(exact) => return Ok(*exact),
        Err(boxed) => boxed,
    };

    let target_type = std::any::type_name::<T>();
    let converted = ACTIVE_CONVERTER.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|converter| converter.try_convert(boxed.as_ref(), target_type))
    });

    match converted {
        Some(result) => result.downcast::<T>().map(|b| *b).map_err(|_| {
            RuntimeError::ValueConversionError {
                source_type,
                target_type,
            }
        }),
        None => Err(RuntimeError::ValueConversionError {
            source_type,
            target_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Expr(i64);

    struct StringifyingConverter;
    impl Converter for StringifyingConverter {
        fn try_convert(&self, value: &dyn Any, target_type_name: &str) -> Option<Box<dyn Any>> {
            if target_type_name == std::any::type_name::<String>() {
                if let Some(expr) = value.downcast_ref::<Expr>() {
                    return Some(Box::new(format!("Expr({})", expr.0)));
                }
            }
            None
        }
    }

    #[test]
    fn direct_type_match_does_not_need_converter() {
        let value = Value::user(Expr(42));
        let result: Expr = convert_to(value).unwrap();
        assert_eq!(result, Expr(42));
    }

    #[test]
    fn falls_back_to_active_converter() {
        let _guard = ConverterGuard::acquire(Rc::new(StringifyingConverter));
        let value = Value::user(Expr(7));
        let result: String = convert_to(value).unwrap();
        assert_eq!(result, "Expr(7)");
    }

    #[test]
    fn fails_without_matching_converter() {
        let value = Value::user(Expr(1));
        let result = convert_to::<String>(value);
        assert!(matches!(
            result,
            Err(RuntimeError::ValueConversionError { .. })
        ));
    }

    /// Converter-slot round trip: the slot is restored exactly, even across a panic unwind
    /// through the guarded scope.
    #[test]
    fn slot_restored_after_panic() {
        struct NoOpConverter;
        impl Converter for NoOpConverter {
            fn try_convert(&self, _value: &dyn Any, _target_type_name: &str) -> Option<Box<dyn Any>> {
                None
            }
        }

        let outer: Rc<dyn Converter> = Rc::new(NoOpConverter);
        let _outer_guard = ConverterGuard::acquire(outer);

        let result = std::panic::catch_unwind(|| {
            let inner: Rc<dyn Converter> = Rc::new(StringifyingConverter);
            let _inner_guard = ConverterGuard::acquire(inner);
            panic!("boom");
        });
        assert!(result.is_err());

        // After the panic unwound through `_inner_guard`'s drop, the active converter must be
        // back to `outer`, not left pointing at the inner (dropped) converter or empty.
        let converted = ACTIVE_CONVERTER.with(|slot| {
            slot.borrow()
                .as_ref()
                .and_then(|c| c.try_convert(&Expr(1), std::any::type_name::<String>()))
        });
        assert!(converted.is_none());
    }
}
