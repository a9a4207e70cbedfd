use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::convert::{convert, ConversionError, Conversions, Input, Shape};
use crate::parser::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Where a flag's value lives.
pub(crate) enum Storage<'a, V> {
    /// A destination owned by the caller.
    Bound(Rc<RefCell<&'a mut V>>),
    /// Storage allocated for the flag, reachable through the flag set.
    Owned(Rc<RefCell<V>>),
}

impl<'a, V: Clone> Storage<'a, V> {
    fn read(&self) -> V {
        match self {
            Storage::Bound(variable) => (**variable.borrow()).clone(),
            Storage::Owned(variable) => variable.borrow().clone(),
        }
    }

    fn write(&self, value: V) {
        match self {
            Storage::Bound(variable) => **variable.borrow_mut() = value,
            Storage::Owned(variable) => *variable.borrow_mut() = value,
        }
    }
}

/// Drives a flag's storage from the strings of the [`FlagSet`](crate::FlagSet).
///
/// The first textual set on a slice clears whatever the storage was initialized with, so that command line occurrences replace (rather than extend) the default.
/// Later sets append.
pub struct GenericValue<'a, S: Shape> {
    storage: Storage<'a, S::Value>,
    touched: bool,
    conversions: Rc<Conversions>,
}

impl<'a, S: Shape> GenericValue<'a, S> {
    pub(crate) fn new(storage: Storage<'a, S::Value>, conversions: Rc<Conversions>) -> Self {
        Self {
            storage,
            touched: false,
            conversions,
        }
    }

    /// Set the value from a command line string.
    ///
    /// On failure a scalar keeps its prior value, while a slice may already have been cleared.
    pub fn set(&mut self, input: &str) -> Result<(), ConversionError> {
        if S::is_slice() && !self.touched {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Clearing the initial {} value on first touch.", S::kind());
            }

            self.storage.write(S::zero());
            self.touched = true;
        }

        let current = self.storage.read();
        let next = convert::<S>(&current, Input::Text(input), &self.conversions)?;
        self.storage.write(next);
        Ok(())
    }

    /// Replace the value wholesale.
    pub fn assign(&mut self, value: S::Value) -> Result<(), ConversionError> {
        let current = self.storage.read();
        let next = convert::<S>(&current, Input::Value(value), &self.conversions)?;
        self.storage.write(next);
        Ok(())
    }

    /// The current value.
    pub fn get(&self) -> S::Value {
        self.storage.read()
    }

    /// Whether a textual set has happened.
    pub fn touched(&self) -> bool {
        self.touched
    }
}

impl<'a, S: Shape> std::fmt::Display for GenericValue<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", S::stringify(&self.storage.read()))
    }
}

impl<'a, S: Shape> Value for GenericValue<'a, S> {
    fn set(&mut self, input: &str) -> Result<(), ConversionError> {
        GenericValue::set(self, input)
    }

    fn get(&self) -> Box<dyn Any> {
        Box::new(self.storage.read())
    }

    fn is_switch(&self) -> bool {
        S::is_switch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Single, Slice};
    use rstest::rstest;

    fn bound<'a, S: Shape>(variable: &'a mut S::Value) -> GenericValue<'a, S> {
        GenericValue::new(
            Storage::Bound(Rc::new(RefCell::new(variable))),
            Rc::new(Conversions::default()),
        )
    }

    #[test]
    fn scalar_overwrites() {
        // Setup
        let mut variable: isize = 3;

        // Execute
        {
            let mut value = bound::<Single<isize>>(&mut variable);
            value.set("7").unwrap();
            value.set("8").unwrap();
            assert!(!value.touched());
        }

        // Verify
        assert_eq!(variable, 8);
    }

    #[rstest]
    #[case(vec![], vec![9, 2])]
    #[case(vec!["10"], vec![10])]
    #[case(vec!["10", "20"], vec![10, 20])]
    fn slice_clears_on_first_touch(#[case] inputs: Vec<&str>, #[case] expected: Vec<i64>) {
        // Setup
        let mut variable: Vec<i64> = vec![9, 2];

        // Execute
        {
            let mut value = bound::<Slice<i64>>(&mut variable);

            for input in &inputs {
                value.set(input).unwrap();
            }
        }

        // Verify
        assert_eq!(variable, expected);
    }

    #[test]
    fn scalar_failure_keeps_value() {
        // Setup
        let mut variable: i64 = 5;

        // Execute
        {
            let mut value = bound::<Single<i64>>(&mut variable);
            let result = value.set("foobar");
            assert_matches!(result, Err(ConversionError::Invalid { .. }));
        }

        // Verify
        assert_eq!(variable, 5);
    }

    #[test]
    fn slice_failure_after_clear() {
        let mut variable: Vec<i64> = vec![9, 2];

        {
            let mut value = bound::<Slice<i64>>(&mut variable);
            assert_matches!(value.set("foobar"), Err(_));
            assert!(value.touched());
        }

        assert_eq!(variable, Vec::<i64>::new());
    }

    #[test]
    fn assign_replaces() {
        // Setup
        let mut value: GenericValue<Slice<String>> = GenericValue::new(
            Storage::Owned(Rc::new(RefCell::new(vec!["a".to_string()]))),
            Rc::new(Conversions::default()),
        );

        // Execute
        value.assign(vec!["b".to_string(), "c".to_string()]).unwrap();

        // Verify
        assert_eq!(value.get(), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(value.to_string(), "b,c");
        assert!(!value.touched());
    }

    #[test]
    fn get_boxes_current() {
        let value: GenericValue<Single<bool>> = GenericValue::new(
            Storage::Owned(Rc::new(RefCell::new(true))),
            Rc::new(Conversions::default()),
        );
        let boxed = Value::get(&value);
        assert_eq!(boxed.downcast_ref::<bool>(), Some(&true));
        assert!(Value::is_switch(&value));
    }
}
