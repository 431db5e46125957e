//! Reusable comparisons between reference values and constructed objects.
//!
//! Every function returns the first mismatch as an [`AssertionFailure`]
//! whose message starts with the property path given by the caller.

use crate::error::AssertionFailure;
use crate::referencing::{GenericName, IdentifiedObject, Identifier};

/// How far a number may drift from the expected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Scaled by the magnitude of the expected value.
    Relative(f64),
    /// Used as is.
    Absolute(f64),
}

impl Tolerance {
    pub fn bound(self, expected: f64) -> f64 {
        match self {
            Tolerance::Relative(factor) => (factor * expected).abs(),
            Tolerance::Absolute(delta) => delta.max(0.0),
        }
    }
}

/// Full Unicode case-insensitive equality, so that `ç` matches `Ç`.
fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Fails unless every expected value equals the tip of at least one actual
/// name, ignoring case. Extra actual names are fine.
pub fn assert_contains_all(
    message: &str,
    expected: &[String],
    actual: &[GenericName],
) -> Result<(), AssertionFailure> {
    for value in expected {
        let found = actual
            .iter()
            .any(|name| equals_ignore_case(name.tip(), value));
        if !found {
            return Err(AssertionFailure::new(format!(
                "{}: missing \"{}\" in {:?}",
                message,
                value,
                actual.iter().map(|n| n.tip()).collect::<Vec<_>>()
            )));
        }
    }
    Ok(())
}

/// Fails unless exactly one identifier in `code_space` has the numeric code
/// `expected`. An identifier of that code space with a non-numeric code is a
/// failure of its own.
pub fn assert_contains_code(
    message: &str,
    code_space: &str,
    expected: i32,
    actual: &[Identifier],
) -> Result<(), AssertionFailure> {
    let mut occurrences = 0;
    for identifier in actual {
        if !equals_ignore_case(identifier.code_space.trim(), code_space) {
            continue;
        }
        let code: i32 = identifier.code.trim().parse().map_err(|_| {
            AssertionFailure::new(format!(
                "{}.getCode(): expected {} but got a non-numerical value: \"{}\"",
                message, expected, identifier.code
            ))
        })?;
        if code == expected {
            occurrences += 1;
        }
    }
    if occurrences != 1 {
        return Err(AssertionFailure::new(format!(
            "{}: occurrence of {}:{}: expected 1 but got {}",
            message, code_space, expected, occurrences
        )));
    }
    Ok(())
}

/// Fails unless `expected` matches the primary name or one of the aliases,
/// ignoring case.
pub fn assert_contains_name_or_alias<T>(
    message: &str,
    expected: &str,
    object: &T,
) -> Result<(), AssertionFailure>
where
    T: IdentifiedObject + ?Sized,
{
    if object
        .name()
        .is_some_and(|name| equals_ignore_case(name, expected))
    {
        return Ok(());
    }
    if object
        .aliases()
        .iter()
        .any(|alias| equals_ignore_case(alias.tip(), expected))
    {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "{}: \"{}\" is neither the name nor an alias of {:?}",
        message,
        expected,
        object.name()
    )))
}

pub fn assert_equals_str(
    message: &str,
    expected: &str,
    actual: Option<&str>,
) -> Result<(), AssertionFailure> {
    match actual {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(AssertionFailure::new(format!(
            "{}: expected \"{}\" but got \"{}\"",
            message, expected, actual
        ))),
        None => Err(AssertionFailure::new(format!(
            "{}: expected \"{}\" but got nothing",
            message, expected
        ))),
    }
}

pub fn assert_equals<T>(message: &str, expected: T, actual: T) -> Result<(), AssertionFailure>
where
    T: PartialEq + std::fmt::Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "{}: expected {:?} but got {:?}",
            message, expected, actual
        )))
    }
}

/// Fails if `actual` is further than the tolerance from `expected`.
/// Two NaNs compare equal, as do two infinities of the same sign. A
/// non-finite expected value has no tolerance: only itself matches.
pub fn assert_close(
    message: &str,
    expected: f64,
    actual: f64,
    tolerance: Tolerance,
) -> Result<(), AssertionFailure> {
    if (expected.is_nan() && actual.is_nan()) || expected == actual {
        return Ok(());
    }
    if !expected.is_finite() {
        return Err(AssertionFailure::new(format!(
            "{}: expected {} but got {}",
            message, expected, actual
        )));
    }
    let bound = tolerance.bound(expected);
    if (expected - actual).abs() <= bound {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "{}: expected {} but got {} (tolerance {})",
        message, expected, actual, bound
    )))
}

pub fn assert_present<'a, T: ?Sized>(
    message: &str,
    value: Option<&'a T>,
) -> Result<&'a T, AssertionFailure> {
    value.ok_or_else(|| AssertionFailure::new(format!("{}: expected a value but got none", message)))
}
