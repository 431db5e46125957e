//! Lifecycle of one verification case.
//!
//! A case owns an immutable expected descriptor and a constructor closure
//! that asks the factory under test for the object. The first access to the
//! object under test runs the constructor; every later access returns the
//! cached [`Construction`]. Comparisons then run against that object under
//! the capability flags of the [`CaseContext`], and the whole run collapses
//! into an [`Outcome`].

use std::cell::{Cell, OnceCell};
use std::fmt;

use crate::config::{CapabilityKey, Capabilities};
use crate::error::{AssertionFailure, CaseError, CaseResult, FactoryError, SkipReason, UnsupportedCode};
use crate::referencing::{StructuralValidator, Validatable, Validator};

/// Relative tolerance, scaled by the magnitude of the expected value.
pub const TOLERANCE: f64 = 1e-10;

/// Absolute tolerance for angles in decimal degrees.
pub const ANGULAR_TOLERANCE: f64 = 1e-7;

/// What every expected descriptor exposes to the lifecycle.
pub trait Expected {
    /// Type name used in messages, e.g. `Ellipsoid`.
    fn object_type(&self) -> &'static str;
    /// Reference code the object is built from.
    fn code(&self) -> i32;
}

/// The capability flags and validator a case runs under.
#[derive(Clone, Copy)]
pub struct CaseContext<'a> {
    pub capabilities: Capabilities,
    pub validator: &'a dyn Validator,
}

impl<'a> CaseContext<'a> {
    pub fn new(capabilities: Capabilities, validator: &'a dyn Validator) -> Self {
        Self {
            capabilities,
            validator,
        }
    }

    pub fn is_enabled(&self, key: CapabilityKey) -> bool {
        self.capabilities.is_enabled(key)
    }

    /// Runs `check` only when `key` is enabled, and tags its failure with
    /// `key`. Nested checks keep the innermost key.
    pub fn check<F>(&self, key: CapabilityKey, check: F) -> Result<(), AssertionFailure>
    where
        F: FnOnce() -> Result<(), AssertionFailure>,
    {
        if !self.is_enabled(key) {
            tracing::debug!("Check skipped, {} is disabled", key);
            return Ok(());
        }
        check().map_err(|failure| failure.with_capability(key))
    }

    pub fn validate(&self, object: Validatable<'_>) -> Result<(), AssertionFailure> {
        self.validator.validate(object).map_err(|failure| {
            AssertionFailure::new(format!("{} validation: {}", object.kind(), failure.message))
        })
    }
}

impl Default for CaseContext<'_> {
    fn default() -> Self {
        Self::new(Capabilities::default(), &StructuralValidator)
    }
}

impl fmt::Debug for CaseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseContext")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Result of asking the factory for the object under test.
#[derive(Debug)]
pub enum Construction<T> {
    Constructed(T),
    Skipped(SkipReason),
    Failed(FactoryError),
}

impl<T> Construction<T> {
    /// Classifies a factory result. Only [`FactoryError::NoSuchCode`] means
    /// the code is not applicable; any other error is a failure.
    pub fn from_factory(result: Result<T, FactoryError>, object_type: &str, code: i32) -> Self {
        match result {
            Ok(object) => Construction::Constructed(object),
            Err(FactoryError::NoSuchCode { .. }) => {
                Construction::Skipped(SkipReason::UnsupportedCode(UnsupportedCode::new(object_type, code)))
            }
            Err(err) => Construction::Failed(err),
        }
    }
}

type Constructor<'a, D, T> = Box<dyn FnOnce(&D) -> Result<T, FactoryError> + 'a>;

/// One expected object, constructed at most once.
pub struct VerificationCase<'a, D, T> {
    expected: D,
    context: CaseContext<'a>,
    constructor: Cell<Option<Constructor<'a, D, T>>>,
    object: OnceCell<Construction<T>>,
}

impl<'a, D: Expected, T> VerificationCase<'a, D, T> {
    pub fn new<F>(expected: D, context: CaseContext<'a>, constructor: F) -> Self
    where
        F: FnOnce(&D) -> Result<T, FactoryError> + 'a,
    {
        Self {
            expected,
            context,
            constructor: Cell::new(Some(Box::new(constructor))),
            object: OnceCell::new(),
        }
    }

    /// A case that is already known not to apply. The object under test is
    /// never constructed.
    pub fn skipped(expected: D, context: CaseContext<'a>, reason: SkipReason) -> Self {
        Self {
            expected,
            context,
            constructor: Cell::new(None),
            object: OnceCell::from(Construction::Skipped(reason)),
        }
    }

    pub fn expected(&self) -> &D {
        &self.expected
    }

    pub fn context(&self) -> &CaseContext<'a> {
        &self.context
    }

    /// Whether construction has been attempted.
    pub fn is_resolved(&self) -> bool {
        self.object.get().is_some()
    }

    /// The object under test, constructed on first call.
    pub fn object_under_test(&self) -> CaseResult<&T> {
        let construction = self.object.get_or_init(|| {
            let object_type = self.expected.object_type();
            let code = self.expected.code();
            match self.constructor.take() {
                Some(constructor) => {
                    tracing::debug!("Creating {} from code {}", object_type, code);
                    Construction::from_factory(constructor(&self.expected), object_type, code)
                }
                None => Construction::Failed(FactoryError::failed(format!(
                    "no constructor for {}[{}]",
                    object_type, code
                ))),
            }
        });
        match construction {
            Construction::Constructed(object) => Ok(object),
            Construction::Skipped(reason) => Err(CaseError::Skipped(reason.clone())),
            Construction::Failed(err) => Err(CaseError::Factory(err.clone())),
        }
    }

    /// Runs `compare` against the object under test. The first failure ends
    /// the case.
    pub fn verify<F>(&self, compare: F) -> Outcome
    where
        F: FnOnce(&CaseContext<'a>, &D, &T) -> Result<(), AssertionFailure>,
    {
        let result = self.object_under_test().and_then(|object| {
            compare(&self.context, &self.expected, object).map_err(CaseError::from)
        });
        Outcome::from_result(self.expected.object_type(), self.expected.code(), result)
    }
}

impl<D: fmt::Debug, T> fmt::Debug for VerificationCase<'_, D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCase")
            .field("expected", &self.expected)
            .field("context", &self.context)
            .field("resolved", &self.object.get().is_some())
            .finish()
    }
}

/// How a case ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed,
    /// Not applicable. Does not count against the implementation.
    Skipped(SkipReason),
    Failed(CaseError),
}

impl Outcome {
    pub fn from_result(object_type: &str, code: i32, result: CaseResult<()>) -> Self {
        match result {
            Ok(()) => {
                tracing::debug!("{}[{}] passed", object_type, code);
                Outcome::Passed
            }
            Err(CaseError::Skipped(reason)) => {
                tracing::info!("{}[{}] skipped: {}", object_type, code, reason);
                Outcome::Skipped(reason)
            }
            Err(err) => {
                tracing::warn!("{}[{}] failed: {}", object_type, code, err);
                Outcome::Failed(err)
            }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn failure(&self) -> Option<&CaseError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Runs `next` only if this outcome passed.
    pub fn and_then<F>(self, next: F) -> Outcome
    where
        F: FnOnce() -> Outcome,
    {
        match self {
            Outcome::Passed => next(),
            other => other,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => f.write_str("passed"),
            Outcome::Skipped(reason) => write!(f, "skipped: {}", reason),
            Outcome::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}
