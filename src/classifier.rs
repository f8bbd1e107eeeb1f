//! Classifier handoff.
//!
//! The classifier is external. This module only fixes the call shape: a byte
//! buffer of `LO_RES * LO_RES` pixels in, an opaque status code out. The code
//! is passed through untouched.

/// Opaque result of one classification.
pub type ClassifierCode = i32;

pub trait Classifier {
    /// One-time preparation before the first classification.
    fn prepare(&mut self) {}

    fn classify(&mut self, input: &[u8]) -> ClassifierCode;
}

impl<F> Classifier for F
where
    F: FnMut(&[u8]) -> ClassifierCode,
{
    fn classify(&mut self, input: &[u8]) -> ClassifierCode {
        self(input)
    }
}

/// Stand-in when no model is linked; always returns 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullClassifier;

impl Classifier for NullClassifier {
    fn classify(&mut self, input: &[u8]) -> ClassifierCode {
        log::debug!("classifier: no model linked, {} bytes dropped", input.len());
        0
    }
}

pub type ClassifyFn = unsafe extern "C" fn(input: *const u8, len: u32) -> i32;
pub type SetupFn = unsafe extern "C" fn();

/// A classifier linked in over the C ABI (e.g. a TFLite Micro wrapper).
pub struct ExternClassifier {
    classify: ClassifyFn,
    setup: Option<SetupFn>,
}

impl ExternClassifier {
    /// # Safety
    ///
    /// `classify` must read at most `len` bytes from `input` and must not keep
    /// the pointer after returning. `setup`, if given, must be safe to call
    /// once before any `classify` call.
    pub const unsafe fn new(classify: ClassifyFn, setup: Option<SetupFn>) -> Self {
        Self { classify, setup }
    }
}

impl Classifier for ExternClassifier {
    fn prepare(&mut self) {
        if let Some(setup) = self.setup.take() {
            // SAFETY: upheld by the caller of `new`
            unsafe { setup() }
        }
    }

    fn classify(&mut self, input: &[u8]) -> ClassifierCode {
        // SAFETY: `input` is valid for `input.len()` bytes for the whole call
        unsafe { (self.classify)(input.as_ptr(), input.len() as u32) }
    }
}
