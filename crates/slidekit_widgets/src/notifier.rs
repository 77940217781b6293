//! Fraction change notification

/// Forwards slide fractions to a callback, skipping repeats of the last
/// delivered value.
#[derive(Default)]
pub struct FractionChangeNotifier {
    last_delivered: Option<f32>,
    callback: Option<Box<dyn FnMut(f32) + Send>>,
}

impl FractionChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback<F>(callback: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        Self {
            last_delivered: None,
            callback: Some(Box::new(callback)),
        }
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Deliver `fraction` if it differs from the last delivered value.
    ///
    /// Returns true when the callback ran. NaN is never delivered, and
    /// nothing is recorded while no callback is registered.
    pub fn offer(&mut self, fraction: f32) -> bool {
        if fraction.is_nan() || self.last_delivered == Some(fraction) {
            return false;
        }
        let Some(callback) = self.callback.as_mut() else {
            return false;
        };
        callback(fraction);
        self.last_delivered = Some(fraction);
        tracing::trace!(fraction, "fraction delivered");
        true
    }

    pub fn last_delivered(&self) -> Option<f32> {
        self.last_delivered
    }

    /// Forget the last delivered value so the next offer always goes through
    pub fn reset(&mut self) {
        self.last_delivered = None;
    }
}

impl std::fmt::Debug for FractionChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractionChangeNotifier")
            .field("last_delivered", &self.last_delivered)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
