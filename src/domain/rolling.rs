//! Trailing-window mean over sequences with undefined values.
//!
//! A window's mean is defined only once `window` values have been pushed and
//! every value inside the window is defined; a single `None` poisons each
//! window it falls in until it slides out.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    buf: VecDeque<Option<f64>>,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            buf: VecDeque::new(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Push the next value and return the mean of the window ending at it.
    pub fn push(&mut self, value: Option<f64>) -> Option<f64> {
        if self.window == 0 {
            return None;
        }
        if self.buf.len() == self.window {
            self.buf.pop_front();
        }
        self.buf.push_back(value);

        if self.buf.len() < self.window {
            return None;
        }

        // Summed oldest-first on every step so identical windows give identical means.
        let mut sum = 0.0;
        for v in &self.buf {
            sum += (*v)?;
        }
        Some(sum / self.window as f64)
    }
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut acc = RollingMean::new(window);
    values.iter().map(|&v| acc.push(v)).collect()
}

/// Divide, treating a zero denominator or a non-finite quotient as undefined.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}
