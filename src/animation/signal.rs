//! Declarative animatable values.
//!
//! The engine writes values into signals; the view layer reads them (and their versions) when it
//! paints. Nothing in the engine holds references to view objects.

use std::collections::BTreeMap;

/// A single animatable value with a change counter.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal<T> {
    value: T,
    version: u64,
}

impl<T> Signal<T>
where
    T: PartialEq,
{
    /// New signal at version 0.
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Number of effective writes so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Store `value`. Returns `true` (and bumps the version) only when it differs.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }
}

/// Visual properties a timeline can drive on one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in px.
    pub translate_x: f64,
    /// Vertical offset in px.
    pub translate_y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Fill fraction in `[0, 1]` (bar widths, rail fills).
    pub fill: f64,
    /// Stroke draw fraction in `[0, 1]` (dash-offset reveals).
    pub draw: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            fill: 0.0,
            draw: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    signal: Signal<ElementStyle>,
    // Board generation of the last effective write.
    changed_at: u64,
}

/// Keyed set of [`ElementStyle`] signals owned by one component instance.
///
/// A view remembers [`StyleBoard::generation`] after it paints and passes it back to
/// [`StyleBoard::changed_since`] to find the elements it must repaint.
#[derive(Clone, Debug, Default)]
pub struct StyleBoard {
    signals: BTreeMap<String, Slot>,
    generation: u64,
}

impl StyleBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one element's style. Returns `true` when it changed.
    pub fn write(&mut self, id: &str, style: ElementStyle) -> bool {
        let next = self.generation + 1;
        match self.signals.get_mut(id) {
            Some(slot) => {
                if !slot.signal.set(style) {
                    return false;
                }
                slot.changed_at = next;
            }
            None => {
                let signal = Signal {
                    value: style,
                    version: 1,
                };
                let slot = Slot {
                    signal,
                    changed_at: next,
                };
                self.signals.insert(id.to_owned(), slot);
            }
        }
        self.generation = next;
        true
    }

    /// Current style override for `id`, if the engine has written one.
    pub fn get(&self, id: &str) -> Option<&ElementStyle> {
        self.signals.get(id).map(|slot| slot.signal.get())
    }

    /// Monotonic counter of effective writes across the whole board.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ids written after the board was at `generation`.
    ///
    /// Elements dropped by [`StyleBoard::clear`] are not listed; a generation bump with no
    /// listed ids means the view must revert every override it applied.
    pub fn changed_since(&self, generation: u64) -> Vec<&str> {
        self.signals
            .iter()
            .filter(|(_, slot)| slot.changed_at > generation)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Number of elements with an override.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// `true` when no element carries an override.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Drop every override so the view falls back to its own base styles.
    pub fn clear(&mut self) {
        if !self.signals.is_empty() {
            self.generation += 1;
        }
        self.signals.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signal.rs"]
mod tests;
