use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for element IDs — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Counter shared by every generated id, so ids stay unique per process.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A lightweight, interned identifier for a placed element.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a kind prefix (e.g. `room_1`, `wall_2`).
    pub fn with_prefix(prefix: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Generate an ID with `prefix` that `taken` does not report as in use.
    ///
    /// Imported scenes may already carry ids that look generated, so the
    /// counter alone cannot guarantee uniqueness against the live scene.
    pub fn fresh(prefix: &str, taken: impl Fn(ElementId) -> bool) -> Self {
        loop {
            let id = Self::with_prefix(prefix);
            if !taken(id) {
                return id;
            }
        }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}
