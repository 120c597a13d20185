use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which side of a dual-view block is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Preview,
    Source,
}

impl ViewMode {
    pub fn flipped(self) -> Self {
        match self {
            ViewMode::Preview => ViewMode::Source,
            ViewMode::Source => ViewMode::Preview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Preview => "Preview",
            ViewMode::Source => "Source",
        }
    }
}

/// Identity of a code block within one document.
///
/// Combines the block's position among the document's code blocks with a digest of
/// its text, so the same document always yields the same ids while siblings never
/// share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub ordinal: usize,
    pub digest: u64,
}

impl BlockId {
    pub fn new(ordinal: usize, raw_text: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        raw_text.hash(&mut hasher);
        Self {
            ordinal,
            digest: hasher.finish(),
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "codeblock-{}-{:08x}", self.ordinal, self.digest as u32)
    }
}

/// Selected view per dual-view block. Unset blocks show the preview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModes {
    modes: HashMap<BlockId, ViewMode>,
}

impl ViewModes {
    pub fn mode(&self, id: &BlockId) -> ViewMode {
        self.modes.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: BlockId, mode: ViewMode) {
        self.modes.insert(id, mode);
    }

    /// Flip the shown view of one block, leaving every other block untouched.
    pub fn toggle(&mut self, id: BlockId) -> ViewMode {
        let next = self.mode(&id).flipped();
        self.modes.insert(id, next);
        next
    }
}
