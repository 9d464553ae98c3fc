use std::fmt;
use std::str::FromStr;

/// Completion value at or above which a phase's terminal stage counts as
/// finished. The comparison is against the displayed value, which starts
/// at zero until a snapshot reports otherwise.
pub const TERMINAL_THRESHOLD: f64 = 99.99;

/// Relative path of the finished report artifact on the job runner.
pub const REPORT_ARTIFACT_PATH: &str = "/download/library-report.xlsx";

/// Number of stage keys the job runner reports on (`p0`..`p15`).
pub const STAGE_COUNT: usize = 16;

/// Identifier of one unit of server-side batch work and its progress
/// indicator. Spelled `p0`..`p15` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageKey(u8);

impl StageKey {
    /// Key for the given index, or `None` when out of range.
    pub fn new(index: u8) -> Option<Self> {
        (usize::from(index) < STAGE_COUNT).then_some(Self(index))
    }

    /// Zero-based index of this key.
    pub fn index(self) -> u8 {
        self.0
    }

    pub(crate) const fn at(index: u8) -> Self {
        Self(index)
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Error for strings that do not name a known stage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStageKeyError;

impl fmt::Display for ParseStageKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a stage key (expected p0..p15)")
    }
}

impl std::error::Error for ParseStageKeyError {}

impl FromStr for StageKey {
    type Err = ParseStageKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('p').ok_or(ParseStageKeyError)?;
        // Reject alternate spellings like "p07" so parsing stays the
        // inverse of Display.
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(ParseStageKeyError);
        }
        let index = digits.parse::<u8>().map_err(|_| ParseStageKeyError)?;
        StageKey::new(index).ok_or(ParseStageKeyError)
    }
}

/// A group of stage keys triggered and polled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Dictionaries,
    Reports,
}

/// One labeled progress indicator owned by a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub key: StageKey,
    pub label: &'static str,
}

const DICTIONARY_STAGES: [StageSpec; 6] = [
    StageSpec {
        key: StageKey::at(0),
        label: "User ID to name and email dictionaries",
    },
    StageSpec {
        key: StageKey::at(1),
        label: "Shelf ID to slug, name, and owner dictionaries",
    },
    StageSpec {
        key: StageKey::at(2),
        label: "Book ID to shelf dictionary",
    },
    StageSpec {
        key: StageKey::at(3),
        label: "Book ID to slug, name, and owner dictionaries",
    },
    StageSpec {
        key: StageKey::at(4),
        label: "Chapter ID to slug, name, owner, and book dictionaries",
    },
    StageSpec {
        key: StageKey::at(5),
        label: "Page ID to slug, name, and book dictionaries",
    },
];

const REPORT_STAGES: [StageSpec; 10] = [
    StageSpec {
        key: StageKey::at(6),
        label: "Gathering tags for all pages",
    },
    StageSpec {
        key: StageKey::at(7),
        label: "Formatting all pages",
    },
    StageSpec {
        key: StageKey::at(8),
        label: "Formatting all attachments",
    },
    StageSpec {
        key: StageKey::at(9),
        label: "Formatting all books",
    },
    StageSpec {
        key: StageKey::at(10),
        label: "Filtering books for duplicates",
    },
    StageSpec {
        key: StageKey::at(11),
        label: "Filtering books that are unshelved",
    },
    StageSpec {
        key: StageKey::at(12),
        label: "Formatting all chapters",
    },
    StageSpec {
        key: StageKey::at(13),
        label: "Filtering pages for duplicates",
    },
    StageSpec {
        key: StageKey::at(14),
        label: "Formatting all shelves",
    },
    StageSpec {
        key: StageKey::at(15),
        label: "Formatting all users",
    },
];

impl Phase {
    /// Ordered stage indicators owned by this phase.
    pub fn stages(self) -> &'static [StageSpec] {
        match self {
            Phase::Dictionaries => &DICTIONARY_STAGES,
            Phase::Reports => &REPORT_STAGES,
        }
    }

    /// The stage whose completion value gates this phase's polling loop.
    ///
    /// Only the last stage is consulted; earlier stages reaching 100 first
    /// have no effect on termination.
    pub fn terminal_key(self) -> StageKey {
        match self {
            Phase::Dictionaries => StageKey::at(5),
            Phase::Reports => StageKey::at(15),
        }
    }

    /// Whether `key` belongs to this phase's ordered subset.
    pub fn owns(self, key: StageKey) -> bool {
        self.stages().iter().any(|stage| stage.key == key)
    }
}
