// Fish entities and their payloads.

/// Whether an item is a phishing attempt (`Bad`) or legitimate mail (`Good`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Bad,
    Good,
}

impl ItemKind {
    pub fn is_bad(self) -> bool {
        matches!(self, ItemKind::Bad)
    }

    /// Score contribution of catching one item of this kind.
    pub fn delta(self, points: i32) -> i32 {
        if self.is_bad() { points } else { -points }
    }
}

/// A label shown on a fish together with its hidden verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabeledItem {
    pub label: &'static str,
    pub kind: ItemKind,
}

/// What a fish carries. The shape is fixed by the mode the fish was spawned in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Simple mode: a single item.
    Simple(LabeledItem),
    /// Advanced mode: sender and/or hook, judged independently.
    Advanced {
        sender: Option<LabeledItem>,
        hook: Option<LabeledItem>,
    },
}

impl Payload {
    /// True when any carried item is bad; selects the "phishy" skin.
    pub fn looks_bad(&self) -> bool {
        match self {
            Payload::Simple(item) => item.kind.is_bad(),
            Payload::Advanced { sender, hook } => [sender, hook]
                .into_iter()
                .flatten()
                .any(|item| item.kind.is_bad()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::LeftToRight => 1.0,
            Direction::RightToLeft => -1.0,
        }
    }
}

/// Why a fish stopped being live. Recorded exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retirement {
    OffScreen,
    Caught,
}

/// Unique within one round.
pub type FishId = u32;

/// A fish swimming across the playfield. `(x, y)` is the top-left corner of
/// its box; `y` never changes after spawn.
#[derive(Clone, Debug)]
pub struct Fish {
    pub id: FishId,
    pub x: f64,
    pub y: f64,
    /// Pixels per frame; the sign is the travel direction.
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
    pub payload: Payload,
    retired: Option<Retirement>,
}

impl Fish {
    pub fn new(id: FishId, x: f64, y: f64, velocity: f64, size: (f64, f64), payload: Payload) -> Self {
        Self {
            id,
            x,
            y,
            velocity,
            width: size.0,
            height: size.1,
            payload,
            retired: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.retired.is_none()
    }

    pub fn retirement(&self) -> Option<Retirement> {
        self.retired
    }

    pub fn direction(&self) -> Direction {
        if self.velocity < 0.0 {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    /// Retire the fish. Returns false (and changes nothing) if it was already
    /// retired, so a second cause can never be recorded.
    pub(crate) fn retire(&mut self, cause: Retirement) -> bool {
        if self.retired.is_some() {
            return false;
        }
        self.retired = Some(cause);
        true
    }
}
