use std::fmt;

/// One of the six prayer intervals of a day, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Dawn = 0,  // İmsak
    Sunrise,   // Güneş
    Midday,    // Öğle
    Afternoon, // İkindi
    Sunset,    // Akşam
    Night,     // Yatsı
}

pub const PERIOD_COUNT: usize = 6;

impl Period {
    pub const ALL: [Period; PERIOD_COUNT] = [
        Period::Dawn,
        Period::Sunrise,
        Period::Midday,
        Period::Afternoon,
        Period::Sunset,
        Period::Night,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Period> {
        Self::ALL.get(index).copied()
    }

    /// The period that follows this one, wrapping from Night to Dawn.
    pub fn next(self) -> Period {
        Self::ALL[(self.index() + 1) % PERIOD_COUNT]
    }

    pub fn is_last(self) -> bool {
        self == Period::Night
    }

    /// Turkish label used on the generated boards.
    pub fn label(self) -> &'static str {
        match self {
            Period::Dawn => "İmsak",
            Period::Sunrise => "Güneş",
            Period::Midday => "Öğle",
            Period::Afternoon => "İkindi",
            Period::Sunset => "Akşam",
            Period::Night => "Yatsı",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
