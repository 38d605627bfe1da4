/// Number of property slots defined by the table format.
const PROPERTY_COUNT: usize = 8;

/// Grammar metadata loaded from the table file's property records.
///
/// Slot assignments are fixed by the format; indices outside the known range
/// are silently ignored so newer table files still load.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GrammarProperties {
    slots: [String; PROPERTY_COUNT],
}

/// Property slot indices, in file order.
#[derive(Debug, Clone, Copy)]
enum PropertyIndex {
    Name = 0,
    Version = 1,
    Author = 2,
    About = 3,
    CharacterSet = 4,
    CharacterMapping = 5,
    GeneratedBy = 6,
    GeneratedDate = 7,
}

impl GrammarProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_value(&mut self, index: usize, value: String) {
        if index < PROPERTY_COUNT {
            self.slots[index] = value;
        }
    }

    fn get(&self, index: PropertyIndex) -> &str {
        &self.slots[index as usize]
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.get(PropertyIndex::Name)
    }

    #[must_use]
    pub fn version(&self) -> &str {
        self.get(PropertyIndex::Version)
    }

    #[must_use]
    pub fn author(&self) -> &str {
        self.get(PropertyIndex::Author)
    }

    #[must_use]
    pub fn about(&self) -> &str {
        self.get(PropertyIndex::About)
    }

    #[must_use]
    pub fn character_set(&self) -> &str {
        self.get(PropertyIndex::CharacterSet)
    }

    #[must_use]
    pub fn character_mapping(&self) -> &str {
        self.get(PropertyIndex::CharacterMapping)
    }

    #[must_use]
    pub fn generated_by(&self) -> &str {
        self.get(PropertyIndex::GeneratedBy)
    }

    #[must_use]
    pub fn generated_date(&self) -> &str {
        self.get(PropertyIndex::GeneratedDate)
    }
}
