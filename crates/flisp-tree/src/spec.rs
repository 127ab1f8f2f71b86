use crate::map::Map;
use crate::tree::SectionTree;

/// A named output unit: sections in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unit {
    pub sections: Map<String, SectionTree>,
}

impl Unit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section. A repeated name replaces the earlier section in place
    /// and returns it.
    pub fn insert_section(
        &mut self,
        name: impl Into<String>,
        tree: SectionTree,
    ) -> Option<SectionTree> {
        self.sections.insert(name.into(), tree)
    }

    pub fn section(&self, name: &str) -> Option<&SectionTree> {
        self.sections.get(name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }
}

/// The whole input: units in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specification {
    pub units: Map<String, Unit>,
}

impl Specification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit. A repeated name replaces the earlier unit in place and
    /// returns it.
    pub fn insert_unit(&mut self, name: impl Into<String>, unit: Unit) -> Option<Unit> {
        self.units.insert(name.into(), unit)
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    pub fn unit_mut(&mut self, name: &str) -> Option<&mut Unit> {
        self.units.get_mut(name)
    }

    pub fn contains_unit(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Total number of sections over all units.
    pub fn section_count(&self) -> usize {
        self.units.values().map(|unit| unit.sections.len()).sum()
    }
}
