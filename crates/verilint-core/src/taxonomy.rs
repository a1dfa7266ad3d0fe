//! Defect taxonomy advertised to the model and recognised in its replies.

use std::fmt;
use std::str::FromStr;

/// Category written when the model reported no defect.
pub const CATEGORY_NONE: &str = "NONE";
/// Category written when the module could not be analysed.
pub const CATEGORY_ERROR: &str = "ERROR";
/// Category written when the reply carries no recognisable category.
pub const CATEGORY_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DefectLevel {
    Simple,
    Medium,
    Complex,
}

impl DefectLevel {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Simple => "Simple Level Defects",
            Self::Medium => "Medium Level Defects",
            Self::Complex => "Complex Level Defects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectCategory {
    SyntaxStructure,
    SignalUsage,
    SensitivityList,
    ReservedWords,
    RaceHazard,
    PortType,
    Operators,
    ModuleInstances,
    LogicSynthesis,
    CombinationalSequential,
    BitWidthUsage,
}

impl DefectCategory {
    /// In taxonomy order; the prompt numbers categories by this position.
    pub const ALL: [DefectCategory; 11] = [
        Self::SyntaxStructure,
        Self::SignalUsage,
        Self::SensitivityList,
        Self::ReservedWords,
        Self::RaceHazard,
        Self::PortType,
        Self::Operators,
        Self::ModuleInstances,
        Self::LogicSynthesis,
        Self::CombinationalSequential,
        Self::BitWidthUsage,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::SyntaxStructure => "SYNTAX_STRUCTURE",
            Self::SignalUsage => "SIGNAL_USAGE",
            Self::SensitivityList => "SENSITIVITY_LIST",
            Self::ReservedWords => "RESERVED_WORDS",
            Self::RaceHazard => "RACE_HAZARD",
            Self::PortType => "PORT_TYPE",
            Self::Operators => "OPERATORS",
            Self::ModuleInstances => "MODULE_INSTANCES",
            Self::LogicSynthesis => "LOGIC_SYNTHESIS",
            Self::CombinationalSequential => "COMBINATIONAL_SEQUENTIAL",
            Self::BitWidthUsage => "BIT_WIDTH_USAGE",
        }
    }

    pub fn level(self) -> DefectLevel {
        match self {
            Self::SyntaxStructure
            | Self::SignalUsage
            | Self::SensitivityList
            | Self::ReservedWords
            | Self::RaceHazard => DefectLevel::Simple,
            Self::PortType | Self::Operators | Self::ModuleInstances => DefectLevel::Medium,
            Self::LogicSynthesis | Self::CombinationalSequential | Self::BitWidthUsage => {
                DefectLevel::Complex
            }
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::SyntaxStructure => "Basic syntax errors, missing semicolons, punctuation issues",
            Self::SignalUsage => {
                "Incorrect signal assignments, unused signals, undefined signals"
            }
            Self::SensitivityList => {
                "Issues with always block sensitivity lists, missing signals"
            }
            Self::ReservedWords => "Using Verilog reserved words incorrectly",
            Self::RaceHazard => "Race conditions, hazard conditions in temporal logic",
            Self::PortType => {
                "Incorrect port declarations (input/output/inout), port connection issues"
            }
            Self::Operators => {
                "Incorrect operator usage (bitwise vs logical), operator precedence issues"
            }
            Self::ModuleInstances => "Module instantiation errors, port mapping issues",
            Self::LogicSynthesis => {
                "Logic that cannot be properly synthesized, complex logic errors"
            }
            Self::CombinationalSequential => {
                "Mixing combinational and sequential logic incorrectly"
            }
            Self::BitWidthUsage => "Bit width mismatches, incorrect bit width declarations",
        }
    }
}

impl fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DefectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown defect category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_five_three_three() {
        let count = |lvl| {
            DefectCategory::ALL
                .iter()
                .filter(|c| c.level() == lvl)
                .count()
        };
        assert_eq!(count(DefectLevel::Simple), 5);
        assert_eq!(count(DefectLevel::Medium), 3);
        assert_eq!(count(DefectLevel::Complex), 3);
    }

    #[test]
    fn levels_are_contiguous_in_taxonomy_order() {
        let levels: Vec<_> = DefectCategory::ALL.iter().map(|c| c.level()).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(
            "port_type".parse::<DefectCategory>(),
            Ok(DefectCategory::PortType)
        );
        assert!("NOT_A_TAG".parse::<DefectCategory>().is_err());
        for c in DefectCategory::ALL {
            assert_eq!(c.tag().parse::<DefectCategory>(), Ok(c));
        }
    }
}
