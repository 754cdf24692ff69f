use std::fmt;
use std::str::FromStr;

/// What a rule is fed by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Token rules receive a window of tokens around every token
    Token,
    /// Line rules receive every raw line of text
    Line,
    /// Comment rules receive every comment
    Comment,
}

impl RuleType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Line => "line",
            Self::Comment => "comment",
        }
    }

    pub const ALL: &'static [RuleType] = &[RuleType::Token, RuleType::Line, RuleType::Comment];
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(Self::Token),
            "line" => Ok(Self::Line),
            "comment" => Ok(Self::Comment),
            _ => Err(format!("Unknown rule type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultStatus {
    #[default]
    Enabled,
    Disabled,
}

macro_rules! declare_rules {
    (
        $(
            $variant:ident => {
                name: $name:literal,
                rule_type: $rule_type:ident,
                default: $default:ident,
            }
        ),* $(,)?
    ) => {
        /// Enum representing all available linting rules
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Rule {
            $($variant),*
        }

        impl Rule {
            /// Get the rule's string name
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),*
                }
            }

            /// Get what the rule operates on
            pub const fn rule_type(self) -> RuleType {
                match self {
                    $(Self::$variant => RuleType::$rule_type),*
                }
            }

            /// Get the rule's default status
            pub const fn default_status(self) -> DefaultStatus {
                match self {
                    $(Self::$variant => DefaultStatus::$default),*
                }
            }

            /// Check if the rule is enabled by default
            pub const fn is_enabled_by_default(self) -> bool {
                matches!(self.default_status(), DefaultStatus::Enabled)
            }

            /// Parse a rule from its string name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Get all rules as a slice
            pub const fn all() -> &'static [Rule] {
                ALL_RULES
            }
        }

        impl fmt::Display for Rule {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        /// Static array containing all rules
        pub const ALL_RULES: &[Rule] = &[
            $(Rule::$variant),*
        ];
    };
}

// Declare all rules with their metadata
declare_rules! {
    DocumentStart => {
        name: "document-start",
        rule_type: Token,
        default: Enabled,
    },
}

/// A collection of rules, kept in declaration order so that diagnostics at
/// the same position always come out in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a rule set containing all rules
    pub fn all() -> Self {
        Self { rules: ALL_RULES.to_vec() }
    }

    /// Create a rule set containing the rules enabled by default
    pub fn defaults() -> Self {
        Rule::enabled_by_default().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Filter rules by a predicate
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: FnMut(&Rule) -> bool,
    {
        Self { rules: self.rules.into_iter().filter(predicate).collect() }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut rules: Vec<Rule> = iter.into_iter().collect();
        rules.sort();
        rules.dedup();
        Self { rules }
    }
}

impl Rule {
    /// Get all rules of a given type
    pub fn by_type(rule_type: RuleType) -> impl Iterator<Item = Rule> {
        ALL_RULES
            .iter()
            .copied()
            .filter(move |r| r.rule_type() == rule_type)
    }

    /// Get all rules enabled by default
    pub fn enabled_by_default() -> impl Iterator<Item = Rule> {
        ALL_RULES
            .iter()
            .copied()
            .filter(|r| r.is_enabled_by_default())
    }
}
