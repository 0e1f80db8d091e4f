//! Tri-state boolean flags that can propagate down the schema tree

use serde::Deserialize;

/// A boolean that may also be left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    #[default]
    Unset,
    False,
    True,
}

impl TriState {
    pub fn is_set(self) -> bool {
        self != Self::Unset
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}

/// A node property (such as "must exist") that children may inherit.
///
/// `initial_value` is what the schema declared and never changes. `value`
/// starts out equal to it and may be overwritten while the tree is built:
///
/// - a parent with `recurse` set passes its value to every descendant that
///   left the property undeclared;
/// - a child with `inherit` set and no declared value takes its parent's
///   value.
///
/// An omitted declaration defaults to `False` but stays undeclared, so
/// propagation may still replace it. Only `value == True` is truthy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FlagDecl")]
pub struct TriStateFlag {
    value: TriState,
    initial_value: TriState,
    declared: bool,
    recurse: Option<bool>,
    inherit: Option<bool>,
}

impl Default for TriStateFlag {
    fn default() -> Self {
        Self::defaulted(None, None)
    }
}

impl TriStateFlag {
    pub fn new(value: impl Into<TriState>, recurse: Option<bool>, inherit: Option<bool>) -> Self {
        let value = value.into();
        Self {
            value,
            initial_value: value,
            declared: value.is_set(),
            recurse,
            inherit,
        }
    }

    /// An explicitly `Unset` flag with no markers.
    pub fn unset() -> Self {
        Self::new(TriState::Unset, None, None)
    }

    /// A flag whose value was not declared: `False` until propagation says otherwise.
    fn defaulted(recurse: Option<bool>, inherit: Option<bool>) -> Self {
        Self {
            declared: false,
            ..Self::new(TriState::False, recurse, inherit)
        }
    }

    /// The effective value after propagation.
    pub fn value(&self) -> TriState {
        self.value
    }

    /// The value as declared.
    pub fn initial_value(&self) -> TriState {
        self.initial_value
    }

    /// Whether the schema gave this flag a value of its own.
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    pub fn recurse(&self) -> Option<bool> {
        self.recurse
    }

    pub fn inherit(&self) -> Option<bool> {
        self.inherit
    }

    pub fn is_truthy(&self) -> bool {
        self.value == TriState::True
    }

    /// This flag as seen by a child of `parent`.
    ///
    /// A declared value always wins. Otherwise the parent's effective value is
    /// adopted when the parent recurses or this flag inherits; recursion keeps
    /// going unless this flag explicitly declared `recurse: false`.
    pub fn propagated_from(&self, parent: &TriStateFlag) -> TriStateFlag {
        let mut flag = self.clone();
        if self.declared {
            return flag;
        }

        let recursing = parent.recurse == Some(true);
        if recursing || self.inherit == Some(true) {
            flag.value = parent.value;
        }
        if recursing && flag.recurse.is_none() {
            flag.recurse = Some(true);
        }
        flag
    }
}

impl From<bool> for TriStateFlag {
    fn from(value: bool) -> Self {
        Self::new(value, None, None)
    }
}

impl PartialEq<bool> for TriStateFlag {
    fn eq(&self, other: &bool) -> bool {
        self.value == TriState::from(*other)
    }
}

/// Declared shape: a bare bool (or null), or a mapping with markers.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagDecl {
    Bare(Option<bool>),
    Full {
        #[serde(default)]
        value: Option<bool>,
        #[serde(default)]
        recurse: Option<bool>,
        #[serde(default)]
        inherit: Option<bool>,
    },
}

impl From<FlagDecl> for TriStateFlag {
    fn from(decl: FlagDecl) -> Self {
        match decl {
            FlagDecl::Bare(Some(value)) => Self::from(value),
            FlagDecl::Bare(None) => Self::default(),
            FlagDecl::Full {
                value: Some(value),
                recurse,
                inherit,
            } => Self::new(value, recurse, inherit),
            FlagDecl::Full {
                value: None,
                recurse,
                inherit,
            } => Self::defaulted(recurse, inherit),
        }
    }
}
