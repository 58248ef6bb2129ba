//! Reactive form model.
//!
//! A form is a tree of [`FormNode`]s: leaf [`FormControl`]s holding a string
//! value, and [`FormGroup`]s holding an ordered list of named children.
//! Validity and value are derived from the current tree on every query, so
//! any state change (input, touch) is reflected immediately.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::constants::PATH_SEPARATOR;
use crate::error::{DomainError, DomainResult};
use crate::validation::{run_validators, ValidationErrors, ValidationResult, ValidatorFn};

/// Aggregate validity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Valid,
    Invalid,
}

// =============================================================================
// FormControl
// =============================================================================

/// A single input field.
#[derive(Clone, Default)]
pub struct FormControl {
    value: String,
    dirty: bool,
    touched: bool,
    validators: Vec<ValidatorFn>,
}

impl fmt::Debug for FormControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormControl")
            .field("value", &self.value)
            .field("dirty", &self.dirty)
            .field("touched", &self.touched)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl FormControl {
    /// Create a pristine control with an initial value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
            ..Self::default()
        }
    }

    /// Attach validators to the control.
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = ValidatorFn>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply a value typed by the user. Marks the control dirty.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    /// Clear the value and interaction flags.
    pub fn reset(&mut self) {
        self.value.clear();
        self.dirty = false;
        self.touched = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn errors(&self) -> ValidationResult {
        run_validators(&self.validators, NodeRef::Control(self))
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_ok()
    }

    pub fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Control(self)
    }
}

// =============================================================================
// FormGroup
// =============================================================================

/// An ordered collection of named controls and nested groups.
#[derive(Clone, Default)]
pub struct FormGroup {
    controls: Vec<(String, FormNode)>,
    validators: Vec<ValidatorFn>,
    touched: bool,
}

impl fmt::Debug for FormGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormGroup")
            .field("controls", &self.controls)
            .field("touched", &self.touched)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named control.
    pub fn control(mut self, name: impl Into<String>, control: FormControl) -> Self {
        self.controls.push((name.into(), FormNode::Control(control)));
        self
    }

    /// Append a named nested group.
    pub fn group(mut self, name: impl Into<String>, group: FormGroup) -> Self {
        self.controls.push((name.into(), FormNode::Group(group)));
        self
    }

    /// Attach group-level validators.
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = ValidatorFn>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Direct children in insertion order.
    pub fn controls(&self) -> impl Iterator<Item = (&str, &FormNode)> {
        self.controls.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Look up a node by dotted path, e.g. `passwords.password`.
    pub fn get(&self, path: &str) -> Option<&FormNode> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut node = self.child(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.child(segment)?;
        }
        Some(node)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut FormNode> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut node = self.child_mut(segments.next()?)?;
        for segment in segments {
            node = match node {
                FormNode::Group(group) => group.child_mut(segment)?,
                FormNode::Control(_) => return None,
            };
        }
        Some(node)
    }

    /// Resolve a path that must point at a leaf control.
    pub fn control_at(&self, path: &str) -> DomainResult<&FormControl> {
        match self.get(path) {
            Some(FormNode::Control(control)) => Ok(control),
            Some(FormNode::Group(_)) => Err(DomainError::NotAControl(path.to_string())),
            None => Err(DomainError::unknown_control(path)),
        }
    }

    pub fn control_at_mut(&mut self, path: &str) -> DomainResult<&mut FormControl> {
        match self.get_mut(path) {
            Some(FormNode::Control(control)) => Ok(control),
            Some(FormNode::Group(_)) => Err(DomainError::NotAControl(path.to_string())),
            None => Err(DomainError::unknown_control(path)),
        }
    }

    /// Apply user input to the control at `path`.
    pub fn set_value(&mut self, path: &str, value: impl Into<String>) -> DomainResult<()> {
        self.control_at_mut(path)?.set_value(value);
        Ok(())
    }

    /// Record that the control at `path` lost focus.
    pub fn mark_touched(&mut self, path: &str) -> DomainResult<()> {
        self.control_at_mut(path)?.mark_as_touched();
        Ok(())
    }

    /// Mark only this group as touched.
    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    /// Mark this group and every descendant as touched.
    pub fn mark_all_as_touched(&mut self) {
        self.touched = true;
        for (_, node) in self.controls.iter_mut() {
            node.walk_mut(&mut FormNode::mark_as_touched);
        }
    }

    /// Reset every descendant control.
    pub fn reset(&mut self) {
        self.touched = false;
        for (_, node) in self.controls.iter_mut() {
            node.walk_mut(&mut |n| match n {
                FormNode::Control(control) => control.reset(),
                FormNode::Group(group) => group.touched = false,
            });
        }
    }

    /// True when any descendant control is dirty.
    pub fn is_dirty(&self) -> bool {
        self.controls.iter().any(|(_, node)| node.is_dirty())
    }

    /// True when this group or any descendant has been touched.
    pub fn is_touched(&self) -> bool {
        self.touched || self.controls.iter().any(|(_, node)| node.is_touched())
    }

    /// Errors from the group's own validators, ignoring children.
    pub fn errors(&self) -> ValidationResult {
        run_validators(&self.validators, NodeRef::Group(self))
    }

    /// Own validators pass and every child is valid.
    pub fn is_valid(&self) -> bool {
        self.errors().is_ok() && self.controls.iter().all(|(_, node)| node.is_valid())
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn status(&self) -> FormStatus {
        if self.is_valid() {
            FormStatus::Valid
        } else {
            FormStatus::Invalid
        }
    }

    /// JSON object of all values, nested for child groups.
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .controls
            .iter()
            .map(|(name, node)| (name.clone(), node.value()))
            .collect();
        Value::Object(map)
    }

    /// Every failing node keyed by its dotted path. The group's own errors
    /// are keyed by the empty path.
    pub fn error_map(&self) -> BTreeMap<String, ValidationErrors> {
        let mut map = BTreeMap::new();
        if let Err(errors) = self.errors() {
            map.insert(String::new(), errors);
        }
        for (name, node) in &self.controls {
            node.walk(name, &mut |path, n| {
                if let Err(errors) = n.errors() {
                    map.insert(path.to_string(), errors);
                }
            });
        }
        map
    }

    pub fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Group(self)
    }

    fn child(&self, name: &str) -> Option<&FormNode> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut FormNode> {
        self.controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }
}

// =============================================================================
// FormNode
// =============================================================================

/// A node of the form tree.
#[derive(Debug, Clone)]
pub enum FormNode {
    Control(FormControl),
    Group(FormGroup),
}

impl FormNode {
    pub fn as_group(&self) -> Option<&FormGroup> {
        match self {
            FormNode::Group(group) => Some(group),
            FormNode::Control(_) => None,
        }
    }

    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            FormNode::Control(control) => NodeRef::Control(control),
            FormNode::Group(group) => NodeRef::Group(group),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.node_ref().is_dirty()
    }

    pub fn is_touched(&self) -> bool {
        self.node_ref().is_touched()
    }

    /// Own validator errors (children excluded for groups).
    pub fn errors(&self) -> ValidationResult {
        match self {
            FormNode::Control(control) => control.errors(),
            FormNode::Group(group) => group.errors(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            FormNode::Control(control) => control.is_valid(),
            FormNode::Group(group) => group.is_valid(),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            FormNode::Control(control) => Value::String(control.value.clone()),
            FormNode::Group(group) => group.value(),
        }
    }

    pub fn mark_as_touched(&mut self) {
        match self {
            FormNode::Control(control) => control.mark_as_touched(),
            FormNode::Group(group) => group.mark_as_touched(),
        }
    }

    /// Visit this node and all descendants, parents before children.
    pub fn walk_mut(&mut self, visitor: &mut impl FnMut(&mut FormNode)) {
        visitor(self);
        if let FormNode::Group(group) = self {
            for (_, child) in group.controls.iter_mut() {
                child.walk_mut(visitor);
            }
        }
    }

    /// Visit this node and all descendants with their dotted paths.
    pub fn walk(&self, path: &str, visitor: &mut impl FnMut(&str, &FormNode)) {
        visitor(path, self);
        if let FormNode::Group(group) = self {
            for (name, child) in &group.controls {
                let child_path = format!("{}{}{}", path, PATH_SEPARATOR, name);
                child.walk(&child_path, visitor);
            }
        }
    }
}

// =============================================================================
// NodeRef
// =============================================================================

/// Borrowed view of a node, handed to validators.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Control(&'a FormControl),
    Group(&'a FormGroup),
}

impl<'a> NodeRef<'a> {
    /// The control's value, `None` for groups.
    pub fn value_str(self) -> Option<&'a str> {
        match self {
            NodeRef::Control(control) => Some(control.value()),
            NodeRef::Group(_) => None,
        }
    }

    pub fn is_dirty(self) -> bool {
        match self {
            NodeRef::Control(control) => control.is_dirty(),
            NodeRef::Group(group) => group.is_dirty(),
        }
    }

    pub fn is_touched(self) -> bool {
        match self {
            NodeRef::Control(control) => control.is_touched(),
            NodeRef::Group(group) => group.is_touched(),
        }
    }

    /// Neither dirty nor touched.
    pub fn is_pristine(self) -> bool {
        !(self.is_dirty() || self.is_touched())
    }
}
