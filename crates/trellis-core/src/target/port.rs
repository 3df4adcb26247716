//! Connection ports of target shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Which way connectors may glue to a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlueMode {
    Inward,
    Outward,
    InwardAndOutward,
}

/// A named connection point.
///
/// Relative ports address the shape's box with `(0, 0)` at the top-left corner
/// and `(1, 1)` at the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    name: Id,
    x: f64,
    y: f64,
    relative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<f64>,
    glue_mode: GlueMode,
}

impl Port {
    /// Creates a relative port.
    pub fn relative(name: Id, x: f64, y: f64, glue_mode: GlueMode) -> Self {
        Self {
            name,
            x,
            y,
            relative: true,
            direction: None,
            glue_mode,
        }
    }

    pub fn with_direction(mut self, direction: f64) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn direction(&self) -> Option<f64> {
        self.direction
    }

    pub fn glue_mode(&self) -> GlueMode {
        self.glue_mode
    }
}

/// The ports of a shape, in insertion order and addressable by name.
///
/// # Examples
///
/// ```
/// # use trellis_core::identifier::Id;
/// # use trellis_core::target::{GlueMode, Port, PortSet};
/// let mut ports = PortSet::new();
/// assert!(ports.add(Port::relative(Id::new("Top"), 0.5, 0.0, GlueMode::Inward)));
/// assert!(ports.get(Id::new("Top")).is_some());
/// assert!(ports.get(Id::new("Bottom")).is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Port>", into = "Vec<Port>")]
pub struct PortSet {
    ports: IndexMap<Id, Port>,
}

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a port. A port whose name is already taken is not added and `false`
    /// is returned; name lookups always find the first port with that name.
    pub fn add(&mut self, port: Port) -> bool {
        if self.ports.contains_key(&port.name) {
            return false;
        }
        self.ports.insert(port.name, port);
        true
    }

    pub fn get(&self, name: Id) -> Option<&Port> {
        self.ports.get(&name)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }
}

impl From<Vec<Port>> for PortSet {
    fn from(ports: Vec<Port>) -> Self {
        let mut set = Self::new();
        for port in ports {
            set.add(port);
        }
        set
    }
}

impl From<PortSet> for Vec<Port> {
    fn from(set: PortSet) -> Self {
        set.ports.into_values().collect()
    }
}
