use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The exclusivity partition an actor belongs to.
///
/// Only one class may occupy a [`ResourcePool`](crate::ResourcePool) at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Passenger cars.
    Car,
    /// Trucks.
    Truck,
}

impl Class {
    /// Both classes, in index order.
    pub const ALL: [Class; 2] = [Class::Car, Class::Truck];

    /// Returns the class this one excludes.
    ///
    /// ```rust
    /// use garage_arbiter::Class;
    ///
    /// assert_eq!(Class::Car.other(), Class::Truck);
    /// assert_eq!(Class::Truck.other(), Class::Car);
    /// ```
    pub fn other(self) -> Class {
        match self {
            Class::Car => Class::Truck,
            Class::Truck => Class::Car,
        }
    }

    fn index(self) -> usize {
        match self {
            Class::Car => 0,
            Class::Truck => 1,
        }
    }
}

/// `{}` prints the one-letter tag (`C`/`T`), `{:#}` the full name.
impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.alternate()) {
            (Class::Car, false) => f.write_str("C"),
            (Class::Truck, false) => f.write_str("T"),
            (Class::Car, true) => f.write_str("car"),
            (Class::Truck, true) => f.write_str("truck"),
        }
    }
}

/// Error returned when a string does not name a [`Class`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClassError(String);

impl fmt::Display for ParseClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle class {:?}", self.0)
    }
}

impl std::error::Error for ParseClassError {}

impl FromStr for Class {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "car" => Ok(Class::Car),
            "t" | "truck" => Ok(Class::Truck),
            _ => Err(ParseClassError(s.to_string())),
        }
    }
}

/// A pair of values indexed by [`Class`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ClassMap<T>([T; 2]);

impl<T> ClassMap<T> {
    pub(crate) fn from_fn(mut f: impl FnMut(Class) -> T) -> Self {
        Self([f(Class::Car), f(Class::Truck)])
    }
}

impl<T> Index<Class> for ClassMap<T> {
    type Output = T;

    fn index(&self, class: Class) -> &T {
        &self.0[class.index()]
    }
}

impl<T> IndexMut<Class> for ClassMap<T> {
    fn index_mut(&mut self, class: Class) -> &mut T {
        &mut self.0[class.index()]
    }
}
