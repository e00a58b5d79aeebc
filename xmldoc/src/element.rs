//! Element payload stored in each node of a document tree.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{XmlError, XmlResult};

/// Attribute value: the scalar cases of [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i32),
    Unsigned(u32),
    Bool(bool),
    Float(f32),
    String(String),
}

/// Element content: a scalar, or nested elements in document order.
///
/// Nested elements may repeat a tag; lookups by tag return the first one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Unsigned(u32),
    Bool(bool),
    Float(f32),
    String(String),
    Nested(Vec<Element>),
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Unsigned(_) => "unsigned",
            Scalar::Bool(_) => "bool",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }

    fn mismatch(&self, expected: &'static str) -> XmlError {
        XmlError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_number(&self) -> XmlResult<i32> {
        match self {
            Scalar::Int(v) => Ok(*v),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_unsigned(&self) -> XmlResult<u32> {
        match self {
            Scalar::Unsigned(v) => Ok(*v),
            other => Err(other.mismatch("unsigned")),
        }
    }

    pub fn as_bool(&self) -> XmlResult<bool> {
        match self {
            Scalar::Bool(v) => Ok(*v),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_float(&self) -> XmlResult<f32> {
        match self {
            Scalar::Float(v) => Ok(*v),
            other => Err(other.mismatch("float")),
        }
    }

    pub fn as_string(&self) -> XmlResult<&str> {
        match self {
            Scalar::String(v) => Ok(v.as_str()),
            other => Err(other.mismatch("string")),
        }
    }
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Unsigned(_) => "unsigned",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Nested(_) => "nested",
        }
    }
}

/// An empty child list, so a default element is a container (the root).
impl Default for Value {
    fn default() -> Self {
        Value::Nested(Vec::new())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Unsigned(v) => write!(f, "{v}"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Int(v) => Value::Int(v),
            Scalar::Unsigned(v) => Value::Unsigned(v),
            Scalar::Bool(v) => Value::Bool(v),
            Scalar::Float(v) => Value::Float(v),
            Scalar::String(v) => Value::String(v),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v.into())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_primitive!(
    i32 => Int,
    u32 => Unsigned,
    bool => Bool,
    f32 => Float,
    String => String,
    &str => String,
);

impl From<Vec<Element>> for Value {
    fn from(children: Vec<Element>) -> Self {
        Value::Nested(children)
    }
}

/// A labeled unit of the document: tag, typed value and attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    value: Value,
    attributes: BTreeMap<String, Scalar>,
}

impl Element {
    pub fn new(tag: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    fn mismatch(&self, expected: &'static str) -> XmlError {
        XmlError::TypeMismatch {
            expected,
            found: self.value.kind(),
        }
    }

    pub fn as_number(&self) -> XmlResult<i32> {
        match &self.value {
            Value::Int(v) => Ok(*v),
            _ => Err(self.mismatch("int")),
        }
    }

    pub fn as_unsigned(&self) -> XmlResult<u32> {
        match &self.value {
            Value::Unsigned(v) => Ok(*v),
            _ => Err(self.mismatch("unsigned")),
        }
    }

    pub fn as_bool(&self) -> XmlResult<bool> {
        match &self.value {
            Value::Bool(v) => Ok(*v),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_float(&self) -> XmlResult<f32> {
        match &self.value {
            Value::Float(v) => Ok(*v),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_string(&self) -> XmlResult<&str> {
        match &self.value {
            Value::String(v) => Ok(v.as_str()),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn nested(&self) -> XmlResult<&[Element]> {
        match &self.value {
            Value::Nested(children) => Ok(children.as_slice()),
            _ => Err(self.mismatch("nested")),
        }
    }

    fn nested_mut(&mut self) -> XmlResult<&mut Vec<Element>> {
        let found = self.value.kind();
        match &mut self.value {
            Value::Nested(children) => Ok(children),
            _ => Err(XmlError::TypeMismatch {
                expected: "nested",
                found,
            }),
        }
    }

    /// First nested element tagged `tag`.
    ///
    /// ```ignore
    /// let street = person.child("address")?.child("street")?.as_string()?;
    /// ```
    pub fn child(&self, tag: &str) -> XmlResult<&Element> {
        self.nested()?
            .iter()
            .find(|e| e.tag == tag)
            .ok_or_else(|| XmlError::KeyNotFound(tag.to_string()))
    }

    pub fn child_mut(&mut self, tag: &str) -> XmlResult<&mut Element> {
        self.nested_mut()?
            .iter_mut()
            .find(|e| e.tag == tag)
            .ok_or_else(|| XmlError::KeyNotFound(tag.to_string()))
    }

    /// All nested elements tagged `tag`, in document order.
    pub fn children_named<'a>(
        &'a self,
        tag: &'a str,
    ) -> XmlResult<impl Iterator<Item = &'a Element> + 'a> {
        Ok(self.nested()?.iter().filter(move |e| e.tag == tag))
    }

    /// Appends a nested element; `TypeMismatch` unless the value is nested.
    pub fn push_child(&mut self, child: Element) -> XmlResult<()> {
        self.nested_mut()?.push(child);
        Ok(())
    }

    /// Sets an attribute, returning the value it replaced.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Option<Scalar> {
        self.attributes.insert(name.into(), value.into())
    }

    pub fn attribute(&self, name: &str) -> XmlResult<&Scalar> {
        self.attributes
            .get(name)
            .ok_or_else(|| XmlError::KeyNotFound(name.to_string()))
    }

    pub fn remove_attribute(&mut self, name: &str) -> XmlResult<Scalar> {
        self.attributes
            .remove(name)
            .ok_or_else(|| XmlError::KeyNotFound(name.to_string()))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.tag.is_empty() { "<root>" } else { &self.tag };
        match &self.value {
            Value::Int(v) => write!(f, "{tag} = {v}")?,
            Value::Unsigned(v) => write!(f, "{tag} = {v}")?,
            Value::Bool(v) => write!(f, "{tag} = {v}")?,
            Value::Float(v) => write!(f, "{tag} = {v}")?,
            Value::String(v) => write!(f, "{tag} = {v:?}")?,
            Value::Nested(children) if children.is_empty() => write!(f, "{tag}")?,
            Value::Nested(children) => write!(f, "{tag} [{} nested]", children.len())?,
        }
        for (name, value) in &self.attributes {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}
