//! In-memory [`TypeIndex`] built programmatically or loaded from JSON.
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "fqn": "com.example.Widget",
//!       "superclass": "java.lang.Object",
//!       "interfaces": ["com.example.HasCount"],
//!       "fields": [{ "name": "count", "type": "I" }],
//!       "methods": [{ "name": "fire", "params": ["I"] }],
//!       "constructors": [{ "params": [] }]
//!     }
//!   ]
//! }
//! ```

use crate::error::Result;
use jsniscope_api::{
    ErasedType, FieldInfo, IndexResult, MethodInfo, TypeHandle, TypeIndex, TypeKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const OBJECT: &str = "java.lang.Object";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: ErasedType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ErasedType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorEntry {
    #[serde(default)]
    pub params: Vec<ErasedType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub fqn: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub constructors: Vec<ConstructorEntry>,
}

impl TypeEntry {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    fn handle(&self) -> TypeHandle {
        TypeHandle::new(self.fqn.clone(), self.kind)
    }
}

#[derive(Debug, Default, Deserialize)]
struct IndexFile {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

fn erase_all(params: &[&str]) -> Vec<ErasedType> {
    params.iter().map(|p| ErasedType::from_source_name(p)).collect()
}

/// A precomputed type index.
///
/// Can be built using a fluent API.
#[derive(Debug, Clone, Default)]
pub struct StaticTypeIndex {
    types: BTreeMap<String, TypeEntry>,
}

impl StaticTypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: IndexFile = serde_json::from_str(json)?;
        let mut index = Self::new();
        for entry in file.types {
            index.insert(entry);
        }
        Ok(index)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let index = Self::from_json_str(&json)?;
        info!(path = %path.display(), types = index.len(), "loaded type index");
        Ok(index)
    }

    pub fn insert(&mut self, entry: TypeEntry) {
        self.types.insert(entry.fqn.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn entry_mut(&mut self, fqn: &str) -> &mut TypeEntry {
        self.types
            .entry(fqn.to_string())
            .or_insert_with(|| TypeEntry::new(fqn, TypeKind::Class))
    }

    /// Add a class to the index.
    pub fn add_class(mut self, fqn: &str, superclass: Option<&str>) -> Self {
        let entry = self.entry_mut(fqn);
        entry.kind = TypeKind::Class;
        entry.superclass = superclass.map(str::to_string);
        self
    }

    /// Add an interface, with the interfaces it extends.
    pub fn add_interface(mut self, fqn: &str, extends: &[&str]) -> Self {
        let entry = self.entry_mut(fqn);
        entry.kind = TypeKind::Interface;
        entry.interfaces = extends.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn implements(mut self, fqn: &str, interface: &str) -> Self {
        self.entry_mut(fqn).interfaces.push(interface.to_string());
        self
    }

    /// Add a method; parameters use Java source spelling (`int`, `java.lang.String[]`).
    ///
    /// Class names are binary names, so a nested type is written
    /// `java.util.Map$Entry`. `java.util.Map.Entry` would be taken as a
    /// top-level class in package `java.util.Map`. The same applies to
    /// [`add_constructor`](Self::add_constructor) and [`add_field`](Self::add_field).
    pub fn add_method(mut self, type_fqn: &str, name: &str, params: &[&str]) -> Self {
        self.entry_mut(type_fqn).methods.push(MethodEntry {
            name: name.to_string(),
            params: erase_all(params),
        });
        self
    }

    /// Parameters follow [`add_method`](Self::add_method).
    pub fn add_constructor(mut self, type_fqn: &str, params: &[&str]) -> Self {
        self.entry_mut(type_fqn).constructors.push(ConstructorEntry {
            params: erase_all(params),
        });
        self
    }

    /// The field type is a binary name, as for [`add_method`](Self::add_method).
    pub fn add_field(mut self, type_fqn: &str, name: &str, field_type: &str) -> Self {
        self.entry_mut(type_fqn).fields.push(FieldEntry {
            name: name.to_string(),
            field_type: ErasedType::from_source_name(field_type),
        });
        self
    }

    fn handle_of(&self, fqn: &str) -> Option<TypeHandle> {
        self.types.get(fqn).map(TypeEntry::handle)
    }
}

impl TypeIndex for StaticTypeIndex {
    fn find_type(&self, fqn: &str) -> IndexResult<Option<TypeHandle>> {
        Ok(self.handle_of(fqn))
    }

    fn superclass(&self, ty: &TypeHandle) -> IndexResult<Option<TypeHandle>> {
        let Some(entry) = self.types.get(&ty.fqn) else {
            return Ok(None);
        };
        if let Some(sup) = &entry.superclass {
            return Ok(self.handle_of(sup));
        }
        // Classes without an explicit superclass extend Object, if it is indexed.
        if matches!(entry.kind, TypeKind::Class | TypeKind::Enum) && entry.fqn != OBJECT {
            return Ok(self.handle_of(OBJECT));
        }
        Ok(None)
    }

    fn interfaces(&self, ty: &TypeHandle) -> IndexResult<Vec<TypeHandle>> {
        Ok(self
            .types
            .get(&ty.fqn)
            .map(|e| e.interfaces.iter().filter_map(|i| self.handle_of(i)).collect())
            .unwrap_or_default())
    }

    fn constructors(&self, ty: &TypeHandle) -> IndexResult<Vec<MethodInfo>> {
        Ok(self
            .types
            .get(&ty.fqn)
            .map(|e| {
                e.constructors
                    .iter()
                    .map(|c| MethodInfo::constructor(e.fqn.clone(), c.params.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn methods(&self, ty: &TypeHandle, name: &str) -> IndexResult<Vec<MethodInfo>> {
        Ok(self
            .types
            .get(&ty.fqn)
            .map(|e| {
                e.methods
                    .iter()
                    .filter(|m| m.name == name)
                    .map(|m| MethodInfo::method(e.fqn.clone(), m.name.clone(), m.params.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fields(&self, ty: &TypeHandle, name: &str) -> IndexResult<Vec<FieldInfo>> {
        Ok(self
            .types
            .get(&ty.fqn)
            .map(|e| {
                e.fields
                    .iter()
                    .filter(|f| f.name == name)
                    .map(|f| FieldInfo {
                        name: f.name.clone(),
                        declaring_type: e.fqn.clone(),
                        field_type: f.field_type.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
