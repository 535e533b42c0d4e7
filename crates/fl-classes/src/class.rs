//! Type-class descriptors and their registry.

use std::fmt;
use std::sync::Arc;

use fl_value::{Error, Function, Result, Value};
use indexmap::IndexMap;
use tracing::debug;

use crate::resolve::{resolve, Location};

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A type class: a named membership test built on its dependencies.
///
/// A value belongs to a class if it belongs to every dependency (checked left
/// to right, stopping at the first failure) and satisfies the class's own
/// predicate. Classes declared with [`declare_method_class`] also expose an
/// accessor per capability they introduce.
///
/// Descriptors are immutable and cheap to clone.
#[derive(Clone)]
pub struct TypeClass(Arc<TypeClassInner>);

struct TypeClassInner {
    name: String,
    url: String,
    dependencies: Vec<TypeClass>,
    predicate: Predicate,
    methods: IndexMap<String, Location>,
}

impl TypeClass {
    fn from_parts(
        name: String,
        url: String,
        dependencies: Vec<TypeClass>,
        predicate: Predicate,
        methods: IndexMap<String, Location>,
    ) -> Self {
        debug!(
            class = %name,
            dependencies = dependencies.len(),
            capabilities = ?methods.keys().collect::<Vec<_>>(),
            "declared type class"
        );
        TypeClass(Arc::new(TypeClassInner {
            name,
            url,
            dependencies,
            predicate,
            methods,
        }))
    }

    /// The unique class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Documentation link.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0.url
    }

    /// Direct dependencies, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[TypeClass] {
        &self.0.dependencies
    }

    /// Returns true if `x` belongs to this class and all its dependencies.
    #[must_use]
    pub fn test(&self, x: &Value) -> bool {
        self.0.dependencies.iter().all(|dep| dep.test(x)) && (self.0.predicate)(x)
    }

    /// The capabilities this class introduces, with their locations.
    pub fn methods(&self) -> impl Iterator<Item = MethodAccessor<'_>> {
        self.0
            .methods
            .iter()
            .map(|(capability, &location)| MethodAccessor {
                capability: capability.as_str(),
                location,
            })
    }

    /// The accessor for one capability this class introduces.
    #[must_use]
    pub fn method(&self, capability: &str) -> Option<MethodAccessor<'_>> {
        let (capability, &location) = self.0.methods.get_key_value(capability)?;
        Some(MethodAccessor {
            capability: capability.as_str(),
            location,
        })
    }

    /// Every capability of this class and its ancestors.
    fn all_capabilities(&self, out: &mut Vec<String>) {
        for dep in &self.0.dependencies {
            dep.all_capabilities(out);
        }
        out.extend(self.0.methods.keys().cloned());
    }

    /// Returns true if both handles refer to the same descriptor.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeClass")
            .field("name", &self.name())
            .field(
                "dependencies",
                &self.dependencies().iter().map(TypeClass::name).collect::<Vec<_>>(),
            )
            .field("methods", &self.0.methods)
            .finish()
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves one capability of a class for a given subject.
#[derive(Clone, Copy, Debug)]
pub struct MethodAccessor<'a> {
    capability: &'a str,
    location: Location,
}

impl MethodAccessor<'_> {
    /// The capability name.
    #[must_use]
    pub fn capability(&self) -> &str {
        self.capability
    }

    /// Where the capability is looked up.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Resolves the capability on `subject`: an instance for value-level
    /// capabilities, a type representative for constructor-level ones.
    #[must_use]
    pub fn resolve(&self, subject: &Value) -> Option<Function> {
        resolve(self.capability, self.location, subject)
    }
}

// ============================================================================
// Declaration
// ============================================================================

/// Declares a class from a name, documentation link, dependencies and a
/// predicate over values.
///
/// # Errors
///
/// Returns [`Error::Declaration`] for an empty name or a dependency listed
/// twice.
pub fn declare_type_class<F>(
    name: &str,
    url: &str,
    dependencies: Vec<TypeClass>,
    predicate: F,
) -> Result<TypeClass>
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    check_header(name, &dependencies)?;
    Ok(TypeClass::from_parts(
        name.to_string(),
        url.to_string(),
        dependencies,
        Arc::new(predicate),
        IndexMap::new(),
    ))
}

/// Declares a class by the capabilities it introduces.
///
/// A value belongs to the class if every capability resolves: value-level
/// ones on the value, constructor-level ones on its type representative.
///
/// # Errors
///
/// Returns [`Error::Declaration`] for an empty name, a dependency listed
/// twice, an empty or repeated capability name, or a capability some
/// dependency already declares.
pub fn declare_method_class<'a, I>(
    name: &str,
    dependencies: Vec<TypeClass>,
    requirements: I,
) -> Result<TypeClass>
where
    I: IntoIterator<Item = (&'a str, Location)>,
{
    check_header(name, &dependencies)?;
    let mut inherited = Vec::new();
    for dep in &dependencies {
        dep.all_capabilities(&mut inherited);
    }
    let mut methods = IndexMap::new();
    for (capability, location) in requirements {
        if capability.is_empty() {
            return Err(Error::Declaration(format!(
                "{name}: capability names must not be empty"
            )));
        }
        if inherited.iter().any(|c| c == capability) {
            return Err(Error::Declaration(format!(
                "{name}: `{capability}` is already required by a dependency"
            )));
        }
        if methods.insert(capability.to_string(), location).is_some() {
            return Err(Error::Declaration(format!(
                "{name}: `{capability}` is listed twice"
            )));
        }
    }
    Ok(method_class(name, dependencies, methods))
}

/// Builds a method class from requirements already known to be valid.
pub(crate) fn method_class(
    name: &str,
    dependencies: Vec<TypeClass>,
    methods: IndexMap<String, Location>,
) -> TypeClass {
    let requirements: Vec<(String, Location)> = methods
        .iter()
        .map(|(capability, &location)| (capability.clone(), location))
        .collect();
    let predicate = move |x: &Value| {
        requirements.iter().all(|(capability, location)| {
            let subject = match location {
                Location::Value => Some(x.clone()),
                Location::Constructor => x.constructor(),
            };
            subject.is_some_and(|s| resolve(capability, *location, &s).is_some())
        })
    };
    TypeClass::from_parts(
        name.to_string(),
        documentation_url(name),
        dependencies,
        Arc::new(predicate),
        methods,
    )
}

fn documentation_url(name: &str) -> String {
    let short = name.rsplit('/').next().unwrap_or(name);
    format!(
        "https://github.com/fantasyland/fantasy-land#{}",
        short.to_lowercase()
    )
}

fn check_header(name: &str, dependencies: &[TypeClass]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Declaration("class names must not be empty".into()));
    }
    for (idx, dep) in dependencies.iter().enumerate() {
        if dependencies[..idx].iter().any(|d| d.name() == dep.name()) {
            return Err(Error::Declaration(format!(
                "{name}: dependency {} is listed twice",
                dep.name()
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Registry
// ============================================================================

/// A set of classes with unique names, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    classes: IndexMap<String, TypeClass>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from classes whose names are known to be distinct.
    pub(crate) fn from_unique<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a TypeClass>,
    {
        Registry {
            classes: classes
                .into_iter()
                .map(|class| (class.name().to_string(), class.clone()))
                .collect(),
        }
    }

    /// Adds a class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Declaration`] if a class of the same name is already
    /// registered.
    pub fn register(&mut self, class: TypeClass) -> Result<&TypeClass> {
        match self.classes.entry(class.name().to_string()) {
            indexmap::map::Entry::Occupied(entry) => Err(Error::Declaration(format!(
                "a class named {} is already registered",
                entry.key()
            ))),
            indexmap::map::Entry::Vacant(entry) => Ok(&*entry.insert(class)),
        }
    }

    /// Looks a class up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeClass> {
        self.classes.get(name)
    }

    /// The registered classes, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeClass> {
        self.classes.values()
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The classes `x` belongs to.
    pub fn classes_of<'a>(&'a self, x: &'a Value) -> impl Iterator<Item = &'a TypeClass> + 'a {
        self.iter().filter(move |class| class.test(x))
    }
}
