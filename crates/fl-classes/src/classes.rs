//! The Fantasy Land algebras as type-class descriptors.
//!
//! Each class declares only the capability it adds on top of its
//! dependencies:
//!
//! | class | dependencies | capability |
//! |-------|--------------|------------|
//! | Setoid | | `equals` |
//! | Ord | Setoid | `lte` |
//! | Semigroupoid | | `compose` |
//! | Category | Semigroupoid | `id` (constructor) |
//! | Semigroup | | `concat` |
//! | Monoid | Semigroup | `empty` (constructor) |
//! | Group | Monoid | `invert` |
//! | Filterable | | `filter` |
//! | Functor | | `map` |
//! | Bifunctor | Functor | `bimap` |
//! | Profunctor | Functor | `promap` |
//! | Apply | Functor | `ap` |
//! | Applicative | Apply | `of` (constructor) |
//! | Chain | Apply | `chain` |
//! | ChainRec | Chain | `chainRec` (constructor) |
//! | Monad | Applicative, Chain | |
//! | Alt | Functor | `alt` |
//! | Plus | Alt | `zero` (constructor) |
//! | Alternative | Applicative, Plus | |
//! | Foldable | | `reduce` |
//! | Traversable | Functor, Foldable | `traverse` |
//! | Extend | Functor | `extend` |
//! | Comonad | Extend | `extract` |
//! | Contravariant | | `contramap` |

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::class::{method_class, Registry, TypeClass};
use crate::resolve::Location::{self, Constructor, Value};

/// Prefix of the standard class names.
pub const PREFIX: &str = "fl-classes/";

struct Standard {
    setoid: TypeClass,
    ord: TypeClass,
    semigroupoid: TypeClass,
    category: TypeClass,
    semigroup: TypeClass,
    monoid: TypeClass,
    group: TypeClass,
    filterable: TypeClass,
    functor: TypeClass,
    bifunctor: TypeClass,
    profunctor: TypeClass,
    apply: TypeClass,
    applicative: TypeClass,
    chain: TypeClass,
    chain_rec: TypeClass,
    monad: TypeClass,
    alt: TypeClass,
    plus: TypeClass,
    alternative: TypeClass,
    foldable: TypeClass,
    traversable: TypeClass,
    extend: TypeClass,
    comonad: TypeClass,
    contravariant: TypeClass,
    registry: Registry,
}

static STANDARD: OnceLock<Standard> = OnceLock::new();

fn standard() -> &'static Standard {
    STANDARD.get_or_init(build)
}

fn class(name: &str, dependencies: &[&TypeClass], requirements: &[(&str, Location)]) -> TypeClass {
    let methods: IndexMap<String, Location> = requirements
        .iter()
        .map(|&(capability, location)| (capability.to_string(), location))
        .collect();
    method_class(
        &format!("{PREFIX}{name}"),
        dependencies.iter().map(|&dep| dep.clone()).collect(),
        methods,
    )
}

fn build() -> Standard {
    let setoid = class("Setoid", &[], &[("equals", Value)]);
    let ord = class("Ord", &[&setoid], &[("lte", Value)]);
    let semigroupoid = class("Semigroupoid", &[], &[("compose", Value)]);
    let category = class("Category", &[&semigroupoid], &[("id", Constructor)]);
    let semigroup = class("Semigroup", &[], &[("concat", Value)]);
    let monoid = class("Monoid", &[&semigroup], &[("empty", Constructor)]);
    let group = class("Group", &[&monoid], &[("invert", Value)]);
    let filterable = class("Filterable", &[], &[("filter", Value)]);
    let functor = class("Functor", &[], &[("map", Value)]);
    let bifunctor = class("Bifunctor", &[&functor], &[("bimap", Value)]);
    let profunctor = class("Profunctor", &[&functor], &[("promap", Value)]);
    let apply = class("Apply", &[&functor], &[("ap", Value)]);
    let applicative = class("Applicative", &[&apply], &[("of", Constructor)]);
    let chain = class("Chain", &[&apply], &[("chain", Value)]);
    let chain_rec = class("ChainRec", &[&chain], &[("chainRec", Constructor)]);
    let monad = class("Monad", &[&applicative, &chain], &[]);
    let alt = class("Alt", &[&functor], &[("alt", Value)]);
    let plus = class("Plus", &[&alt], &[("zero", Constructor)]);
    let alternative = class("Alternative", &[&applicative, &plus], &[]);
    let foldable = class("Foldable", &[], &[("reduce", Value)]);
    let traversable = class("Traversable", &[&functor, &foldable], &[("traverse", Value)]);
    let extend = class("Extend", &[&functor], &[("extend", Value)]);
    let comonad = class("Comonad", &[&extend], &[("extract", Value)]);
    let contravariant = class("Contravariant", &[], &[("contramap", Value)]);

    let registry = Registry::from_unique([
        &setoid,
        &ord,
        &semigroupoid,
        &category,
        &semigroup,
        &monoid,
        &group,
        &filterable,
        &functor,
        &bifunctor,
        &profunctor,
        &apply,
        &applicative,
        &chain,
        &chain_rec,
        &monad,
        &alt,
        &plus,
        &alternative,
        &foldable,
        &traversable,
        &extend,
        &comonad,
        &contravariant,
    ]);

    Standard {
        setoid,
        ord,
        semigroupoid,
        category,
        semigroup,
        monoid,
        group,
        filterable,
        functor,
        bifunctor,
        profunctor,
        apply,
        applicative,
        chain,
        chain_rec,
        monad,
        alt,
        plus,
        alternative,
        foldable,
        traversable,
        extend,
        comonad,
        contravariant,
        registry,
    }
}

/// All standard classes, in the order of the table above.
#[must_use]
pub fn registry() -> &'static Registry {
    &standard().registry
}

macro_rules! accessors {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name() -> &'static TypeClass {
                &standard().$name
            }
        )*
    };
}

accessors! {
    /// Values with structural equality.
    setoid,
    /// Setoids with a total order.
    ord,
    /// Composable morphisms.
    semigroupoid,
    /// Semigroupoids with an identity morphism.
    category,
    /// Values with an associative combination.
    semigroup,
    /// Semigroups with an identity element.
    monoid,
    /// Monoids with inverses.
    group,
    /// Containers that can drop elements.
    filterable,
    /// Mappable containers.
    functor,
    /// Functors over two type parameters.
    bifunctor,
    /// Functors contravariant in the input and covariant in the output.
    profunctor,
    /// Functors with application of wrapped functions.
    apply,
    /// Apply with `of`.
    applicative,
    /// Apply with `chain`.
    chain,
    /// Chain with stack-safe recursion.
    chain_rec,
    /// Applicative chains.
    monad,
    /// Functors with a choice operation.
    alt,
    /// Alt with an identity element.
    plus,
    /// Applicatives with Plus.
    alternative,
    /// Containers that can be folded.
    foldable,
    /// Foldable functors that can be traversed with an applicative.
    traversable,
    /// Functors with `extend`.
    extend,
    /// Extends with `extract`.
    comonad,
    /// Contravariant functors.
    contravariant,
}
