/*!
Typed intermediate representation for SPIR-V resource analysis.

This crate implements the data structures a shader translation pipeline needs
between parsing and code generation: a dense numeric [`Id`] namespace with
per-Id metadata side tables, a decoration store in the style of a compiler
attribute table, an owning graph-node instruction model, an interned type
arena, and the binding generator that maps every resource referenced by an
entry point to its final `(group, binding)` coordinates.

## Id spaces

There are two kinds of indices in this crate, and they are deliberately kept
apart:

- [`Id`] is the module-wide SPIR-V result-id namespace. Every entity that can
  carry decorations (variables, types, functions, instructions) is named by an
  `Id`, and the [`Metadata`] side tables are indexed by it. Ids are allocated
  by [`Metadata::increase_bound_by`] and never reused.
- [`Handle<T>`](Handle) is a strongly-typed index into one specific
  [`Arena`] or [`UniqueArena`]. Handles are how structures refer to each
  other; they carry no metadata of their own.

## Binding model

[`bind::generate_bindings`] walks the transitive set of module-scope variables
referenced by one entry point and assigns each an output [`BindingPoint`],
either preserving the original numbers or flattening every resource class into
a compact zero-based sequence. External (multi-planar) textures expand into
two texture planes plus a metadata buffer. See the [`bind`] module docs for
the allocation rules.

[`Metadata`]: meta::Metadata
*/

mod arena;
pub mod bind;
pub mod graph;
pub mod meta;
mod non_max_u32;

pub use crate::arena::{Arena, BadHandle, Handle, HandleSet, UniqueArena};

use std::{fmt, hash::BuildHasherDefault, num::NonZeroU32};

/// Hash map used internally, with a faster non-cryptographic hasher.
pub type FastHashMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<fxhash::FxHasher>>;
/// Hash set used internally, with a faster non-cryptographic hasher.
pub type FastHashSet<K> = std::collections::HashSet<K, BuildHasherDefault<fxhash::FxHasher>>;
/// Insertion-ordered set used by the type interner.
pub(crate) type FastIndexSet<T> =
    indexmap::IndexSet<T, BuildHasherDefault<fxhash::FxHasher>>;

/// A module-wide SPIR-V result id.
///
/// Ids are dense non-negative integers naming any entity in the module. The
/// valid range is `0 .. bound`, where the bound is managed by
/// [`meta::Metadata`]. Unlike [`Handle`], an `Id` is untyped: the same
/// namespace covers variables, types, functions and instructions, which is
/// what lets the decoration side tables be indexed uniformly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    pub const fn new(value: u32) -> Self {
        Id(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "%{}", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "%{}", self.0)
    }
}

/// A descriptor-set group and binding index pair identifying a resource slot.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct BindingPoint {
    pub group: u32,
    pub binding: u32,
}

/// The address space a module-scope variable lives in.
///
/// Only [`Uniform`], [`Storage`] and [`Handle`] variables are externally
/// bindable; the remaining spaces are ignored by binding generation.
///
/// [`Uniform`]: AddressSpace::Uniform
/// [`Storage`]: AddressSpace::Storage
/// [`Handle`]: AddressSpace::Handle
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum AddressSpace {
    #[default]
    Undefined,
    Function,
    Private,
    Workgroup,
    Uniform,
    Storage,
    /// Opaque handles: textures, samplers, and resource tables.
    Handle,
    Input,
    Output,
    Immediate,
    PixelLocal,
}

/// Stages of a shader entry point.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

/// Primitive scalar kind.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum ScalarKind {
    Sint,
    Uint,
    Float,
    Bool,
}

/// Characteristics of a scalar type.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct Scalar {
    pub kind: ScalarKind,
    /// Size of the value in bytes.
    pub width: u8,
}

impl Scalar {
    pub const F32: Scalar = Scalar {
        kind: ScalarKind::Float,
        width: 4,
    };
    pub const I32: Scalar = Scalar {
        kind: ScalarKind::Sint,
        width: 4,
    };
    pub const U32: Scalar = Scalar {
        kind: ScalarKind::Uint,
        width: 4,
    };
}

/// The dimensionality of a texture type.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum TextureDimension {
    D1,
    D2,
    D2Array,
    D3,
    Cube,
    CubeArray,
}

/// The number of elements in a buffer type.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum ArraySize {
    /// The buffer holds a known constant number of elements.
    Constant(NonZeroU32),
    /// The element count is only known at runtime.
    Dynamic,
}

/// A type in the module.
///
/// Types are stored in a [`UniqueArena`], so every distinct structural shape
/// exists exactly once and two equal handles always name pointer-identical
/// contents. Equality and hashing are purely structural: they compare the
/// component handles, which is valid precisely because every subcomponent was
/// interned first. Names, when a type has one, live in the metadata store
/// under the type's [`Id`], not here, so that naming never perturbs identity.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Type {
    Scalar(Scalar),
    /// An aggregate with ordered member types.
    ///
    /// Member names, offsets and per-member flags are kept in the metadata
    /// store, keyed by the struct type's `Id` and the member index.
    Struct { members: Vec<Handle<Type>> },
    Pointer {
        base: Handle<Type>,
        space: AddressSpace,
    },
    Sampler { comparison: bool },
    Texture { dim: TextureDimension },
    StorageTexture { dim: TextureDimension },
    /// A multi-planar external texture. One logical resource that expands
    /// into two texture planes and a parameter buffer when bound.
    ExternalTexture,
    /// An unbounded table of homogeneous resources.
    ResourceTable { element: Handle<Type> },
    /// A raw buffer of `size` elements.
    Buffer {
        element: Handle<Type>,
        size: ArraySize,
    },
}

impl Type {
    /// The constant element count of a buffer, or 0 when the count is only
    /// known at runtime.
    ///
    /// A result of 0 means "unsized", never "empty"; check [`ArraySize`]
    /// directly if the distinction matters. Non-buffer types report 0.
    pub const fn size(&self) -> u32 {
        match *self {
            Type::Buffer {
                size: ArraySize::Constant(count),
                ..
            } => count.get(),
            _ => 0,
        }
    }

    /// Whether this type is an opaque handle, never given a memory layout.
    pub const fn is_handle(&self) -> bool {
        matches!(
            *self,
            Type::Sampler { .. }
                | Type::Texture { .. }
                | Type::StorageTexture { .. }
                | Type::ExternalTexture
                | Type::ResourceTable { .. }
        )
    }

    /// The homogeneous element type of a resource table.
    ///
    /// A resource table is logically an unbounded array of one element type,
    /// so there is no per-index variation to query.
    pub const fn resource_element(&self) -> Option<Handle<Type>> {
        match *self {
            Type::ResourceTable { element } => Some(element),
            _ => None,
        }
    }
}

/// A module-scope variable declaration.
#[derive(Clone, Debug)]
pub struct GlobalVariable {
    pub name: Option<String>,
    /// The result id of the variable itself; decorations such as `Binding`
    /// and `DescriptorSet` are attached to this id.
    pub id: Id,
    pub space: AddressSpace,
    /// The store type of the variable (what a pointer to it dereferences to).
    pub ty: Handle<Type>,
    /// The result id of the declared type, used to look up member
    /// decorations of struct-typed buffers.
    pub ty_id: Id,
}

/// A function in the module.
#[derive(Debug, Default)]
pub struct Function {
    pub name: Option<String>,
    /// `Some` iff this function is an entry point.
    pub stage: Option<ShaderStage>,
    /// The function body in graph-node form.
    pub body: graph::Graph,
    /// Module-scope variables referenced directly by the body, in first-use
    /// order.
    pub references: Vec<Handle<GlobalVariable>>,
    /// Functions called directly by the body, in call order.
    pub calls: Vec<Handle<Function>>,
}

/// A translation unit: arenas of entities plus the Id-indexed side tables.
#[derive(Debug, Default)]
pub struct Module {
    pub types: UniqueArena<Type>,
    pub global_variables: Arena<GlobalVariable>,
    pub functions: Arena<Function>,
    pub metadata: meta::Metadata,
}

impl Module {
    /// Find the entry point function named `name`.
    ///
    /// Only functions flagged as entry points are considered; a plain
    /// function that happens to share the name is not a match.
    pub fn entry_point(&self, name: &str) -> Option<Handle<Function>> {
        self.functions
            .iter()
            .filter(|&(_, fun)| fun.stage.is_some())
            .find(|&(_, fun)| fun.name.as_deref() == Some(name))
            .map(|(handle, _)| handle)
    }

    /// The set of module-scope variables reachable from `function` through
    /// any call chain, in discovery order.
    ///
    /// The order is deterministic: a function's direct references come first,
    /// in declaration-use order, followed by the references of each callee,
    /// depth first. Each variable appears once, at its first discovery.
    pub fn transitive_references(
        &self,
        function: Handle<Function>,
    ) -> Vec<Handle<GlobalVariable>> {
        let mut seen_vars = HandleSet::for_arena(&self.global_variables);
        let mut seen_funs = HandleSet::for_arena(&self.functions);
        let mut references = Vec::new();
        seen_funs.insert(function);
        self.collect_references(function, &mut seen_funs, &mut seen_vars, &mut references);
        references
    }

    fn collect_references(
        &self,
        function: Handle<Function>,
        seen_funs: &mut HandleSet<Function>,
        seen_vars: &mut HandleSet<GlobalVariable>,
        references: &mut Vec<Handle<GlobalVariable>>,
    ) {
        let fun = &self.functions[function];
        for &var in fun.references.iter() {
            if seen_vars.insert(var) {
                references.push(var);
            }
        }
        for &callee in fun.calls.iter() {
            if seen_funs.insert(callee) {
                self.collect_references(callee, seen_funs, seen_vars, references);
            }
        }
    }

    /// The explicit binding point of `var`, if it has one.
    ///
    /// A variable is considered bound iff it carries a `Binding` decoration.
    /// The group falls back to 0 when no `DescriptorSet` decoration is
    /// present, consistent with the sentinel-default lookup contract.
    pub fn variable_binding_point(&self, var: &GlobalVariable) -> Option<BindingPoint> {
        use spirv::Decoration as Dec;
        if !self.metadata.has_decoration(var.id, Dec::Binding) {
            return None;
        }
        Some(BindingPoint {
            group: self.metadata.get_decoration(var.id, Dec::DescriptorSet),
            binding: self.metadata.get_decoration(var.id, Dec::Binding),
        })
    }

    /// The effective decoration set of a struct-typed buffer variable.
    ///
    /// Flags like `NonWritable` are often attached per member rather than on
    /// the variable. A member-level flag is promoted to the block level only
    /// if *every* member carries it; the promoted flags are then unioned
    /// with the variable's own decorations.
    pub fn buffer_block_flags(&self, var: Handle<GlobalVariable>) -> meta::DecorationSet {
        let var = &self.global_variables[var];
        let mut flags = self.metadata.decoration_set(var.id).clone();

        let members = match self.types[var.ty] {
            Type::Struct { ref members } => members,
            _ => return flags,
        };
        if members.is_empty() {
            return flags;
        }

        let mut all_members = self.metadata.member_decoration_set(var.ty_id, 0).clone();
        for index in 1..members.len() as u32 {
            all_members.merge_and(self.metadata.member_decoration_set(var.ty_id, index));
        }

        flags.merge_or(&all_members);
        flags
    }
}
