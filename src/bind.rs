/*!
Binding generation.

[`generate_bindings`] maps every resource referenced by one entry point, via
any call chain, to its final emitted [`BindingPoint`]. The result is a fresh
[`Bindings`] table per invocation; nothing persists across calls, and the
module is only read.

## Allocation rules

Variables are visited in transitive-reference discovery order, never sorted
by binding number. With `flatten_bindings` set, each resource class draws
from its own zero-based counter, except that uniform and storage buffers
share a single buffer counter. Without flattening, ordinary resources keep
their original binding numbers unchanged.

External textures are the one resource that occupies several slots: one
logical variable expands into two texture planes plus a metadata buffer.
They are deferred to a second pass so that, in the non-flattened case, the
extra slots can be drawn from the first free binding number of the group,
past everything the entry point already binds there.
*/

use crate::{AddressSpace, BindingPoint, FastHashMap, Handle, Module, Type, UniqueArena};

/// Policy knobs for one [`generate_bindings`] invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Force every emitted group to 0, regardless of the original group.
    pub set_group_to_zero: bool,
    /// Renumber bindings into compact zero-based per-class sequences,
    /// discarding the original binding numbers.
    pub flatten_bindings: bool,
}

/// The three slots an external texture expands into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct ExternalTextureBinding {
    pub metadata: BindingPoint,
    pub plane0: BindingPoint,
    pub plane1: BindingPoint,
}

/// The computed binding table, keyed by original [`BindingPoint`].
///
/// Each map covers one resource class. Within a class the assigned binding
/// numbers are unique; under flattening they form a contiguous zero-based
/// sequence (shared between `uniform` and `storage`).
#[derive(Debug, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct Bindings {
    pub uniform: FastHashMap<BindingPoint, BindingPoint>,
    pub storage: FastHashMap<BindingPoint, BindingPoint>,
    pub texture: FastHashMap<BindingPoint, BindingPoint>,
    pub storage_texture: FastHashMap<BindingPoint, BindingPoint>,
    pub sampler: FastHashMap<BindingPoint, BindingPoint>,
    pub external_texture: FastHashMap<BindingPoint, ExternalTextureBinding>,
}

impl Bindings {
    pub fn is_empty(&self) -> bool {
        self.uniform.is_empty()
            && self.storage.is_empty()
            && self.texture.is_empty()
            && self.storage_texture.is_empty()
            && self.sampler.is_empty()
            && self.external_texture.is_empty()
    }
}

/// The resource classes a handle-space variable can resolve to.
enum HandleClass {
    Sampler,
    Texture,
    StorageTexture,
}

/// Classify a handle-space store type, drilling through resource tables to
/// their homogeneous element type.
///
/// `None` means the store type is not a bindable handle. That only happens
/// in a malformed module, which upstream validation is expected to reject.
fn handle_class(types: &UniqueArena<Type>, ty: Handle<Type>) -> Option<HandleClass> {
    match types[ty] {
        Type::Sampler { .. } => Some(HandleClass::Sampler),
        Type::Texture { .. } => Some(HandleClass::Texture),
        Type::StorageTexture { .. } => Some(HandleClass::StorageTexture),
        Type::ResourceTable { element } => handle_class(types, element),
        _ => None,
    }
}

/// Draw the next value from a flattening counter.
fn next_index(counter: &mut u32) -> u32 {
    let index = *counter;
    *counter += 1;
    index
}

/// Compute the binding table for the entry point named `entry_point`.
///
/// An absent entry point is ordinary control flow, not an error: the result
/// is simply empty, so callers can probe a module for stages it may not
/// define.
pub fn generate_bindings(module: &Module, entry_point: &str, options: &Options) -> Bindings {
    let mut bindings = Bindings::default();

    let function = match module.entry_point(entry_point) {
        Some(function) => function,
        None => {
            log::debug!("no entry point {entry_point:?}, emitting empty bindings");
            return bindings;
        }
    };

    let emit_group = |original: BindingPoint| -> u32 {
        if options.set_group_to_zero {
            0
        } else {
            original.group
        }
    };

    // Uniform and storage buffers deliberately share one counter.
    let mut next_buffer = 0;
    let mut next_texture = 0;
    let mut next_storage_texture = 0;
    let mut next_sampler = 0;

    // Per group, one past the highest binding referenced by this entry
    // point. Feeds the extra slots of non-flattened external textures.
    let mut group_next_slot = FastHashMap::<u32, u32>::default();

    let mut external_textures = Vec::new();

    for handle in module.transitive_references(function) {
        let var = &module.global_variables[handle];
        let original = match module.variable_binding_point(var) {
            Some(binding_point) => binding_point,
            None => continue,
        };

        let slot = group_next_slot.entry(original.group).or_insert(0);
        *slot = (*slot).max(original.binding + 1);

        if let Type::ExternalTexture = module.types[var.ty] {
            external_textures.push(original);
            continue;
        }

        let assign = |counter: &mut u32| BindingPoint {
            group: emit_group(original),
            binding: if options.flatten_bindings {
                next_index(counter)
            } else {
                original.binding
            },
        };

        match var.space {
            AddressSpace::Uniform => {
                bindings.uniform.insert(original, assign(&mut next_buffer));
            }
            AddressSpace::Storage => {
                bindings.storage.insert(original, assign(&mut next_buffer));
            }
            AddressSpace::Handle => match handle_class(&module.types, var.ty) {
                Some(HandleClass::Sampler) => {
                    bindings.sampler.insert(original, assign(&mut next_sampler));
                }
                Some(HandleClass::Texture) => {
                    bindings.texture.insert(original, assign(&mut next_texture));
                }
                Some(HandleClass::StorageTexture) => {
                    bindings
                        .storage_texture
                        .insert(original, assign(&mut next_storage_texture));
                }
                None => {}
            },
            // Not externally bound resources.
            AddressSpace::Undefined
            | AddressSpace::Function
            | AddressSpace::Private
            | AddressSpace::Workgroup
            | AddressSpace::Input
            | AddressSpace::Output
            | AddressSpace::Immediate
            | AddressSpace::PixelLocal => {}
        }
    }

    for original in external_textures {
        let group = emit_group(original);
        let expanded = if options.flatten_bindings {
            ExternalTextureBinding {
                metadata: BindingPoint {
                    group,
                    binding: next_index(&mut next_buffer),
                },
                plane0: BindingPoint {
                    group,
                    binding: next_index(&mut next_texture),
                },
                plane1: BindingPoint {
                    group,
                    binding: next_index(&mut next_texture),
                },
            }
        } else {
            // Plane 0 keeps the declared binding; the remaining slots take
            // the first free binding numbers of the group, plane 1 first.
            let slot = group_next_slot.entry(original.group).or_insert(0);
            ExternalTextureBinding {
                plane0: BindingPoint {
                    group,
                    binding: original.binding,
                },
                plane1: BindingPoint {
                    group,
                    binding: next_index(slot),
                },
                metadata: BindingPoint {
                    group,
                    binding: next_index(slot),
                },
            }
        };
        log::trace!(
            "external texture at {:?} expands to {:?}",
            original,
            expanded
        );
        bindings.external_texture.insert(original, expanded);
    }

    bindings
}
