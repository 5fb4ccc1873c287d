//! Tests for module-level queries and the type identity contract.

use spirv::Decoration;
use spv_ir::{
    AddressSpace, ArraySize, BindingPoint, GlobalVariable, Id, Module, Scalar, TextureDimension,
    Type,
};

use std::num::NonZeroU32;

/// Declare a struct-typed storage variable with `member_count` members.
fn struct_variable(
    module: &mut Module,
    member_count: usize,
) -> spv_ir::Handle<GlobalVariable> {
    let scalar = module.types.insert(Type::Scalar(Scalar::F32));
    let ty = module.types.insert(Type::Struct {
        members: vec![scalar; member_count],
    });
    let id = module.metadata.increase_bound_by(2);
    let ty_id = Id::new(id.get() + 1);
    module.global_variables.append(GlobalVariable {
        name: None,
        id,
        space: AddressSpace::Storage,
        ty,
        ty_id,
    })
}

#[test]
fn block_flags_require_every_member() {
    let mut module = Module::default();
    let var = struct_variable(&mut module, 2);
    let ty_id = module.global_variables[var].ty_id;

    // Only member 0 is flagged, so the block as a whole is not.
    module
        .metadata
        .set_member_decoration(ty_id, 0, Decoration::NonWritable, 0);
    assert!(!module
        .buffer_block_flags(var)
        .contains(Decoration::NonWritable));

    // Once every member carries the flag, it is promoted to the block.
    module
        .metadata
        .set_member_decoration(ty_id, 1, Decoration::NonWritable, 0);
    assert!(module
        .buffer_block_flags(var)
        .contains(Decoration::NonWritable));
}

#[test]
fn block_flags_union_variable_decorations() {
    let mut module = Module::default();
    let var = struct_variable(&mut module, 2);
    let var_id = module.global_variables[var].id;

    // A flag on the variable itself needs no member agreement.
    module
        .metadata
        .set_decoration(var_id, Decoration::Restrict, 0);
    let flags = module.buffer_block_flags(var);
    assert!(flags.contains(Decoration::Restrict));
    assert!(!flags.contains(Decoration::NonWritable));
}

#[test]
fn binding_point_requires_binding_decoration() {
    let mut module = Module::default();
    let var = struct_variable(&mut module, 1);
    let var_id = module.global_variables[var].id;

    // DescriptorSet alone does not make the variable bound.
    module
        .metadata
        .set_decoration(var_id, Decoration::DescriptorSet, 2);
    assert_eq!(
        module.variable_binding_point(&module.global_variables[var]),
        None
    );

    module.metadata.set_decoration(var_id, Decoration::Binding, 4);
    assert_eq!(
        module.variable_binding_point(&module.global_variables[var]),
        Some(BindingPoint { group: 2, binding: 4 })
    );
}

#[test]
fn binding_group_defaults_to_zero() {
    let mut module = Module::default();
    let var = struct_variable(&mut module, 1);
    let var_id = module.global_variables[var].id;

    module.metadata.set_decoration(var_id, Decoration::Binding, 1);
    assert_eq!(
        module.variable_binding_point(&module.global_variables[var]),
        Some(BindingPoint { group: 0, binding: 1 })
    );
}

#[test]
fn resource_tables_intern_by_element() {
    let mut module = Module::default();
    let texture = module.types.insert(Type::Texture {
        dim: TextureDimension::D2,
    });
    let sampler = module.types.insert(Type::Sampler { comparison: false });

    let t1 = module.types.insert(Type::ResourceTable { element: texture });
    let t2 = module.types.insert(Type::ResourceTable { element: texture });
    let t3 = module.types.insert(Type::ResourceTable { element: sampler });

    assert_eq!(t1, t2);
    assert_ne!(t1, t3);
}

#[test]
fn buffer_size_distinguishes_sized_from_runtime() {
    let mut module = Module::default();
    let element = module.types.insert(Type::Scalar(Scalar::U32));

    let sized = Type::Buffer {
        element,
        size: ArraySize::Constant(NonZeroU32::new(16).unwrap()),
    };
    let runtime_sized = Type::Buffer {
        element,
        size: ArraySize::Dynamic,
    };
    assert_eq!(sized.size(), 16);
    // 0 means "runtime sized", not "empty".
    assert_eq!(runtime_sized.size(), 0);

    assert_ne!(
        module.types.insert(sized),
        module.types.insert(runtime_sized)
    );
}

#[test]
fn handle_types_report_is_handle() {
    let mut module = Module::default();
    let element = module.types.insert(Type::Scalar(Scalar::F32));

    assert!(Type::Sampler { comparison: true }.is_handle());
    assert!(Type::Texture {
        dim: TextureDimension::Cube
    }
    .is_handle());
    assert!(Type::ExternalTexture.is_handle());
    assert!(Type::ResourceTable { element }.is_handle());

    assert!(!Type::Scalar(Scalar::F32).is_handle());
    assert!(!Type::Buffer {
        element,
        size: ArraySize::Dynamic
    }
    .is_handle());
}
