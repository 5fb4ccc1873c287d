/*!
The owning graph-node instruction model.

A [`Graph`] is an IR node that exclusively owns its instructions: a defining
instruction, ordered input/body/output lists, and a single terminator. There
is no sharing between nodes, which is what keeps both ordering and ownership
trivial to reason about. Lists are append-only; structural edits happen by
building a new node, never by splicing an existing one.

Because ownership is exclusive, `Graph` deliberately does not implement
[`Clone`]. Duplicating a node means deep-copying every instruction while
remapping its ids consistently, and that requires a [`CloneContext`] tied to
the destination module.
*/

use crate::{
    meta::Metadata, FastHashMap, Handle, Id, Module, Type, UniqueArena,
};

use smallvec::SmallVec;

use std::collections::hash_map::Entry;

/// A single instruction: an opcode, an optional result id, and the ids it
/// consumes.
///
/// Operand semantics (literal vs. id distinctions, grammar order) are the
/// concern of the producer; this model only tracks which ids an instruction
/// touches, which is all that cloning and traversal need.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
    pub op: spirv::Op,
    pub result: Option<Id>,
    pub operands: SmallVec<[Id; 4]>,
}

impl Default for Instruction {
    fn default() -> Self {
        Instruction::new(spirv::Op::Nop)
    }
}

impl Instruction {
    pub fn new(op: spirv::Op) -> Self {
        Instruction {
            op,
            result: None,
            operands: SmallVec::new(),
        }
    }

    pub fn with_result(op: spirv::Op, result: Id) -> Self {
        Instruction {
            op,
            result: Some(result),
            operands: SmallVec::new(),
        }
    }

    pub fn add_operand(&mut self, id: Id) {
        self.operands.push(id);
    }

    /// True for `OpLine` and `OpNoLine`, which only carry source locations.
    pub fn is_debug_line(&self) -> bool {
        matches!(self.op, spirv::Op::Line | spirv::Op::NoLine)
    }

    /// True for extended instruction calls.
    ///
    /// The model does not record which instruction set an `OpExtInst` names,
    /// so traversal treats every extended instruction as non-semantic.
    pub fn is_non_semantic(&self) -> bool {
        matches!(self.op, spirv::Op::ExtInst)
    }

    fn clone_in(&self, context: &mut CloneContext) -> Instruction {
        Instruction {
            op: self.op,
            result: self.result.map(|id| context.remap(id)),
            operands: self.operands.iter().map(|&id| context.remap(id)).collect(),
        }
    }
}

/// An IR node owning an ordered set of instruction lists.
#[derive(Debug, Default)]
pub struct Graph {
    /// The node's own declaration instruction.
    def: Instruction,
    inputs: Vec<Instruction>,
    body: Vec<Instruction>,
    outputs: Vec<Instruction>,
    /// The terminator, set once the node is complete.
    end: Option<Instruction>,
}

impl Graph {
    /// Create a node from its defining instruction, taking ownership of it.
    pub fn new(def: Instruction) -> Self {
        Graph {
            def,
            inputs: Vec::new(),
            body: Vec::new(),
            outputs: Vec::new(),
            end: None,
        }
    }

    pub fn def(&self) -> &Instruction {
        &self.def
    }

    /// The result id of the defining instruction, if it produces one.
    pub fn result_id(&self) -> Option<Id> {
        self.def.result
    }

    /// Append an input instruction.
    pub fn add_input(&mut self, instruction: Instruction) {
        self.inputs.push(instruction);
    }

    /// Append a body instruction.
    pub fn add_instruction(&mut self, instruction: Instruction) {
        self.body.push(instruction);
    }

    /// Append an output instruction.
    pub fn add_output(&mut self, instruction: Instruction) {
        self.outputs.push(instruction);
    }

    /// Set the terminating instruction, replacing any previous one.
    pub fn set_end(&mut self, instruction: Instruction) {
        self.end = Some(instruction);
    }

    pub fn end(&self) -> Option<&Instruction> {
        self.end.as_ref()
    }

    pub fn inputs(&self) -> &[Instruction] {
        &self.inputs
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.body
    }

    pub fn outputs(&self) -> &[Instruction] {
        &self.outputs
    }

    /// Visit owned instructions in lowering order, skipping debug-line and
    /// non-semantic instructions.
    pub fn visit<F: FnMut(&Instruction)>(&self, visitor: F) {
        self.visit_filtered(false, false, visitor)
    }

    /// Visit owned instructions in lowering order.
    ///
    /// The order is fixed: definition, then inputs, then body, then outputs,
    /// then the terminator. Downstream passes rely on this order, so it is
    /// part of the node's contract, not an implementation detail.
    /// `include_debug_lines` and `include_non_semantic` opt the matching
    /// instruction kinds into the traversal; everything else is always
    /// visited.
    pub fn visit_filtered<F: FnMut(&Instruction)>(
        &self,
        include_debug_lines: bool,
        include_non_semantic: bool,
        mut visitor: F,
    ) {
        let mut visit = |instruction: &Instruction| {
            if !include_debug_lines && instruction.is_debug_line() {
                return;
            }
            if !include_non_semantic && instruction.is_non_semantic() {
                return;
            }
            visitor(instruction);
        };
        visit(&self.def);
        for instruction in self.inputs.iter() {
            visit(instruction);
        }
        for instruction in self.body.iter() {
            visit(instruction);
        }
        for instruction in self.outputs.iter() {
            visit(instruction);
        }
        if let Some(ref end) = self.end {
            visit(end);
        }
    }

    /// Produce a fully independent deep copy of this node.
    ///
    /// Every owned instruction is cloned through `context`, so ids shared
    /// between instructions stay shared in the copy, under fresh ids drawn
    /// from the destination module's bound.
    pub fn clone_in(&self, context: &mut CloneContext) -> Graph {
        Graph {
            def: self.def.clone_in(context),
            inputs: self
                .inputs
                .iter()
                .map(|instruction| instruction.clone_in(context))
                .collect(),
            body: self
                .body
                .iter()
                .map(|instruction| instruction.clone_in(context))
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|instruction| instruction.clone_in(context))
                .collect(),
            end: self
                .end
                .as_ref()
                .map(|instruction| instruction.clone_in(context)),
        }
    }
}

/// Tracks id remapping while cloning into a destination module.
///
/// One context must span one whole clone operation: the map is what makes
/// two references to the same old id come out as the same new id.
pub struct CloneContext<'a> {
    metadata: &'a mut Metadata,
    types: &'a mut UniqueArena<Type>,
    remapped: FastHashMap<Id, Id>,
}

impl<'a> CloneContext<'a> {
    pub fn new(metadata: &'a mut Metadata, types: &'a mut UniqueArena<Type>) -> Self {
        CloneContext {
            metadata,
            types,
            remapped: FastHashMap::default(),
        }
    }

    pub fn for_module(module: &'a mut Module) -> Self {
        CloneContext {
            metadata: &mut module.metadata,
            types: &mut module.types,
            remapped: FastHashMap::default(),
        }
    }

    /// The destination id for `id`, allocating a fresh one on first sight.
    pub fn remap(&mut self, id: Id) -> Id {
        match self.remapped.entry(id) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let new = self.metadata.increase_bound_by(1);
                log::trace!("remapping {} -> {}", id, new);
                *entry.insert(new)
            }
        }
    }

    /// Clone a type from `source` into the destination module's interner.
    ///
    /// Subcomponents are cloned first, then the result is re-interned, so
    /// the clone participates in the destination's deduplication rather
    /// than the source's.
    pub fn clone_type(&mut self, source: &UniqueArena<Type>, handle: Handle<Type>) -> Handle<Type> {
        let ty = match source[handle] {
            Type::Scalar(scalar) => Type::Scalar(scalar),
            Type::Struct { ref members } => Type::Struct {
                members: members
                    .iter()
                    .map(|&member| self.clone_type(source, member))
                    .collect(),
            },
            Type::Pointer { base, space } => Type::Pointer {
                base: self.clone_type(source, base),
                space,
            },
            Type::Sampler { comparison } => Type::Sampler { comparison },
            Type::Texture { dim } => Type::Texture { dim },
            Type::StorageTexture { dim } => Type::StorageTexture { dim },
            Type::ExternalTexture => Type::ExternalTexture,
            Type::ResourceTable { element } => Type::ResourceTable {
                element: self.clone_type(source, element),
            },
            Type::Buffer { element, size } => Type::Buffer {
                element: self.clone_type(source, element),
                size,
            },
        };
        self.types.insert(ty)
    }
}
