/*!
Per-[`Id`] decoration and name tracking.

This is the module's attribute table: every id can carry a record of numeric
and string decorations, an identifier alias, and (for struct types) a vector
of per-member records of the same shape. Records are created lazily on first
write and persist for the lifetime of the module.

Lookups here are total. Asking for a decoration that was never set, or for an
id or member index that is out of range, yields a kind-appropriate default
rather than an error; the [`has_decoration`] family exists for callers that
must distinguish "explicitly zero" from "absent". Structural validation of
the module is the job of an upstream checker, not of this table.

[`has_decoration`]: Metadata::has_decoration
*/

use crate::Id;

use spirv::Decoration;

use std::sync::OnceLock;

/// A set of decoration kinds.
///
/// The decoration space is sparse: core kinds are small integers, but vendor
/// extensions reach past 5000, so presence is tracked with a growable bitset
/// rather than a fixed-width word.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecorationSet {
    bits: bit_set::BitSet,
}

impl DecorationSet {
    pub fn contains(&self, decoration: Decoration) -> bool {
        self.bits.contains(decoration as usize)
    }

    pub fn insert(&mut self, decoration: Decoration) {
        self.bits.insert(decoration as usize);
    }

    pub fn remove(&mut self, decoration: Decoration) {
        self.bits.remove(decoration as usize);
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Keep only the kinds present in both `self` and `other`.
    pub fn merge_and(&mut self, other: &DecorationSet) {
        self.bits.intersect_with(&other.bits);
    }

    /// Add every kind present in `other`.
    pub fn merge_or(&mut self, other: &DecorationSet) {
        self.bits.union_with(&other.bits);
    }
}

/// The decoration values attached to one id or one struct member.
///
/// A value is meaningful only when the corresponding kind is present in
/// `flags`; clearing a decoration resets the value to its default so stale
/// data can never leak through a presence check.
#[derive(Clone, Debug, Default)]
pub struct Decorations {
    pub flags: DecorationSet,
    /// Sanitized identifier, or empty when unnamed.
    pub alias: String,
    pub builtin: Option<spirv::BuiltIn>,
    pub location: u32,
    pub component: u32,
    pub set: u32,
    pub binding: u32,
    pub offset: u32,
    pub index: u32,
    pub input_attachment: u32,
    pub spec_id: u32,
    pub array_stride: u32,
    pub matrix_stride: u32,
    /// `None` stands in for the "max" sentinel of the SPIR-V enum.
    pub fp_rounding_mode: Option<spirv::FPRoundingMode>,
    pub hlsl_semantic: String,
}

bitflags::bitflags! {
    /// Structural markers for control-flow blocks, kept per id.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct BlockMetaFlags: u8 {
        const LOOP_HEADER = 0x1;
        const CONTINUE = 0x2;
        const LOOP_MERGE = 0x4;
        const SELECTION_MERGE = 0x8;
        const MULTISELECT_MERGE = 0x10;
    }
}

/// Everything tracked for a single id.
#[derive(Clone, Debug, Default)]
pub struct Meta {
    pub decoration: Decorations,
    /// Per-member records, grown on demand and never shrunk.
    pub members: Vec<Decorations>,
    /// Forward link to the buffer holding this resource's counter.
    pub counter_buffer: Option<Id>,
    /// Set on the target of some other id's `counter_buffer` link.
    pub is_counter_buffer: bool,
}

/// The id bound and all per-id side tables of a module.
///
/// All side tables have identical length, and that length is the id bound:
/// every id below the bound has a (possibly empty) record in each table.
/// [`increase_bound_by`] and [`set_id_bounds`] resize every table in
/// lockstep, so indices held across either call must be re-validated against
/// the new bound.
///
/// [`increase_bound_by`]: Metadata::increase_bound_by
/// [`set_id_bounds`]: Metadata::set_id_bounds
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    meta: Vec<Meta>,
    block_meta: Vec<BlockMetaFlags>,
}

fn empty_set() -> &'static DecorationSet {
    static EMPTY: OnceLock<DecorationSet> = OnceLock::new();
    EMPTY.get_or_init(DecorationSet::default)
}

/// Strip a possibly mangled or otherwise hostile name down to a valid
/// identifier.
fn ensure_valid_identifier(name: &str, member: bool) -> String {
    // glslang mangles function names as `name(<params>`. A '(' can never
    // appear in a legal identifier, so drop it and everything after it.
    let base = match name.find('(') {
        Some(position) => &name[..position],
        None => name,
    };

    let leading_m = base.starts_with("_m");
    let leading_underscore = base.starts_with('_');

    base.chars()
        .enumerate()
        .map(|(i, c)| {
            let must_be_alpha = if member {
                // `_m<num>` names are reserved for unnamed members.
                i == 0 || (i == 2 && leading_m)
            } else {
                // `_<num>` names are reserved for temporaries.
                i == 0 || (i == 1 && leading_underscore)
            };
            if must_be_alpha {
                if c.is_ascii_alphabetic() {
                    c
                } else {
                    '_'
                }
            } else if c.is_ascii_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// True if `name` matches the pattern reserved for auto-generated
/// temporaries: an underscore followed by a digit.
fn is_reserved_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0] == b'_' && bytes[1].is_ascii_digit()
}

/// True if `name` matches the pattern reserved for auto-generated unnamed
/// members: `_m` followed by a digit.
fn is_reserved_member_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'_' && bytes[1] == b'm' && bytes[2].is_ascii_digit()
}

impl Metadata {
    /// The current id bound. Every valid id is strictly below it.
    pub fn bound(&self) -> u32 {
        self.meta.len() as u32
    }

    /// Set the absolute id bound, resizing every side table to match.
    ///
    /// Used when bulk-loading a module whose maximum id is known up front.
    pub fn set_id_bounds(&mut self, bound: u32) {
        self.meta.resize_with(bound as usize, Meta::default);
        self.block_meta.resize(bound as usize, BlockMetaFlags::empty());
    }

    /// Reserve `count` fresh ids, returning the first one.
    ///
    /// Every side table grows to the new bound. Overflowing the 32-bit id
    /// space is an internal invariant violation and aborts.
    pub fn increase_bound_by(&mut self, count: u32) -> Id {
        let first = self.bound();
        let new_bound = first
            .checked_add(count)
            .expect("Failed to allocate ids. Id bound overflows");
        self.set_id_bounds(new_bound);
        Id::new(first)
    }

    fn meta(&self, id: Id) -> Option<&Meta> {
        self.meta.get(id.index())
    }

    /// Get the record for `id`, growing the side tables if it does not exist
    /// yet.
    fn meta_mut(&mut self, id: Id) -> &mut Meta {
        if id.index() >= self.meta.len() {
            self.set_id_bounds(id.get() + 1);
        }
        &mut self.meta[id.index()]
    }

    fn member_mut(&mut self, id: Id, index: u32) -> &mut Decorations {
        let members = &mut self.meta_mut(id).members;
        if members.len() < index as usize + 1 {
            members.resize_with(index as usize + 1, Decorations::default);
        }
        &mut members[index as usize]
    }

    fn member(&self, id: Id, index: u32) -> Option<&Decorations> {
        self.meta(id)?.members.get(index as usize)
    }

    /// Attach a numeric decoration to `id`.
    pub fn set_decoration(&mut self, id: Id, decoration: Decoration, argument: u32) {
        if let Decoration::HlslCounterBufferGOOGLE = decoration {
            let counter = Id::new(argument);
            let meta = self.meta_mut(id);
            meta.decoration.flags.insert(decoration);
            meta.counter_buffer = Some(counter);
            self.meta_mut(counter).is_counter_buffer = true;
            return;
        }

        let dec = &mut self.meta_mut(id).decoration;
        dec.flags.insert(decoration);

        match decoration {
            Decoration::BuiltIn => dec.builtin = spirv::BuiltIn::from_u32(argument),
            Decoration::Location => dec.location = argument,
            Decoration::Component => dec.component = argument,
            Decoration::Offset => dec.offset = argument,
            Decoration::ArrayStride => dec.array_stride = argument,
            Decoration::MatrixStride => dec.matrix_stride = argument,
            Decoration::Binding => dec.binding = argument,
            Decoration::DescriptorSet => dec.set = argument,
            Decoration::InputAttachmentIndex => dec.input_attachment = argument,
            Decoration::SpecId => dec.spec_id = argument,
            Decoration::Index => dec.index = argument,
            Decoration::FPRoundingMode => {
                dec.fp_rounding_mode = spirv::FPRoundingMode::from_u32(argument)
            }
            _ => {}
        }
    }

    /// Attach a numeric decoration to member `index` of `id`.
    ///
    /// The member vector is grown to cover `index`; intervening members get
    /// default (absent) records.
    pub fn set_member_decoration(
        &mut self,
        id: Id,
        index: u32,
        decoration: Decoration,
        argument: u32,
    ) {
        let dec = self.member_mut(id, index);
        dec.flags.insert(decoration);

        match decoration {
            Decoration::BuiltIn => dec.builtin = spirv::BuiltIn::from_u32(argument),
            Decoration::Location => dec.location = argument,
            Decoration::Component => dec.component = argument,
            Decoration::Binding => dec.binding = argument,
            Decoration::Offset => dec.offset = argument,
            Decoration::SpecId => dec.spec_id = argument,
            Decoration::MatrixStride => dec.matrix_stride = argument,
            Decoration::Index => dec.index = argument,
            _ => {}
        }
    }

    /// Attach a string-valued decoration to `id`.
    pub fn set_decoration_string(&mut self, id: Id, decoration: Decoration, argument: &str) {
        let dec = &mut self.meta_mut(id).decoration;
        dec.flags.insert(decoration);

        match decoration {
            Decoration::HlslSemanticGOOGLE => dec.hlsl_semantic = argument.to_string(),
            _ => {}
        }
    }

    /// Attach a string-valued decoration to member `index` of `id`.
    pub fn set_member_decoration_string(
        &mut self,
        id: Id,
        index: u32,
        decoration: Decoration,
        argument: &str,
    ) {
        let dec = self.member_mut(id, index);
        dec.flags.insert(decoration);

        match decoration {
            Decoration::HlslSemanticGOOGLE => dec.hlsl_semantic = argument.to_string(),
            _ => {}
        }
    }

    /// The numeric value of a decoration on `id`.
    ///
    /// Returns 0 when the decoration is absent, and 1 for kinds that are
    /// present but carry no value. Use [`has_decoration`] first when
    /// "explicitly zero" and "absent" must be told apart.
    ///
    /// [`has_decoration`]: Metadata::has_decoration
    pub fn get_decoration(&self, id: Id, decoration: Decoration) -> u32 {
        let dec = match self.meta(id) {
            Some(meta) => &meta.decoration,
            None => return 0,
        };
        if !dec.flags.contains(decoration) {
            return 0;
        }

        match decoration {
            Decoration::BuiltIn => dec.builtin.map_or(0, |b| b as u32),
            Decoration::Location => dec.location,
            Decoration::Component => dec.component,
            Decoration::Offset => dec.offset,
            Decoration::Binding => dec.binding,
            Decoration::DescriptorSet => dec.set,
            Decoration::InputAttachmentIndex => dec.input_attachment,
            Decoration::SpecId => dec.spec_id,
            Decoration::ArrayStride => dec.array_stride,
            Decoration::MatrixStride => dec.matrix_stride,
            Decoration::Index => dec.index,
            Decoration::FPRoundingMode => dec.fp_rounding_mode.map_or(0, |mode| mode as u32),
            _ => 1,
        }
    }

    /// The numeric value of a decoration on member `index` of `id`, with the
    /// same sentinel rules as [`get_decoration`].
    ///
    /// [`get_decoration`]: Metadata::get_decoration
    pub fn get_member_decoration(&self, id: Id, index: u32, decoration: Decoration) -> u32 {
        let dec = match self.member(id, index) {
            Some(dec) => dec,
            None => return 0,
        };
        if !dec.flags.contains(decoration) {
            return 0;
        }

        match decoration {
            Decoration::BuiltIn => dec.builtin.map_or(0, |b| b as u32),
            Decoration::Location => dec.location,
            Decoration::Component => dec.component,
            Decoration::Binding => dec.binding,
            Decoration::Offset => dec.offset,
            Decoration::SpecId => dec.spec_id,
            Decoration::Index => dec.index,
            _ => 1,
        }
    }

    /// The string value of a decoration on `id`, or `""` when absent.
    pub fn get_decoration_string(&self, id: Id, decoration: Decoration) -> &str {
        let dec = match self.meta(id) {
            Some(meta) => &meta.decoration,
            None => return "",
        };
        if !dec.flags.contains(decoration) {
            return "";
        }

        match decoration {
            Decoration::HlslSemanticGOOGLE => &dec.hlsl_semantic,
            _ => "",
        }
    }

    /// The string value of a decoration on member `index` of `id`, or `""`
    /// when absent.
    pub fn get_member_decoration_string(
        &self,
        id: Id,
        index: u32,
        decoration: Decoration,
    ) -> &str {
        let dec = match self.member(id, index) {
            Some(dec) => dec,
            None => return "",
        };
        if !dec.flags.contains(decoration) {
            return "";
        }

        match decoration {
            Decoration::HlslSemanticGOOGLE => &dec.hlsl_semantic,
            _ => "",
        }
    }

    pub fn has_decoration(&self, id: Id, decoration: Decoration) -> bool {
        self.decoration_set(id).contains(decoration)
    }

    pub fn has_member_decoration(&self, id: Id, index: u32, decoration: Decoration) -> bool {
        self.member_decoration_set(id, index).contains(decoration)
    }

    /// Remove a decoration from `id`, resetting its value to the default.
    ///
    /// Unsetting the counter-buffer link also clears the reverse flag on the
    /// linked buffer, keeping the bidirectional link consistent.
    pub fn unset_decoration(&mut self, id: Id, decoration: Decoration) {
        if let Decoration::HlslCounterBufferGOOGLE = decoration {
            let meta = self.meta_mut(id);
            meta.decoration.flags.remove(decoration);
            if let Some(counter) = meta.counter_buffer.take() {
                self.meta_mut(counter).is_counter_buffer = false;
            }
            return;
        }

        let dec = &mut self.meta_mut(id).decoration;
        dec.flags.remove(decoration);

        match decoration {
            Decoration::BuiltIn => dec.builtin = None,
            Decoration::Location => dec.location = 0,
            Decoration::Component => dec.component = 0,
            Decoration::Offset => dec.offset = 0,
            Decoration::ArrayStride => dec.array_stride = 0,
            Decoration::MatrixStride => dec.matrix_stride = 0,
            Decoration::Binding => dec.binding = 0,
            Decoration::DescriptorSet => dec.set = 0,
            Decoration::InputAttachmentIndex => dec.input_attachment = 0,
            Decoration::SpecId => dec.spec_id = 0,
            Decoration::Index => dec.index = 0,
            Decoration::FPRoundingMode => dec.fp_rounding_mode = None,
            Decoration::HlslSemanticGOOGLE => dec.hlsl_semantic.clear(),
            _ => {}
        }
    }

    /// Remove a decoration from member `index` of `id`.
    pub fn unset_member_decoration(&mut self, id: Id, index: u32, decoration: Decoration) {
        let dec = match self
            .meta
            .get_mut(id.index())
            .and_then(|meta| meta.members.get_mut(index as usize))
        {
            Some(dec) => dec,
            None => return,
        };
        dec.flags.remove(decoration);

        match decoration {
            Decoration::BuiltIn => dec.builtin = None,
            Decoration::Location => dec.location = 0,
            Decoration::Component => dec.component = 0,
            Decoration::Binding => dec.binding = 0,
            Decoration::Offset => dec.offset = 0,
            Decoration::SpecId => dec.spec_id = 0,
            Decoration::MatrixStride => dec.matrix_stride = 0,
            Decoration::Index => dec.index = 0,
            Decoration::HlslSemanticGOOGLE => dec.hlsl_semantic.clear(),
            _ => {}
        }
    }

    /// The full set of decoration kinds present on `id`.
    pub fn decoration_set(&self, id: Id) -> &DecorationSet {
        match self.meta(id) {
            Some(meta) => &meta.decoration.flags,
            None => empty_set(),
        }
    }

    /// The full set of decoration kinds present on member `index` of `id`.
    pub fn member_decoration_set(&self, id: Id, index: u32) -> &DecorationSet {
        match self.member(id, index) {
            Some(dec) => &dec.flags,
            None => empty_set(),
        }
    }

    /// The forward counter-buffer link of `id`, if any.
    pub fn counter_buffer(&self, id: Id) -> Option<Id> {
        self.meta(id)?.counter_buffer
    }

    /// Whether `id` is the target of some resource's counter-buffer link.
    pub fn is_counter_buffer(&self, id: Id) -> bool {
        self.meta(id).is_some_and(|meta| meta.is_counter_buffer)
    }

    /// Set the identifier of `id`, sanitizing it first.
    ///
    /// Any previously stored name is cleared, even when the new one is
    /// rejected for matching a reserved auto-generated pattern.
    pub fn set_name(&mut self, id: Id, name: &str) {
        let alias = &mut self.meta_mut(id).decoration.alias;
        alias.clear();

        if name.is_empty() || is_reserved_name(name) {
            return;
        }

        *alias = ensure_valid_identifier(name, false);
    }

    /// Set the identifier of member `index` of `id`, sanitizing it first.
    pub fn set_member_name(&mut self, id: Id, index: u32, name: &str) {
        let alias = &mut self.member_mut(id, index).alias;
        alias.clear();

        if name.is_empty() || is_reserved_member_name(name) {
            return;
        }

        *alias = ensure_valid_identifier(name, true);
    }

    /// The identifier of `id`, or `""` when unnamed.
    pub fn get_name(&self, id: Id) -> &str {
        match self.meta(id) {
            Some(meta) => &meta.decoration.alias,
            None => "",
        }
    }

    /// The identifier of member `index` of `id`, or `""` when unnamed.
    pub fn get_member_name(&self, id: Id, index: u32) -> &str {
        match self.member(id, index) {
            Some(dec) => &dec.alias,
            None => "",
        }
    }

    /// The control-flow markers of `id`.
    pub fn block_meta(&self, id: Id) -> BlockMetaFlags {
        self.block_meta
            .get(id.index())
            .copied()
            .unwrap_or_else(BlockMetaFlags::empty)
    }

    /// Add control-flow markers to `id`.
    pub fn add_block_meta(&mut self, id: Id, flags: BlockMetaFlags) {
        // Touch the decoration table first so both tables grow in lockstep.
        let _ = self.meta_mut(id);
        self.block_meta[id.index()] |= flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_unset_roundtrip() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_decoration(id, Decoration::Binding, 7);
        assert!(metadata.has_decoration(id, Decoration::Binding));
        assert_eq!(metadata.get_decoration(id, Decoration::Binding), 7);

        metadata.unset_decoration(id, Decoration::Binding);
        assert!(!metadata.has_decoration(id, Decoration::Binding));
        assert_eq!(metadata.get_decoration(id, Decoration::Binding), 0);
    }

    #[test]
    fn absent_versus_explicit_zero() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        assert_eq!(metadata.get_decoration(id, Decoration::Location), 0);
        assert!(!metadata.has_decoration(id, Decoration::Location));

        metadata.set_decoration(id, Decoration::Location, 0);
        assert_eq!(metadata.get_decoration(id, Decoration::Location), 0);
        assert!(metadata.has_decoration(id, Decoration::Location));
    }

    #[test]
    fn valueless_decorations_read_back_as_one() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_decoration(id, Decoration::NonWritable, 0);
        assert_eq!(metadata.get_decoration(id, Decoration::NonWritable), 1);
    }

    #[test]
    fn member_vector_grows_but_never_shrinks() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_member_decoration(id, 5, Decoration::Offset, 16);
        assert_eq!(metadata.get_member_decoration(id, 5, Decoration::Offset), 16);
        for index in 0..5 {
            assert!(metadata.member_decoration_set(id, index).is_empty());
        }

        metadata.set_member_decoration(id, 1, Decoration::Offset, 4);
        assert_eq!(metadata.get_member_decoration(id, 5, Decoration::Offset), 16);
    }

    #[test]
    fn out_of_range_lookups_are_total() {
        let metadata = Metadata::default();
        let id = Id::new(1234);
        assert_eq!(metadata.get_decoration(id, Decoration::Binding), 0);
        assert_eq!(metadata.get_member_decoration(id, 3, Decoration::Offset), 0);
        assert_eq!(metadata.get_name(id), "");
        assert_eq!(metadata.get_member_name(id, 3), "");
        assert!(metadata.decoration_set(id).is_empty());
    }

    #[test]
    fn bound_grows_in_lockstep() {
        let mut metadata = Metadata::default();
        metadata.set_id_bounds(4);
        assert_eq!(metadata.bound(), 4);

        let first = metadata.increase_bound_by(3);
        assert_eq!(first, Id::new(4));
        assert_eq!(metadata.bound(), 7);

        metadata.add_block_meta(Id::new(6), BlockMetaFlags::LOOP_HEADER);
        assert_eq!(
            metadata.block_meta(Id::new(6)),
            BlockMetaFlags::LOOP_HEADER
        );
        assert_eq!(metadata.block_meta(Id::new(5)), BlockMetaFlags::empty());
    }

    #[test]
    fn counter_buffer_link_is_bidirectional() {
        let mut metadata = Metadata::default();
        let resource = metadata.increase_bound_by(2);
        let counter = Id::new(resource.get() + 1);

        metadata.set_decoration(
            resource,
            Decoration::HlslCounterBufferGOOGLE,
            counter.get(),
        );
        assert_eq!(metadata.counter_buffer(resource), Some(counter));
        assert!(metadata.is_counter_buffer(counter));

        metadata.unset_decoration(resource, Decoration::HlslCounterBufferGOOGLE);
        assert_eq!(metadata.counter_buffer(resource), None);
        assert!(!metadata.is_counter_buffer(counter));
    }

    #[test]
    fn decoration_string() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        assert_eq!(
            metadata.get_decoration_string(id, Decoration::HlslSemanticGOOGLE),
            ""
        );
        metadata.set_decoration_string(id, Decoration::HlslSemanticGOOGLE, "SV_Target0");
        assert_eq!(
            metadata.get_decoration_string(id, Decoration::HlslSemanticGOOGLE),
            "SV_Target0"
        );
        metadata.unset_decoration(id, Decoration::HlslSemanticGOOGLE);
        assert_eq!(
            metadata.get_decoration_string(id, Decoration::HlslSemanticGOOGLE),
            ""
        );
    }

    #[test]
    fn name_sanitization() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_name(id, "frag_main(vf4;");
        assert_eq!(metadata.get_name(id), "frag_main");

        metadata.set_name(id, "light.position");
        assert_eq!(metadata.get_name(id), "light_position");

        metadata.set_name(id, "4ambient");
        assert_eq!(metadata.get_name(id), "_ambient");
    }

    #[test]
    fn reserved_names_clear_without_storing() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_name(id, "albedo");
        metadata.set_name(id, "_42");
        assert_eq!(metadata.get_name(id), "");

        metadata.set_member_name(id, 0, "normal");
        metadata.set_member_name(id, 0, "_m3");
        assert_eq!(metadata.get_member_name(id, 0), "");
    }

    #[test]
    fn member_name_sanitization() {
        let mut metadata = Metadata::default();
        let id = metadata.increase_bound_by(1);

        metadata.set_member_name(id, 2, "uv-coord");
        assert_eq!(metadata.get_member_name(id, 2), "uv_coord");
        assert_eq!(metadata.get_member_name(id, 0), "");
    }
}
