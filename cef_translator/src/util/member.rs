//! Function slot lookup that honors the size a record declares.
//!
//! A slot counts as missing if it lies past `base.size` or if it is null.
//! Records are read through references to the full declared type, so the
//! allocation behind them must always be full size; a shorter `base.size`
//! only hides the trailing slots.

/// Returns true if a field `width` bytes wide at `offset` lies inside a record
/// that declares itself `size` bytes long.
pub const fn member_exists(size: usize, offset: usize, width: usize) -> bool {
    match offset.checked_add(width) {
        Some(end) => end <= size,
        None => false,
    }
}

/// Read a function slot from a capi record, or `None` if it is missing.
///
/// `$record` is a reference to a full-size record and `$ty` its capi type.
macro_rules! slot {
    ($record:expr, $ty:ty, $field:ident) => {{
        let record: &$ty = $record;
        let base: &$crate::capi::cef_base_ref_counted_t =
            $crate::util::starts_with::StartsWithExt::get_start(record);
        let size = base.size;
        let offset = ::std::mem::offset_of!($ty, $field);
        let width = ::std::mem::size_of_val(&record.$field);
        if $crate::util::member::member_exists(size, offset, width) {
            record.$field
        } else {
            None
        }
    }};
}

pub(crate) use slot;

#[cfg(test)]
mod test {
    use std::mem::{offset_of, size_of};

    use crate::{
        capi::{cef_translator_test_ref_ptr_client_child_t, cef_translator_test_ref_ptr_client_t},
        util::cef_arc::uninit_arc_vtable,
    };

    use super::member_exists;

    type ClientRecord = cef_translator_test_ref_ptr_client_t;
    type ChildRecord = cef_translator_test_ref_ptr_client_child_t;

    unsafe extern "C" fn seven(_: *mut cef_translator_test_ref_ptr_client_t) -> i32 {
        7
    }

    unsafe extern "C" fn eight(_: *mut cef_translator_test_ref_ptr_client_child_t) -> i32 {
        8
    }

    fn child(size: usize) -> cef_translator_test_ref_ptr_client_child_t {
        let mut base = uninit_arc_vtable();
        base.size = size;
        cef_translator_test_ref_ptr_client_child_t {
            base: cef_translator_test_ref_ptr_client_t {
                base,
                get_value: Some(seven),
            },
            get_other_value: Some(eight),
        }
    }

    #[test]
    fn bounds() {
        assert!(member_exists(16, 8, 8));
        assert!(!member_exists(15, 8, 8));
        assert!(member_exists(8, 0, 8));
        assert!(!member_exists(0, 0, 8));
        assert!(!member_exists(usize::MAX, usize::MAX, 8));
    }

    #[test]
    fn full_record_exposes_every_slot() {
        let record = child(size_of::<cef_translator_test_ref_ptr_client_child_t>());
        assert!(slot!(&record, ChildRecord, get_other_value).is_some());
        assert!(slot!(&record.base, ClientRecord, get_value).is_some());
    }

    #[test]
    fn short_record_hides_trailing_slots() {
        let record = child(offset_of!(ChildRecord, get_other_value));
        assert!(slot!(&record, ChildRecord, get_other_value).is_none());
        assert!(slot!(&record.base, ClientRecord, get_value).is_some());
    }

    #[test]
    fn null_slot_is_missing() {
        let mut record = child(size_of::<cef_translator_test_ref_ptr_client_child_t>());
        record.get_other_value = None;
        assert!(slot!(&record, ChildRecord, get_other_value).is_none());
    }
}
