//! `repr(C)` records matching the CEF C API for the translator test
//! ref-ptr client interfaces.
//!
//! Every function slot is nullable. A record built by an older library may
//! also be shorter than these declarations, which is what `base.size` is for.

#![allow(non_camel_case_types)]

use std::os::raw::c_int;

use crate::util::starts_with::StartsWith;

/// All ref-counted framework structures must include this structure first.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct cef_base_ref_counted_t {
    /// Size of the data structure.
    pub size: usize,

    /// Called to increment the reference count for the object.
    pub add_ref: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t)>,

    /// Called to decrement the reference count for the object. If the reference
    /// count falls to 0 the object should self-delete. Returns true (1) if the
    /// resulting reference count is 0.
    pub release: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,

    /// Returns true (1) if the current reference count is 1.
    pub has_one_ref: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,

    /// Returns true (1) if the current reference count is at least 1.
    pub has_at_least_one_ref:
        Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,
}

/// Structure representing a client implemented by the other side of the
/// boundary and handed across by reference.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct cef_translator_test_ref_ptr_client_t {
    pub base: cef_base_ref_counted_t,

    /// Return a value.
    pub get_value:
        Option<unsafe extern "C" fn(self_: *mut cef_translator_test_ref_ptr_client_t) -> c_int>,
}

/// Child of `cef_translator_test_ref_ptr_client_t`. The parent record is the
/// first field, so a child pointer is also a valid parent pointer.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct cef_translator_test_ref_ptr_client_child_t {
    pub base: cef_translator_test_ref_ptr_client_t,

    /// Return another value.
    pub get_other_value: Option<
        unsafe extern "C" fn(self_: *mut cef_translator_test_ref_ptr_client_child_t) -> c_int,
    >,
}

unsafe impl StartsWith<cef_base_ref_counted_t> for cef_translator_test_ref_ptr_client_t {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_translator_test_ref_ptr_client_child_t {}
unsafe impl StartsWith<cef_translator_test_ref_ptr_client_t>
    for cef_translator_test_ref_ptr_client_child_t
{
}
