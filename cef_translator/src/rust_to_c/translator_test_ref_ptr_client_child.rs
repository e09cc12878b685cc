use std::os::raw::c_int;

use crate::{
    c_to_rust::translator_test_ref_ptr_client_child::RefPtrClientChild,
    capi::{cef_translator_test_ref_ptr_client_child_t, cef_translator_test_ref_ptr_client_t},
    util::cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
};

use super::{RefPtrClientConfig, Slots};

impl RefPtrClientChild {
    pub fn new<C: RefPtrClientChildConfig>(config: C) -> CefArc<Self> {
        Self::new_with_slots(config, Slots::default())
    }

    pub fn new_with_slots<C: RefPtrClientChildConfig>(config: C, slots: Slots) -> CefArc<Self> {
        let v_table = RefPtrClientChild(cef_translator_test_ref_ptr_client_child_t {
            base: cef_translator_test_ref_ptr_client_t {
                base: uninit_arc_vtable(),
                get_value: if slots.get_value {
                    Some(C::get_parent_value_raw)
                } else {
                    None
                },
            },
            get_other_value: if slots.get_other_value {
                Some(C::get_other_value_raw)
            } else {
                None
            },
        });
        let mut arc = CefArc::new(v_table, config);
        if let Some(size) = slots.size {
            arc.set_declared_size(size);
        }
        arc.type_erase()
    }
}

pub trait RefPtrClientChildConfig: RefPtrClientConfig {
    fn get_other_value(&self) -> i32;
}

pub(crate) trait RefPtrClientChildConfigExt: RefPtrClientChildConfig {
    // the parent slot still sees the child layout, so it needs its own trampoline.
    unsafe extern "C" fn get_parent_value_raw(
        ptr: *mut cef_translator_test_ref_ptr_client_t,
    ) -> c_int {
        let rust_impl = unsafe {
            CefArcFromRust::<RefPtrClientChild, Self>::get_rust_impl_from_ptr(ptr.cast())
        };
        rust_impl.get_value()
    }

    unsafe extern "C" fn get_other_value_raw(
        ptr: *mut cef_translator_test_ref_ptr_client_child_t,
    ) -> c_int {
        let rust_impl = unsafe {
            CefArcFromRust::<RefPtrClientChild, Self>::get_rust_impl_from_ptr(ptr.cast())
        };
        rust_impl.get_other_value()
    }
}

impl<T: RefPtrClientChildConfig> RefPtrClientChildConfigExt for T {}
