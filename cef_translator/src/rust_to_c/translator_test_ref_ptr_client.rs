use std::os::raw::c_int;

use crate::{
    c_to_rust::translator_test_ref_ptr_client::RefPtrClient,
    capi::cef_translator_test_ref_ptr_client_t,
    util::cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
};

use super::Slots;

impl RefPtrClient {
    pub fn new<C: RefPtrClientConfig>(config: C) -> CefArc<Self> {
        Self::new_with_slots(config, Slots::default())
    }

    pub fn new_with_slots<C: RefPtrClientConfig>(config: C, slots: Slots) -> CefArc<Self> {
        let v_table = RefPtrClient(cef_translator_test_ref_ptr_client_t {
            base: uninit_arc_vtable(),
            get_value: if slots.get_value {
                Some(C::get_value_raw)
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

// called from whichever thread C dispatches on, so the config is shared.
pub trait RefPtrClientConfig: Sized + Send + Sync {
    fn get_value(&self) -> i32;
}

pub(crate) trait RefPtrClientConfigExt: RefPtrClientConfig {
    unsafe extern "C" fn get_value_raw(ptr: *mut cef_translator_test_ref_ptr_client_t) -> c_int {
        let rust_impl =
            unsafe { CefArcFromRust::<RefPtrClient, Self>::get_rust_impl_from_ptr(ptr.cast()) };
        rust_impl.get_value()
    }
}

impl<T: RefPtrClientConfig> RefPtrClientConfigExt for T {}
