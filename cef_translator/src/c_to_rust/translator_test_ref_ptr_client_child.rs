use std::ops::Deref;

use crate::{
    capi::{
        cef_base_ref_counted_t, cef_translator_test_ref_ptr_client_child_t,
        cef_translator_test_ref_ptr_client_t,
    },
    error::Error,
    util::{
        cef_arc::CefArc,
        member::slot,
        starts_with::{StartsWith, StartsWithExt as _},
        wrapper_type::{CToRust, WrapperType, unexpected_wrapper_type},
    },
};

use super::translator_test_ref_ptr_client::RefPtrClient;

#[repr(transparent)]
pub struct RefPtrClientChild(pub(crate) cef_translator_test_ref_ptr_client_child_t);

unsafe impl StartsWith<cef_translator_test_ref_ptr_client_child_t> for RefPtrClientChild {}
unsafe impl StartsWith<cef_translator_test_ref_ptr_client_t> for RefPtrClientChild {}
unsafe impl StartsWith<cef_base_ref_counted_t> for RefPtrClientChild {}
unsafe impl StartsWith<RefPtrClient> for RefPtrClientChild {}

impl RefPtrClientChild {
    #[doc = "\n Return another value.\n"]
    pub fn get_other_value(&self) -> i32 {
        let Some(get_other_value) = slot!(
            &self.0,
            cef_translator_test_ref_ptr_client_child_t,
            get_other_value
        ) else {
            log::trace!("get_other_value is missing, returning 0");
            return 0;
        };
        unsafe { get_other_value(self.start_ptr()) }
    }

    #[doc = "\n Return a value.\n"]
    pub fn get_value(&self) -> i32 {
        self.as_parent().get_value()
    }

    pub fn as_parent(&self) -> &RefPtrClient {
        self.get_start()
    }
}

impl Deref for RefPtrClientChild {
    type Target = RefPtrClient;

    fn deref(&self) -> &Self::Target {
        self.as_parent()
    }
}

impl CToRust for RefPtrClientChild {
    type CType = cef_translator_test_ref_ptr_client_child_t;

    const WRAPPER_TYPE: WrapperType = WrapperType::TranslatorTestRefPtrClientChild;

    // nothing derives from the child.
    fn unwrap_derived(
        wrapper_type: WrapperType,
        _object: CefArc<Self>,
    ) -> Result<*mut Self::CType, Error> {
        Err(unexpected_wrapper_type::<Self>(wrapper_type))
    }
}
