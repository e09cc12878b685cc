use crate::{
    capi::{cef_base_ref_counted_t, cef_translator_test_ref_ptr_client_t},
    error::Error,
    util::{
        cef_arc::CefArc,
        member::slot,
        starts_with::{StartsWith, StartsWithExt as _},
        wrapper_type::{CToRust, WrapperType, unexpected_wrapper_type},
    },
};

#[repr(transparent)]
pub struct RefPtrClient(pub(crate) cef_translator_test_ref_ptr_client_t);

unsafe impl StartsWith<cef_translator_test_ref_ptr_client_t> for RefPtrClient {}
unsafe impl StartsWith<cef_base_ref_counted_t> for RefPtrClient {}

impl RefPtrClient {
    #[doc = "\n Return a value.\n"]
    pub fn get_value(&self) -> i32 {
        let Some(get_value) = slot!(&self.0, cef_translator_test_ref_ptr_client_t, get_value)
        else {
            log::trace!("get_value is missing, returning 0");
            return 0;
        };
        unsafe { get_value(self.start_ptr()) }
    }
}

impl CToRust for RefPtrClient {
    type CType = cef_translator_test_ref_ptr_client_t;

    const WRAPPER_TYPE: WrapperType = WrapperType::TranslatorTestRefPtrClient;

    fn unwrap_derived(
        wrapper_type: WrapperType,
        object: CefArc<Self>,
    ) -> Result<*mut Self::CType, Error> {
        match wrapper_type {
            // the child struct begins with this one.
            WrapperType::TranslatorTestRefPtrClientChild => Ok(object.into_raw().cast()),
            found => Err(unexpected_wrapper_type::<Self>(found)),
        }
    }
}
