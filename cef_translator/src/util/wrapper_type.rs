//! Type identification for objects implemented on the C side.
//!
//! A `CefRef` remembers which adapter an object was originally wrapped as, so
//! an object that was upcast can later be downcast or handed back to C as the
//! right struct.

use std::ops::Deref;

#[cfg(debug_assertions)]
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{capi::cef_base_ref_counted_t, error::Error};

use super::{cef_arc::CefArc, starts_with::StartsWith};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WrapperType {
    TranslatorTestRefPtrClient,
    TranslatorTestRefPtrClientChild,
}

#[cfg(debug_assertions)]
static DEBUG_OBJ_CT: [AtomicUsize; 2] = [AtomicUsize::new(0), AtomicUsize::new(0)];

impl WrapperType {
    /// Objects currently wrapped as this type, however they are referenced.
    #[cfg(debug_assertions)]
    fn debug_obj_ct(self) -> &'static AtomicUsize {
        &DEBUG_OBJ_CT[self as usize]
    }
}

/// An adapter over a capi struct.
pub trait CToRust: StartsWith<cef_base_ref_counted_t> + Sized {
    type CType: StartsWith<cef_base_ref_counted_t>;

    const WRAPPER_TYPE: WrapperType;

    /// Resolve the struct for an object whose concrete type is `wrapper_type`,
    /// which is not `Self::WRAPPER_TYPE`.
    fn unwrap_derived(
        wrapper_type: WrapperType,
        object: CefArc<Self>,
    ) -> Result<*mut Self::CType, Error>;
}

/// Shared failure for `unwrap_derived` when the concrete type is not a
/// descendant of `T`.
pub(crate) fn unexpected_wrapper_type<T: CToRust>(found: WrapperType) -> Error {
    log::error!("Unexpected class type: {found:?}");
    Error::UnexpectedWrapperType {
        expected: T::WRAPPER_TYPE,
        found,
    }
}

/// Counts one wrapped object against the type it was wrapped as, until the
/// last handle sharing it goes away.
#[cfg(debug_assertions)]
struct DebugObj(WrapperType);

#[cfg(debug_assertions)]
impl DebugObj {
    fn new(wrapper_type: WrapperType) -> Arc<Self> {
        wrapper_type.debug_obj_ct().fetch_add(1, Ordering::Relaxed);
        Arc::new(Self(wrapper_type))
    }
}

#[cfg(debug_assertions)]
impl Drop for DebugObj {
    fn drop(&mut self) {
        self.0.debug_obj_ct().fetch_sub(1, Ordering::Relaxed);
    }
}

/// What a handle knows about the wrapped object beyond its address.
#[derive(Clone)]
pub(crate) struct Tag {
    pub(crate) wrapper_type: WrapperType,
    #[cfg(debug_assertions)]
    _debug_obj: Arc<DebugObj>,
}

impl Tag {
    fn new(wrapper_type: WrapperType) -> Self {
        Self {
            wrapper_type,
            #[cfg(debug_assertions)]
            _debug_obj: DebugObj::new(wrapper_type),
        }
    }
}

/// A reference to a C-implemented object, tagged with its concrete type.
pub struct CefRef<T: CToRust> {
    pub(crate) object: CefArc<T>,
    pub(crate) tag: Tag,
}

impl<T: CToRust> CefRef<T> {
    /// Take ownership of one reference on a struct received from C.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live struct of type `T::CType`.
    pub unsafe fn wrap(ptr: *mut T::CType) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        let object = unsafe { CefArc::from_raw(ptr.cast::<T>()) };
        Some(Self {
            object,
            tag: Tag::new(T::WRAPPER_TYPE),
        })
    }

    /// Like [`CefRef::wrap`], but a null pointer is an error.
    ///
    /// # Safety
    ///
    /// Same as [`CefRef::wrap`].
    pub unsafe fn try_wrap(ptr: *mut T::CType) -> Result<Self, Error> {
        unsafe { Self::wrap(ptr) }.ok_or(Error::NullStruct)
    }

    pub fn wrapper_type(&self) -> WrapperType {
        self.tag.wrapper_type
    }

    /// View the object as one of its parent types.
    pub fn upcast<U>(self) -> CefRef<U>
    where
        U: CToRust,
        T: StartsWith<U>,
    {
        let Self { object, tag } = self;
        CefRef {
            object: object.type_erase(),
            tag,
        }
    }

    /// Recover a more derived type. Hands the reference back if the object
    /// was not created as a `U`.
    pub fn downcast<U>(self) -> Result<CefRef<U>, Self>
    where
        U: CToRust + StartsWith<T>,
    {
        if self.tag.wrapper_type != U::WRAPPER_TYPE {
            return Err(self);
        }
        let Self { object, tag } = self;
        let object = CefArc {
            ptr: object.into_non_null().cast::<U>(),
        };
        Ok(CefRef { object, tag })
    }

    /// Give the reference back to C as a raw struct.
    pub fn unwrap_struct(self) -> Result<*mut T::CType, Error> {
        let Self { object, tag } = self;
        if tag.wrapper_type == T::WRAPPER_TYPE {
            Ok(object.into_raw().cast())
        } else {
            T::unwrap_derived(tag.wrapper_type, object)
        }
    }
}

impl<T: CToRust> Clone for CefRef<T> {
    fn clone(&self) -> Self {
        Self {
            object: self.object.clone(),
            tag: self.tag.clone(),
        }
    }
}

impl<T: CToRust> Deref for CefRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

/// Number of live objects wrapped as `T`.
#[cfg(debug_assertions)]
pub fn debug_obj_count<T: CToRust>() -> usize {
    T::WRAPPER_TYPE.debug_obj_ct().load(Ordering::Relaxed)
}
