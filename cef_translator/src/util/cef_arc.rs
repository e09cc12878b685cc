use std::{
    ops::Deref,
    os::raw::c_int,
    ptr::NonNull,
    sync::atomic::AtomicUsize,
};

use super::starts_with::{StartsWith, StartsWithExt as _};
use crate::capi::cef_base_ref_counted_t;

/// A reference counted wrapper for CEF types.
///
/// Each `CefArc` owns exactly one reference on the underlying object.
/// A base record with unset `add_ref`/`release` slots is treated as unmanaged,
/// so cloning and dropping become no-ops.
#[repr(transparent)]
pub struct CefArc<T: StartsWith<cef_base_ref_counted_t>> {
    pub(crate) ptr: NonNull<T>,
}

unsafe impl<T: StartsWith<cef_base_ref_counted_t>> Send for CefArc<T> {}
unsafe impl<T: StartsWith<cef_base_ref_counted_t>> Sync for CefArc<T> {}

impl<T: StartsWith<cef_base_ref_counted_t>> Drop for CefArc<T> {
    fn drop(&mut self) {
        let base = self.base_ptr();
        unsafe {
            if let Some(release) = (*base).release {
                release(base);
            }
        }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> Clone for CefArc<T> {
    fn clone(&self) -> Self {
        let base = self.base_ptr();
        unsafe {
            if let Some(add_ref) = (*base).add_ref {
                add_ref(base);
            }
        }
        Self { ptr: self.ptr }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> Deref for CefArc<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> CefArc<T> {
    fn base_ptr(&self) -> *mut cef_base_ref_counted_t {
        self.ptr.as_ptr().cast()
    }

    pub(crate) fn type_erase<U>(self) -> CefArc<U>
    where
        U: StartsWith<cef_base_ref_counted_t>,
        T: StartsWith<U>,
    {
        CefArc {
            ptr: self.into_non_null().cast(),
        }
    }

    pub(crate) fn into_non_null(self) -> NonNull<T> {
        std::mem::ManuallyDrop::new(self).ptr
    }

    /// Give up this reference without releasing it, for handing to C.
    pub fn into_raw(self) -> *mut T {
        self.into_non_null().as_ptr()
    }

    /// # Safety
    ///
    /// `ptr` must be non-null and point to a live object that starts with
    /// `cef_base_ref_counted_t`. One reference is adopted.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
        }
    }

    /// Returns true if the object is only referenced by this handle.
    pub fn has_one_ref(&self) -> bool {
        let base = self.base_ptr();
        match unsafe { (*base).has_one_ref } {
            Some(has_one_ref) => unsafe { has_one_ref(base) != 0 },
            None => false,
        }
    }

    pub fn has_at_least_one_ref(&self) -> bool {
        let base = self.base_ptr();
        match unsafe { (*base).has_at_least_one_ref } {
            Some(has_at_least_one_ref) => unsafe { has_at_least_one_ref(base) != 0 },
            None => false,
        }
    }
}

/// A C object allocated by rust.
/// It contains a vtable and the user defined rust type, as well as the ref
/// count the base callbacks operate on.
#[repr(C)]
pub struct CefArcFromRust<VTable, RustImpl> {
    /// the cef capi type representing the vtable.
    /// this is the first field so that it can be cast to the vtable type by cef.
    /// because this contains the release function, the RustImpl type can be erased
    /// and still properly dropped.
    pub(crate) capi_v_table: VTable,

    pub(crate) ref_count: AtomicUsize,

    /// the user defined rust type.
    pub rust_impl: RustImpl,
}

unsafe impl<V, R> StartsWith<V> for CefArcFromRust<V, R> {}
unsafe impl<V: StartsWith<cef_base_ref_counted_t>, R> StartsWith<cef_base_ref_counted_t>
    for CefArcFromRust<V, R>
{
}

impl<V: StartsWith<cef_base_ref_counted_t>, R> CefArcFromRust<V, R> {
    /// capi_v_table is the partially completed vtable.
    /// the values in the base will be populated by this function.
    pub(crate) fn new(mut capi_v_table: V, rust_impl: R) -> Self {
        let base = capi_v_table.get_start_mut();
        base.size = std::mem::size_of::<V>();
        base.add_ref = Some(c_callbacks::add_ref_ptr::<V, R>);
        base.release = Some(c_callbacks::release_ptr::<V, R>);
        base.has_one_ref = Some(c_callbacks::has_one_ref_ptr::<V, R>);
        base.has_at_least_one_ref = Some(c_callbacks::has_at_least_one_ref_ptr::<V, R>);

        Self {
            capi_v_table,
            ref_count: AtomicUsize::new(1),
            rust_impl,
        }
    }

    /// # Safety
    ///
    /// `ptr` must have been produced by `CefArc::<CefArcFromRust<V, R>>::new`
    /// and still be alive for `'a`.
    pub(crate) unsafe fn get_rust_impl_from_ptr<'a>(ptr: *mut cef_base_ref_counted_t) -> &'a R {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        &rust_type.rust_impl
    }
}

mod c_callbacks {
    use std::{
        os::raw::c_int,
        sync::atomic::{Ordering, fence},
    };

    use crate::capi::cef_base_ref_counted_t;

    use super::{CefArcFromRust, wrap_boolean};

    pub unsafe extern "C" fn add_ref_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        rust_type.ref_count.fetch_add(1, Ordering::Relaxed);
    }

    pub unsafe extern "C" fn release_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) -> c_int {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        if rust_type.ref_count.fetch_sub(1, Ordering::Release) != 1 {
            return 0;
        }

        // same ordering as the standard library arc.
        fence(Ordering::Acquire);

        // we know this box came from CefArc::new, so it is a CefArcFromRust<V, R>.
        drop(unsafe { Box::from_raw(ptr.cast::<CefArcFromRust<V, R>>()) });

        1
    }

    pub unsafe extern "C" fn has_one_ref_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) -> c_int {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        wrap_boolean(rust_type.ref_count.load(Ordering::Acquire) == 1)
    }

    pub unsafe extern "C" fn has_at_least_one_ref_ptr<V, R>(
        ptr: *mut cef_base_ref_counted_t,
    ) -> c_int {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        wrap_boolean(rust_type.ref_count.load(Ordering::Acquire) >= 1)
    }
}

fn wrap_boolean(value: bool) -> c_int {
    c_int::from(value)
}

pub(crate) fn uninit_arc_vtable() -> cef_base_ref_counted_t {
    cef_base_ref_counted_t {
        size: 0,
        add_ref: None,
        release: None,
        has_one_ref: None,
        has_at_least_one_ref: None,
    }
}

impl<V: StartsWith<cef_base_ref_counted_t>, R> CefArc<CefArcFromRust<V, R>> {
    pub(crate) fn new(capi_v_table: V, rust_impl: R) -> Self {
        let inner = CefArcFromRust::new(capi_v_table, rust_impl);
        let inner = Box::into_raw(Box::new(inner));
        let ptr = unsafe { NonNull::new_unchecked(inner) };

        Self { ptr }
    }

    /// Override the size the vtable reports, which hides any slots past it.
    pub(crate) fn set_declared_size(&mut self, size: usize) {
        let inner = unsafe { self.ptr.as_mut() };
        inner.capi_v_table.get_start_mut().size = size;
    }

    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        self.ref_count.load(std::sync::atomic::Ordering::Acquire)
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use crate::capi::cef_base_ref_counted_t;

    use super::{CefArc, CefArcFromRust, uninit_arc_vtable};

    #[repr(transparent)]
    struct Plain(cef_base_ref_counted_t);

    unsafe impl crate::util::starts_with::StartsWith<cef_base_ref_counted_t> for Plain {}

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn clone_and_drop_balance() {
        let drops = Arc::new(AtomicUsize::new(0));
        let arc = CefArc::new(Plain(uninit_arc_vtable()), DropCounter(drops.clone()));
        assert_eq!(arc.ref_count(), 1);

        let first = arc.clone();
        let second = first.clone();
        assert_eq!(arc.ref_count(), 3);
        assert!(!arc.has_one_ref());
        assert!(arc.has_at_least_one_ref());

        drop(first);
        drop(second);
        assert_eq!(arc.ref_count(), 1);
        assert!(arc.has_one_ref());
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        drop(arc);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn base_is_populated() {
        let arc = CefArc::new(Plain(uninit_arc_vtable()), ());
        let base = &arc.capi_v_table.0;
        assert_eq!(base.size, std::mem::size_of::<Plain>());
        assert!(base.add_ref.is_some());
        assert!(base.release.is_some());
        assert!(base.has_one_ref.is_some());
        assert!(base.has_at_least_one_ref.is_some());
    }

    #[test]
    fn raw_round_trip_keeps_the_reference() {
        let drops = Arc::new(AtomicUsize::new(0));
        let arc = CefArc::new(Plain(uninit_arc_vtable()), DropCounter(drops.clone()));
        let erased: CefArc<Plain> = arc.type_erase();

        let raw = erased.into_raw();
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        let adopted = unsafe { CefArc::from_raw(raw) };
        assert!(adopted.has_one_ref());
        drop(adopted);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmanaged_base_is_left_alone() {
        let mut record = Plain(uninit_arc_vtable());
        let arc = unsafe { CefArc::from_raw(&mut record as *mut Plain) };
        let copy = arc.clone();

        assert!(!copy.has_one_ref());
        assert!(!copy.has_at_least_one_ref());

        drop(copy);
        drop(arc);
        assert_eq!(record.0.size, 0);
    }

    #[test]
    fn rust_impl_is_reachable_from_the_vtable() {
        let arc = CefArc::new(Plain(uninit_arc_vtable()), 42_u32);
        let erased: CefArc<Plain> = arc.type_erase();
        let base = erased.into_raw().cast::<cef_base_ref_counted_t>();

        let value = unsafe { CefArcFromRust::<Plain, u32>::get_rust_impl_from_ptr(base) };
        assert_eq!(*value, 42);

        drop(unsafe { CefArc::from_raw(base.cast::<Plain>()) });
    }
}
