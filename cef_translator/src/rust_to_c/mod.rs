//! Records whose implementation lives in rust, handed to C through the
//! same adapters used for C-implemented objects.

pub mod translator_test_ref_ptr_client;
pub mod translator_test_ref_ptr_client_child;

pub use translator_test_ref_ptr_client::RefPtrClientConfig;
pub use translator_test_ref_ptr_client_child::RefPtrClientChildConfig;

/// Which slots a rust-built record fills in.
///
/// Leaving a slot out, or declaring a `size` shorter than the full record,
/// makes that slot read as missing through the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots {
    pub get_value: bool,
    /// Ignored for records without this slot.
    pub get_other_value: bool,
    /// Overrides `base.size`.
    pub size: Option<usize>,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            get_value: true,
            get_other_value: true,
            size: None,
        }
    }
}
