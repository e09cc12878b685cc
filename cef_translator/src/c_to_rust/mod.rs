pub mod translator_test_ref_ptr_client;
pub mod translator_test_ref_ptr_client_child;
