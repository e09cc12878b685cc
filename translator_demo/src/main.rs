use anyhow::Result;
use cef_translator::{
    c_to_rust::{
        translator_test_ref_ptr_client::RefPtrClient,
        translator_test_ref_ptr_client_child::RefPtrClientChild,
    },
    rust_to_c::{RefPtrClientChildConfig, RefPtrClientConfig},
    util::wrapper_type::CefRef,
};
use log::info;

mod config;

use config::Config;

struct DemoClient {
    value: i32,
    other_value: i32,
}

impl RefPtrClientConfig for DemoClient {
    fn get_value(&self) -> i32 {
        info!("get_value called from C");
        self.value
    }
}

impl RefPtrClientChildConfig for DemoClient {
    fn get_other_value(&self) -> i32 {
        info!("get_other_value called from C");
        self.other_value
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_matches(&config::command().get_matches());
    info!("building client with {config:?}");

    let client = RefPtrClientChild::new_with_slots(
        DemoClient {
            value: config.value,
            other_value: config.other_value,
        },
        config.slots,
    );

    // hand the struct across the boundary and wrap it on the way back.
    let child = unsafe { CefRef::<RefPtrClientChild>::try_wrap(client.into_raw().cast())? };
    println!("get_value: {}", child.get_value());
    println!("get_other_value: {}", child.get_other_value());

    let parent: CefRef<RefPtrClient> = child.upcast();
    println!("as parent ({:?}) get_value: {}", parent.wrapper_type(), parent.get_value());

    let child = match parent.downcast::<RefPtrClientChild>() {
        Ok(child) => child,
        Err(parent) => anyhow::bail!("downcast failed for {:?}", parent.wrapper_type()),
    };

    let raw = child.upcast::<RefPtrClient>().unwrap_struct()?;
    info!("unwrapped parent struct at {raw:p}");

    // release the reference the unwrap handed out.
    drop(unsafe { CefRef::<RefPtrClient>::try_wrap(raw)? });

    Ok(())
}
