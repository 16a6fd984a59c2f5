//! `slingurl encode` / `slingurl decode`.

use anyhow::Result;
use slingurl_core::codec;

pub fn run_encode(text: &str, keep_slashes: bool) -> Result<()> {
    let encoded = if keep_slashes {
        codec::encode_path(text)
    } else {
        codec::encode(text)
    };
    println!("{}", encoded);
    Ok(())
}

pub fn run_decode(text: &str) -> Result<()> {
    println!("{}", codec::decode(text));
    Ok(())
}
