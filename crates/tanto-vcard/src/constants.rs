/// Crate name written in generated `PRODID` values.
pub const PRODUCT_NAME: &str = "tanto-vcard";

/// `PRODID` value written when `add_prod_id` is enabled.
pub const PRODUCT_ID: &str =
    const_str::concat!("-//tanto//", PRODUCT_NAME, " ", env!("CARGO_PKG_VERSION"), "//EN");
