/// Builds a `&'static CStr` from a string literal, for GL uniform names.
#[macro_export]
macro_rules! c_str {
    ($literal:expr) => {
        unsafe { std::ffi::CStr::from_bytes_with_nul_unchecked(concat!($literal, "\0").as_bytes()) }
    };
}
