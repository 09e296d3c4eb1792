//! C ABI of the native binding.
//!
//! Byte-producing functions write into a caller-owned buffer and return the
//! number of bytes written, or a negative module-defined error code.

/// `(input, input_len, out, out_cap) -> written`
pub type BytesFn = unsafe extern "C" fn(*const u8, usize, *mut u8, usize) -> isize;

/// `(input, input_len) -> value`
pub type DigestU64Fn = unsafe extern "C" fn(*const u8, usize) -> u64;

/// `(value, out, out_cap) -> written`
pub type U64BytesFn = unsafe extern "C" fn(u64, *mut u8, usize) -> isize;

/// `(values, count, out, out_cap) -> written`
pub type ZipU64Fn = unsafe extern "C" fn(*const u64, usize, *mut u8, usize) -> isize;

/// `(input, input_len, out, out_cap) -> values written`
pub type UnzipU64Fn = unsafe extern "C" fn(*const u8, usize, *mut u64, usize) -> isize;

/// `(key, key_len, input, input_len, out, out_cap) -> written`
pub type CipherFn =
    unsafe extern "C" fn(*const u8, usize, *const u8, usize, *mut u8, usize) -> isize;

/// `(out, len) -> written`
pub type FillFn = unsafe extern "C" fn(*mut u8, usize) -> isize;

/// Every symbol a binding must export.
pub const CAPABILITY_NAMES: [&str; 15] = [
    "z85Dump",
    "z85Load",
    "ipBin",
    "binU64",
    "u64Bin",
    "zipU64",
    "unzipU64",
    "b64",
    "unb64",
    "blake3Round",
    "blake3",
    "xxh3",
    "encrypt",
    "decrypt",
    "randomBytes",
];
