//! The public function table.

use nbind_loader::{CapabilityModule, RawSymbol};
use std::path::Path;

use crate::abi::{BytesFn, CipherFn, DigestU64Fn, FillFn, U64BytesFn, UnzipU64Fn, ZipU64Fn};
use crate::{Error, Result};

macro_rules! capabilities {
    ($($field:ident: $ty:ty = $symbol:literal),+ $(,)?) => {
        /// Functions exported by the loaded binding, exposed as-is.
        ///
        /// Owns the module, so every pointer stays callable for as long as
        /// the table exists.
        #[derive(Debug)]
        pub struct Capabilities {
            $(
                #[doc = concat!("`", $symbol, "`")]
                pub $field: $ty,
            )+
            module: Box<dyn CapabilityModule>,
        }

        impl Capabilities {
            /// Bind every required symbol, or none.
            pub fn bind(module: Box<dyn CapabilityModule>) -> Result<Self> {
                $(
                    let raw = symbol(&*module, $symbol)?;
                    // SAFETY: the binding ABI fixes the signature of each name.
                    let $field = unsafe { std::mem::transmute::<RawSymbol, $ty>(raw) };
                )+
                Ok(Self { $($field,)+ module })
            }
        }
    };
}

capabilities! {
    z85_dump: BytesFn = "z85Dump",
    z85_load: BytesFn = "z85Load",
    ip_bin: BytesFn = "ipBin",
    bin_u64: DigestU64Fn = "binU64",
    u64_bin: U64BytesFn = "u64Bin",
    zip_u64: ZipU64Fn = "zipU64",
    unzip_u64: UnzipU64Fn = "unzipU64",
    b64: BytesFn = "b64",
    unb64: BytesFn = "unb64",
    blake3_round: BytesFn = "blake3Round",
    blake3: BytesFn = "blake3",
    xxh3: DigestU64Fn = "xxh3",
    encrypt: CipherFn = "encrypt",
    decrypt: CipherFn = "decrypt",
    random_bytes: FillFn = "randomBytes",
}

fn symbol(module: &dyn CapabilityModule, name: &'static str) -> Result<RawSymbol> {
    module.symbol(name).map_err(|source| Error::MissingCapability {
        name,
        origin: module.origin().to_path_buf(),
        source,
    })
}

impl Capabilities {
    /// Where the binding was loaded from.
    pub fn origin(&self) -> &Path {
        self.module.origin()
    }
}
