//! Architecture classification.

/// CPU architectures with at least one prebuilt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X64,
    Ia32,
    Arm64,
    Arm,
}

impl Arch {
    /// Parse a `std::env::consts::ARCH` value.
    pub fn parse(arch: &str) -> Option<Self> {
        match arch {
            "x86_64" => Some(Arch::X64),
            "x86" => Some(Arch::Ia32),
            "aarch64" => Some(Arch::Arm64),
            "arm" => Some(Arch::Arm),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Ia32 => "ia32",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_std_names() {
        assert_eq!(Arch::parse("x86_64"), Some(Arch::X64));
        assert_eq!(Arch::parse("x86"), Some(Arch::Ia32));
        assert_eq!(Arch::parse("aarch64"), Some(Arch::Arm64));
        assert_eq!(Arch::parse("arm"), Some(Arch::Arm));
        assert_eq!(Arch::parse("mips64"), None);
    }
}
