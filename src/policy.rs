//! Immutable per-direction configuration.

/// Encryption transform selectable by a `Policy`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncryptionType {
    #[default]
    Null,
    AesCm,
    AesF8,
    TwofishCm,
    TwofishF8,
}

/// Authentication transform selectable by a `Policy`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthenticationType {
    #[default]
    Null,
    HmacSha1,
    SkeinMac,
}

/// Immutable configuration for one `SrtpContext`/`SrtcpContext`: which
/// algorithms to use and how many bytes of key material each needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub enc_type: EncryptionType,
    pub auth_type: AuthenticationType,
    pub enc_key_length: usize,
    pub salt_key_length: usize,
    pub auth_key_length: usize,
    pub auth_tag_length: usize,
}

impl Policy {
    /// (AES-CM-128, HMAC-SHA1-80) — the required default suite.
    pub const fn aes_cm_hmac_sha1_80() -> Self {
        Policy {
            enc_type: EncryptionType::AesCm,
            auth_type: AuthenticationType::HmacSha1,
            enc_key_length: 16,
            salt_key_length: 14,
            auth_key_length: 20,
            auth_tag_length: 10,
        }
    }

    /// (AES-CM-128, HMAC-SHA1-32).
    pub const fn aes_cm_hmac_sha1_32() -> Self {
        Policy {
            auth_tag_length: 4,
            ..Self::aes_cm_hmac_sha1_80()
        }
    }

    /// (AES-F8-128, HMAC-SHA1-80).
    pub const fn aes_f8_hmac_sha1_80() -> Self {
        Policy {
            enc_type: EncryptionType::AesF8,
            ..Self::aes_cm_hmac_sha1_80()
        }
    }

    /// (NULL, HMAC-SHA1-80) — authentication only.
    pub const fn null_hmac_sha1_80() -> Self {
        Policy {
            enc_type: EncryptionType::Null,
            ..Self::aes_cm_hmac_sha1_80()
        }
    }

    /// (NULL, NULL) — debugging only.
    pub const fn null() -> Self {
        Policy {
            enc_type: EncryptionType::Null,
            auth_type: AuthenticationType::Null,
            enc_key_length: 16,
            salt_key_length: 14,
            auth_key_length: 0,
            auth_tag_length: 0,
        }
    }

    /// (Twofish-CM-128, HMAC-SHA1-80) — non-standard, optional.
    pub const fn twofish_cm_hmac_sha1_80() -> Self {
        Policy {
            enc_type: EncryptionType::TwofishCm,
            ..Self::aes_cm_hmac_sha1_80()
        }
    }

    /// (Twofish-F8-128, HMAC-SHA1-80) — non-standard, optional.
    pub const fn twofish_f8_hmac_sha1_80() -> Self {
        Policy {
            enc_type: EncryptionType::TwofishF8,
            ..Self::aes_cm_hmac_sha1_80()
        }
    }

    /// Swap in Skein-MAC for whichever encryption side is configured.
    pub const fn with_skein_mac(mut self) -> Self {
        self.auth_type = AuthenticationType::SkeinMac;
        self
    }
}
